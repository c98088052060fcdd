use crate::app::commands::provision::ProvisioningWorkflow;
use crate::domain::{FuncpipeConfig, WebLinks};
use crate::ports::{
    FunctionAppCatalog, LocalRepository, OperatorPrompt, PipelineFileStore, PipelineService,
};

/// Application context holding dependencies for command execution.
pub struct AppContext<S, F, L, P, W> {
    pipelines: S,
    apps: F,
    local: L,
    prompt: P,
    pipeline_file: W,
    config: FuncpipeConfig,
}

impl<S, F, L, P, W> AppContext<S, F, L, P, W>
where
    S: PipelineService,
    F: FunctionAppCatalog,
    L: LocalRepository,
    P: OperatorPrompt,
    W: PipelineFileStore,
{
    /// Create a new application context.
    pub fn new(
        pipelines: S,
        apps: F,
        local: L,
        prompt: P,
        pipeline_file: W,
        config: FuncpipeConfig,
    ) -> Self {
        Self { pipelines, apps, local, prompt, pipeline_file, config }
    }

    /// Get a reference to the pipeline service.
    pub fn pipelines(&self) -> &S {
        &self.pipelines
    }

    pub fn config(&self) -> &FuncpipeConfig {
        &self.config
    }

    /// Wire the provisioning workflow to this context's ports.
    pub fn workflow(&self) -> ProvisioningWorkflow<'_> {
        ProvisioningWorkflow::new(
            &self.pipelines,
            &self.apps,
            &self.local,
            &self.prompt,
            &self.pipeline_file,
            &self.config.workflow,
            WebLinks::new(&self.config.devops.api_url),
        )
    }
}
