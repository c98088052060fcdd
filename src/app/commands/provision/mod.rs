//! Interactive get-or-create provisioning of a delivery pipeline for one
//! function app.
//!
//! Stages run in a fixed order over a single [`ProvisioningState`]; every
//! stage that creates a remote resource first looks it up by name.

mod application;
mod build;
mod naming;
mod organization;
mod pipeline_file;
mod project;
mod release;
mod repository;
mod service_endpoint;
mod state;


use tracing::info;

use crate::app::AppContext;
use crate::domain::{AppError, Release, WebLinks, WorkflowSettings};
use crate::ports::{
    FunctionAppCatalog, LocalRepository, OperatorPrompt, PipelineFileStore, PipelineService,
};

pub use state::ProvisioningState;

/// Names supplied on the command line; `None` means ask the operator.
#[derive(Debug, Clone, Default)]
pub struct ProvisionRequest {
    pub function_app: Option<String>,
    pub organization: Option<String>,
    pub project: Option<String>,
}

/// What a successful run produced.
#[derive(Debug, Clone)]
pub struct ProvisionOutcome {
    pub function_app: String,
    pub organization: String,
    pub project: String,
    pub repository: String,
    pub build_id: u64,
    pub release: Release,
}

/// Run the provisioning workflow against the context's ports.
pub fn execute<S, F, L, P, W>(
    ctx: &AppContext<S, F, L, P, W>,
    request: &ProvisionRequest,
) -> Result<ProvisionOutcome, AppError>
where
    S: PipelineService,
    F: FunctionAppCatalog,
    L: LocalRepository,
    P: OperatorPrompt,
    W: PipelineFileStore,
{
    ctx.workflow().run(request)
}

pub struct ProvisioningWorkflow<'a> {
    pipelines: &'a dyn PipelineService,
    apps: &'a dyn FunctionAppCatalog,
    local: &'a dyn LocalRepository,
    prompt: &'a dyn OperatorPrompt,
    pipeline_file: &'a dyn PipelineFileStore,
    settings: &'a WorkflowSettings,
    links: WebLinks,
}

impl<'a> ProvisioningWorkflow<'a> {
    pub fn new(
        pipelines: &'a dyn PipelineService,
        apps: &'a dyn FunctionAppCatalog,
        local: &'a dyn LocalRepository,
        prompt: &'a dyn OperatorPrompt,
        pipeline_file: &'a dyn PipelineFileStore,
        settings: &'a WorkflowSettings,
        links: WebLinks,
    ) -> Self {
        Self { pipelines, apps, local, prompt, pipeline_file, settings, links }
    }

    /// Execute every stage; the first error stops the run.
    pub fn run(&self, request: &ProvisionRequest) -> Result<ProvisionOutcome, AppError> {
        let application = self.resolve_application(request.function_app.as_deref())?;
        let organization = self.resolve_organization(request.organization.as_deref())?;
        let project = self.resolve_project(&organization, request.project.as_deref())?;

        let branch = self.local.branch()?;
        let mut state = ProvisioningState::new(application, organization, project, branch);
        let written = self.reconcile_pipeline_file(&state)?;
        self.reconcile_repository(&mut state)?;
        self.refresh_pipeline_file(&state, written)?;

        let endpoint = self.ensure_service_endpoint(&state)?;
        self.install_extensions(&state)?;
        let (definition, run) = self.start_build(&state)?;
        self.wait_for_artifacts(&state, run.clone())?;
        let release = self.create_release(&state, &definition, &endpoint)?;

        info!(
            organization = %state.organization,
            project = %state.project,
            repository = %state.repository,
            "Provisioning finished"
        );

        Ok(ProvisionOutcome {
            function_app: state.application.name.clone(),
            organization: state.organization,
            project: state.project,
            repository: state.repository,
            build_id: run.id,
            release,
        })
    }
}
