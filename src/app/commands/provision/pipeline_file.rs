use tracing::info;

use super::{ProvisioningState, ProvisioningWorkflow};
use crate::domain::{AppError, PipelineFileSpec};

impl ProvisioningWorkflow<'_> {
    /// Write the pipeline file, asking first when one already exists.
    ///
    /// Returns the parameters written, or `None` when the operator kept
    /// the existing file.
    pub(super) fn reconcile_pipeline_file(
        &self,
        state: &ProvisioningState,
    ) -> Result<Option<PipelineFileSpec>, AppError> {
        if self.pipeline_file.exists()
            && !self.confirm("A pipeline file already exists. Overwrite it?")?
        {
            info!("Keeping the existing pipeline file");
            return Ok(None);
        }

        let spec = state.pipeline_spec(&self.settings.artifact_name);
        let path = self.pipeline_file.write(&spec)?;
        info!("Wrote pipeline file {}", path.display());
        Ok(Some(spec))
    }

    /// Re-render when repository reconciliation moved the run to another
    /// organization or project.
    pub(super) fn refresh_pipeline_file(
        &self,
        state: &ProvisioningState,
        written: Option<PipelineFileSpec>,
    ) -> Result<(), AppError> {
        let Some(written) = written else {
            return Ok(());
        };
        let current = state.pipeline_spec(&self.settings.artifact_name);
        if written != current {
            let path = self.pipeline_file.write(&current)?;
            info!(
                "Regenerated pipeline file {} for '{}'",
                path.display(),
                current.service_endpoint
            );
        }
        Ok(())
    }
}
