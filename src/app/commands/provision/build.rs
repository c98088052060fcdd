use std::thread;

use chrono::Utc;
use tracing::{debug, error, info, warn};

use super::naming::Matches;
use super::{ProvisioningState, ProvisioningWorkflow};
use crate::domain::{AppError, Artifact, BuildDefinition, BuildDefinitionRequest, BuildRun};

impl ProvisioningWorkflow<'_> {
    /// Get-or-create the build definition and always queue a fresh run.
    pub(super) fn start_build(
        &self,
        state: &ProvisioningState,
    ) -> Result<(BuildDefinition, BuildRun), AppError> {
        let (org, project) = (state.organization.as_str(), state.project.as_str());
        let name = state.names().build_definition;
        let mut matching: Vec<BuildDefinition> = self
            .pipelines
            .list_build_definitions(org, project)?
            .into_iter()
            .filter(|definition| definition.name == name)
            .collect();

        let definition = match Matches::count(matching.len()) {
            Matches::One => {
                info!("Using existing build definition '{}'", name);
                matching.remove(0)
            }
            counted => {
                if let Matches::Many(count) = counted {
                    warn!(
                        "Found {} build definitions named '{}'; creating a new one",
                        count, name
                    );
                }
                let request = BuildDefinitionRequest {
                    organization: org.to_string(),
                    project: project.to_string(),
                    name: name.clone(),
                    source: state.repository_source(),
                    pool: self.settings.build_pool.clone(),
                    pipeline_file: self.settings.pipeline_file.to_string_lossy().into_owned(),
                    branch: state.branch.clone(),
                };
                let created = self.pipelines.create_build_definition(&request)?;
                info!("Created build definition '{}'", created.name);
                created
            }
        };

        let run = self.pipelines.queue_build(org, project, &definition, &self.settings.build_pool)?;
        info!("Queued build {}: {}", run.id, self.links.build_results(org, project, run.id));
        Ok((definition, run))
    }

    /// Poll until the run completes or publishes artifacts.
    ///
    /// A failed or canceled run stops the workflow with a link to its log.
    pub(super) fn wait_for_artifacts(
        &self,
        state: &ProvisioningState,
        run: BuildRun,
    ) -> Result<Vec<Artifact>, AppError> {
        let (org, project) = (state.organization.as_str(), state.project.as_str());
        let started = Utc::now();
        let mut run = run;

        loop {
            thread::sleep(self.settings.poll_interval());
            run = self.pipelines.get_build(org, project, run.id)?;
            if run.is_completed() {
                break;
            }
            let artifacts = self.pipelines.list_artifacts(org, project, run.id)?;
            if !artifacts.is_empty() {
                info!("Build {} published {} artifact(s)", run.id, artifacts.len());
                return Ok(artifacts);
            }
            debug!(
                build_id = run.id,
                status = ?run.status,
                elapsed_secs = (Utc::now() - started).num_seconds(),
                "Waiting for build artifacts"
            );
        }

        let url = self.links.build_results(org, project, run.id);
        if run.has_failed() {
            error!("Build {} did not succeed. To view details go to {}", run.id, url);
            return Err(AppError::BuildFailed { build_id: run.id, url });
        }

        let artifacts = self.pipelines.list_artifacts(org, project, run.id)?;
        if artifacts.is_empty() {
            return Err(AppError::MissingArtifacts { build_id: run.id, url });
        }
        info!("Build {} completed with {} artifact(s)", run.id, artifacts.len());
        Ok(artifacts)
    }
}
