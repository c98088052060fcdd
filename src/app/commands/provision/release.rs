use tracing::{info, warn};

use super::naming::Matches;
use super::{ProvisioningState, ProvisioningWorkflow};
use crate::domain::{
    AppError, BuildDefinition, Release, ReleaseDefinition, ReleaseDefinitionRequest,
    ServiceEndpoint,
};

impl ProvisioningWorkflow<'_> {
    pub(super) fn create_release(
        &self,
        state: &ProvisioningState,
        build_definition: &BuildDefinition,
        endpoint: &ServiceEndpoint,
    ) -> Result<Release, AppError> {
        let (org, project) = (state.organization.as_str(), state.project.as_str());
        let name = state.names().release_definition;
        let mut matching: Vec<ReleaseDefinition> = self
            .pipelines
            .list_release_definitions(org, project)?
            .into_iter()
            .filter(|definition| definition.name == name)
            .collect();

        let definition = match Matches::count(matching.len()) {
            Matches::One => {
                info!("Using existing release definition '{}'", name);
                matching.remove(0)
            }
            counted => {
                if let Matches::Many(count) = counted {
                    warn!(
                        "Found {} release definitions named '{}'; creating a new one",
                        count, name
                    );
                }
                let application = &state.application;
                let request = ReleaseDefinitionRequest {
                    organization: org.to_string(),
                    project: project.to_string(),
                    name: name.clone(),
                    build_definition: build_definition.clone(),
                    artifact_name: self.settings.artifact_name.clone(),
                    pool: self.settings.release_pool.clone(),
                    service_endpoint: endpoint.name.clone(),
                    service_endpoint_id: endpoint.id.clone(),
                    app_name: application.name.clone(),
                    resource_group: application.resource_group.clone(),
                    hosting_kind: application.hosting_kind,
                    storage_account: application.storage_name().to_string(),
                };
                let created = self.pipelines.create_release_definition(&request)?;
                info!("Created release definition '{}'", created.name);
                created
            }
        };

        let release = self.pipelines.create_release(org, project, &definition)?;
        let link = self.links.release(org, project, release.id);
        info!("Created release '{}': {}", release.name, link);
        Ok(release)
    }
}
