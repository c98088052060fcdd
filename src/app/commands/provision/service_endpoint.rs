use tracing::{info, warn};

use super::naming::Matches;
use super::{ProvisioningState, ProvisioningWorkflow};
use crate::domain::{AppError, ServiceEndpoint};

impl ProvisioningWorkflow<'_> {
    /// Reuse the endpoint only when exactly one carries the derived name.
    pub(super) fn ensure_service_endpoint(
        &self,
        state: &ProvisioningState,
    ) -> Result<ServiceEndpoint, AppError> {
        let name = state.names().service_endpoint;
        let mut matching: Vec<ServiceEndpoint> = self
            .pipelines
            .list_service_endpoints(&state.organization, &state.project)?
            .into_iter()
            .filter(|endpoint| endpoint.name == name)
            .collect();

        match Matches::count(matching.len()) {
            Matches::One => {
                info!("Using existing service endpoint '{}'", name);
                Ok(matching.remove(0))
            }
            counted => {
                if let Matches::Many(count) = counted {
                    warn!(
                        "Found {} service endpoints named '{}'; creating a new one",
                        count, name
                    );
                }
                let (org, project) = (state.organization.as_str(), state.project.as_str());
                let endpoint = self.pipelines.create_service_endpoint(org, project, &name)?;
                info!("Created service endpoint '{}'", endpoint.name);
                Ok(endpoint)
            }
        }
    }

    pub(super) fn install_extensions(&self, state: &ProvisioningState) -> Result<(), AppError> {
        for extension in &self.settings.extensions {
            self.pipelines.install_extension(&state.organization, extension)?;
            info!("Installed extension {}.{}", extension.publisher, extension.name);
        }
        Ok(())
    }
}
