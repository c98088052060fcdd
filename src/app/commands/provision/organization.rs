use tracing::{error, info};

use super::ProvisioningWorkflow;
use super::naming::require_single;
use super::state::ResolvedOrganization;
use crate::domain::AppError;

const LIST_ORGANIZATIONS: &str = "funcpipe organization list";

impl ProvisioningWorkflow<'_> {
    pub(super) fn resolve_organization(
        &self,
        name: Option<&str>,
    ) -> Result<ResolvedOrganization, AppError> {
        if let Some(name) = name {
            let organizations = self.pipelines.list_organizations()?;
            let found =
                require_single("organization", name, LIST_ORGANIZATIONS, &organizations, |o| {
                    &o.name
                })?;
            return Ok(ResolvedOrganization { name: found.name, created: false });
        }

        if self.confirm("Use an existing organization?")? {
            let organizations = self.pipelines.list_organizations()?;
            if !organizations.is_empty() {
                let name = self.choose_name(
                    "Choose an organization",
                    organizations.into_iter().map(|o| o.name).collect(),
                )?;
                return Ok(ResolvedOrganization { name, created: false });
            }
            error!("No existing organizations found; a new one will be created");
        }

        let name = self.create_organization()?;
        Ok(ResolvedOrganization { name, created: true })
    }

    fn create_organization(&self) -> Result<String, AppError> {
        let mut regions = self.pipelines.list_regions()?;
        if regions.is_empty() {
            return Err(AppError::NothingToChoose("regions".into()));
        }
        regions.sort_by(|a, b| a.display_name.cmp(&b.display_name));
        let labels: Vec<String> = regions.iter().map(|r| r.display_name.clone()).collect();
        let index = self.prompt.choose("Choose a region", &labels)?.ok_or(AppError::Aborted)?;
        let region = regions
            .get(index)
            .ok_or_else(|| AppError::Prompt(format!("No region at index {index}")))?;

        let prompt = "Enter a name for the new organization";
        let organization = self.create_named("organization", prompt, None, |name| {
            self.pipelines.create_organization(name, &region.code)
        })?;
        info!(
            "Created organization '{}' in {}: {}",
            organization.name,
            region.display_name,
            self.links.organization(&organization.name)
        );
        Ok(organization.name)
    }
}
