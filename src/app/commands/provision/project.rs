use tracing::{info, warn};

use super::ProvisioningWorkflow;
use super::naming::require_single;
use super::state::ResolvedOrganization;
use crate::domain::AppError;

impl ProvisioningWorkflow<'_> {
    /// A new organization always gets a new project.
    pub(super) fn resolve_project(
        &self,
        organization: &ResolvedOrganization,
        name: Option<&str>,
    ) -> Result<String, AppError> {
        let org = organization.name.as_str();
        if organization.created {
            return self.create_project(org, name.map(str::to_string));
        }

        if let Some(name) = name {
            let projects = self.pipelines.list_projects(org)?;
            let list_command = format!("funcpipe project list --organization {org}");
            let found = require_single("project", name, &list_command, &projects, |p| &p.name)?;
            return Ok(found.name);
        }

        if self.confirm("Use an existing project?")? {
            let projects = self.pipelines.list_projects(org)?;
            if !projects.is_empty() {
                let names = projects.into_iter().map(|p| p.name).collect();
                return self.choose_name("Choose a project", names);
            }
            warn!("Organization '{}' has no projects; a new one will be created", org);
        }

        self.create_project(org, None)
    }

    fn create_project(
        &self,
        organization: &str,
        first: Option<String>,
    ) -> Result<String, AppError> {
        let prompt = "Enter a name for the new project";
        let project = self.create_named("project", prompt, first, |name| {
            self.pipelines.create_project(organization, name)
        })?;
        let link = self.links.project(organization, &project.name);
        info!("Created project '{}': {}", project.name, link);
        Ok(project.name)
    }
}
