use crate::domain::names::default_repository_name;
use crate::domain::{PipelineFileSpec, RepositorySource, ResourceNames, TargetApplication};

/// Organization resolved by the organization stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedOrganization {
    pub name: String,
    pub created: bool,
}

/// GitHub repository bound through a service connection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GithubBinding {
    pub full_name: String,
    pub connection_id: String,
}

/// Mutable context threaded through the stages of one run.
///
/// Derived names are never stored; see [`ProvisioningState::names`].
#[derive(Debug, Clone)]
pub struct ProvisioningState {
    pub application: TargetApplication,
    pub organization: String,
    pub project: String,
    pub repository: String,
    pub created_organization: bool,
    pub github: Option<GithubBinding>,
    /// Local branch that is pushed and built.
    pub branch: String,
}

impl ProvisioningState {
    pub(super) fn new(
        application: TargetApplication,
        organization: ResolvedOrganization,
        project: String,
        branch: String,
    ) -> Self {
        Self {
            application,
            repository: default_repository_name(&project),
            organization: organization.name,
            created_organization: organization.created,
            project,
            github: None,
            branch,
        }
    }

    pub fn names(&self) -> ResourceNames {
        ResourceNames::derive(&self.organization, &self.project, &self.repository)
    }

    pub fn repository_source(&self) -> RepositorySource {
        match &self.github {
            Some(binding) => RepositorySource::GitHub {
                full_name: binding.full_name.clone(),
                connection_id: binding.connection_id.clone(),
            },
            None => RepositorySource::AzureRepos { name: self.repository.clone() },
        }
    }

    pub fn pipeline_spec(&self, artifact_name: &str) -> PipelineFileSpec {
        PipelineFileSpec::for_application(
            &self.application,
            &self.names().service_endpoint,
            artifact_name,
            &self.branch,
        )
    }
}
