//! Pipeline service port definition.

use crate::domain::{
    AppError, Artifact, BuildDefinition, BuildDefinitionRequest, BuildRun, Commit, Creation,
    ExtensionRef, GithubConnection, Organization, Project, Region, Release, ReleaseDefinition,
    ReleaseDefinitionRequest, Repository, ServiceEndpoint,
};

/// Name-keyed list/create access to the remote pipeline-orchestration service.
///
/// Every call is a single blocking request/response. Create calls that the
/// service can reject for naming reasons return `Creation::Invalid`.
pub trait PipelineService {
    fn list_organizations(&self) -> Result<Vec<Organization>, AppError>;

    fn list_regions(&self) -> Result<Vec<Region>, AppError>;

    fn create_organization(
        &self,
        name: &str,
        region_code: &str,
    ) -> Result<Creation<Organization>, AppError>;

    fn list_projects(&self, organization: &str) -> Result<Vec<Project>, AppError>;

    fn create_project(&self, organization: &str, name: &str)
    -> Result<Creation<Project>, AppError>;

    fn list_repositories(&self, organization: &str, project: &str)
    -> Result<Vec<Repository>, AppError>;

    fn create_repository(
        &self,
        organization: &str,
        project: &str,
        name: &str,
    ) -> Result<Creation<Repository>, AppError>;

    fn list_commits(
        &self,
        organization: &str,
        project: &str,
        repository: &str,
    ) -> Result<Vec<Commit>, AppError>;

    fn list_service_endpoints(
        &self,
        organization: &str,
        project: &str,
    ) -> Result<Vec<ServiceEndpoint>, AppError>;

    fn create_service_endpoint(
        &self,
        organization: &str,
        project: &str,
        name: &str,
    ) -> Result<ServiceEndpoint, AppError>;

    /// Install a marketplace extension; already-installed is success.
    fn install_extension(&self, organization: &str, extension: &ExtensionRef)
    -> Result<(), AppError>;

    fn list_build_definitions(
        &self,
        organization: &str,
        project: &str,
    ) -> Result<Vec<BuildDefinition>, AppError>;

    fn create_build_definition(
        &self,
        request: &BuildDefinitionRequest,
    ) -> Result<BuildDefinition, AppError>;

    fn queue_build(
        &self,
        organization: &str,
        project: &str,
        definition: &BuildDefinition,
        pool: &str,
    ) -> Result<BuildRun, AppError>;

    fn get_build(&self, organization: &str, project: &str, build_id: u64)
    -> Result<BuildRun, AppError>;

    fn list_artifacts(
        &self,
        organization: &str,
        project: &str,
        build_id: u64,
    ) -> Result<Vec<Artifact>, AppError>;

    fn list_release_definitions(
        &self,
        organization: &str,
        project: &str,
    ) -> Result<Vec<ReleaseDefinition>, AppError>;

    fn create_release_definition(
        &self,
        request: &ReleaseDefinitionRequest,
    ) -> Result<ReleaseDefinition, AppError>;

    fn create_release(
        &self,
        organization: &str,
        project: &str,
        definition: &ReleaseDefinition,
    ) -> Result<Release, AppError>;

    /// Get or create the GitHub service connection `github-<project>`.
    fn create_github_connection(
        &self,
        organization: &str,
        project: &str,
    ) -> Result<GithubConnection, AppError>;
}
