//! Remote pipeline-service entities as seen by the provisioning workflow.

use crate::domain::HostingKind;

/// Outcome of a remote create call.
///
/// `Invalid` carries the service's human-readable reason (name taken,
/// bad characters, unknown region) so the caller can re-prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Creation<T> {
    Created(T),
    Invalid(String),
}

impl<T> Creation<T> {
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Creation<U> {
        match self {
            Creation::Created(value) => Creation::Created(f(value)),
            Creation::Invalid(message) => Creation::Invalid(message),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Organization {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Region {
    pub display_name: String,
    pub code: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Project {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Repository {
    pub id: String,
    pub name: String,
    pub remote_url: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Commit {
    pub id: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceEndpoint {
    pub id: String,
    pub name: String,
}

/// Marketplace extension required by the release pipeline.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExtensionRef {
    pub publisher: String,
    pub name: String,
}

impl ExtensionRef {
    pub fn new(publisher: impl Into<String>, name: impl Into<String>) -> Self {
        Self { publisher: publisher.into(), name: name.into() }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildDefinition {
    pub id: u64,
    pub name: String,
}

/// Where a build definition pulls its sources from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepositorySource {
    /// Azure Repos git repository in the same project.
    AzureRepos { name: String },
    /// GitHub repository reached through a service connection.
    GitHub { full_name: String, connection_id: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildDefinitionRequest {
    pub organization: String,
    pub project: String,
    pub name: String,
    pub source: RepositorySource,
    pub pool: String,
    pub pipeline_file: String,
    /// Branch the definition builds by default and triggers on.
    pub branch: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildStatus {
    NotStarted,
    InProgress,
    Cancelling,
    Postponed,
    Completed,
}

impl BuildStatus {
    pub fn from_api(value: &str) -> Self {
        match value {
            "completed" => BuildStatus::Completed,
            "inProgress" => BuildStatus::InProgress,
            "cancelling" => BuildStatus::Cancelling,
            "postponed" => BuildStatus::Postponed,
            _ => BuildStatus::NotStarted,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildResult {
    Succeeded,
    PartiallySucceeded,
    Failed,
    Canceled,
}

impl BuildResult {
    pub fn from_api(value: &str) -> Option<Self> {
        match value {
            "succeeded" => Some(BuildResult::Succeeded),
            "partiallySucceeded" => Some(BuildResult::PartiallySucceeded),
            "failed" => Some(BuildResult::Failed),
            "canceled" => Some(BuildResult::Canceled),
            _ => None,
        }
    }

    pub fn is_failure(self) -> bool {
        matches!(self, BuildResult::Failed | BuildResult::Canceled)
    }
}

/// One triggered execution of a build definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildRun {
    pub id: u64,
    pub status: BuildStatus,
    pub result: Option<BuildResult>,
}

impl BuildRun {
    pub fn is_completed(&self) -> bool {
        self.status == BuildStatus::Completed
    }

    pub fn has_failed(&self) -> bool {
        self.result.is_some_and(BuildResult::is_failure)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseDefinition {
    pub id: u64,
    pub name: String,
}

/// Everything a release definition binds together.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseDefinitionRequest {
    pub organization: String,
    pub project: String,
    pub name: String,
    pub build_definition: BuildDefinition,
    pub artifact_name: String,
    pub pool: String,
    pub service_endpoint: String,
    /// Id of the endpoint the deploy task connects through.
    pub service_endpoint_id: String,
    pub app_name: String,
    pub resource_group: String,
    pub hosting_kind: HostingKind,
    pub storage_account: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Release {
    pub id: u64,
    pub name: String,
}

/// OAuth connection to GitHub awaiting operator authorization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GithubConnection {
    pub id: String,
    pub authorization_url: String,
}
