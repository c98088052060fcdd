pub mod application;
pub mod config;
pub mod error;
pub mod links;
pub mod names;
pub mod pipeline_file;
pub mod remote_url;
pub mod resources;

pub use application::{
    AppSetting, FunctionApp, HostingKind, RuntimeLanguage, TargetApplication,
    language_and_storage,
};
pub use config::{AttemptLimit, AzureConfig, DevOpsConfig, FuncpipeConfig, WorkflowSettings};
pub use error::AppError;
pub use links::WebLinks;
pub use names::ResourceNames;
pub use pipeline_file::PipelineFileSpec;
pub use remote_url::{RemoteProvider, RepositoryCoordinates, classify_remote};
pub use resources::{
    Artifact, BuildDefinition, BuildDefinitionRequest, BuildResult, BuildRun, BuildStatus,
    Commit, Creation, ExtensionRef, GithubConnection, Organization, Project, Region, Release,
    ReleaseDefinition, ReleaseDefinitionRequest, Repository, RepositorySource, ServiceEndpoint,
};
