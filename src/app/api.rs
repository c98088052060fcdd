//! API Facade for the application.
//!
//! Glues configuration loading, adapter construction and command execution.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::adapters::devops_client::HttpPipelineClient;
use crate::adapters::dialoguer_prompt::DialoguerPrompt;
use crate::adapters::function_app_http::HttpFunctionAppCatalog;
use crate::adapters::git_repository::Git2LocalRepository;
use crate::adapters::pipeline_file_filesystem::FilesystemPipelineFileStore;
use crate::app::commands::{list, provision};
use crate::app::config::load_config;
use crate::app::AppContext;
use crate::domain::{FuncpipeConfig, Organization, Project, Region};

pub use crate::app::commands::provision::{ProvisionOutcome, ProvisionRequest};
pub use crate::domain::AppError;

type LiveContext = AppContext<
    HttpPipelineClient,
    HttpFunctionAppCatalog,
    Git2LocalRepository,
    DialoguerPrompt,
    FilesystemPipelineFileStore,
>;

/// Create an `AppContext` wired to live services for a working directory.
fn create_context(root: PathBuf, config: FuncpipeConfig) -> Result<LiveContext, AppError> {
    let pipelines = HttpPipelineClient::from_env_with_config(&config.devops, &config.azure)?;
    let apps = HttpFunctionAppCatalog::from_env_with_config(&config.azure)?;
    let local = Git2LocalRepository::new(root.clone());
    let pipeline_file = FilesystemPipelineFileStore::new(root.join(&config.workflow.pipeline_file));
    debug!(root = %root.display(), "Created live context");
    Ok(AppContext::new(pipelines, apps, local, DialoguerPrompt::new(), pipeline_file, config))
}

fn pipeline_client(
    root: &Path,
    config_path: Option<&Path>,
) -> Result<HttpPipelineClient, AppError> {
    let config = load_config(root, config_path)?;
    HttpPipelineClient::from_env_with_config(&config.devops, &config.azure)
}

/// Provision the pipeline for the repository in the current directory.
pub fn provision(
    request: &ProvisionRequest,
    config_path: Option<&Path>,
) -> Result<ProvisionOutcome, AppError> {
    provision_at(std::env::current_dir()?, request, config_path)
}

/// Provision the pipeline for the repository at the specified path.
pub fn provision_at(
    root: impl Into<PathBuf>,
    request: &ProvisionRequest,
    config_path: Option<&Path>,
) -> Result<ProvisionOutcome, AppError> {
    let root = root.into();
    let config = load_config(&root, config_path)?;
    let ctx = create_context(root, config)?;
    provision::execute(&ctx, request)
}

/// List organizations visible to the authenticated user.
pub fn list_organizations(config_path: Option<&Path>) -> Result<Vec<Organization>, AppError> {
    let client = pipeline_client(&std::env::current_dir()?, config_path)?;
    list::organizations(&client)
}

/// List regions an organization can be created in.
pub fn list_regions(config_path: Option<&Path>) -> Result<Vec<Region>, AppError> {
    let client = pipeline_client(&std::env::current_dir()?, config_path)?;
    list::regions(&client)
}

/// List projects of one organization.
pub fn list_projects(
    organization: &str,
    config_path: Option<&Path>,
) -> Result<Vec<Project>, AppError> {
    let client = pipeline_client(&std::env::current_dir()?, config_path)?;
    list::projects(&client, organization)
}
