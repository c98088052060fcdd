//! Reconciliation between the local working copy and the remote repository.

use tracing::{error, info, warn};

use super::state::GithubBinding;
use super::{ProvisioningState, ProvisioningWorkflow};
use crate::domain::{
    AppError, Creation, RemoteProvider, Repository, RepositoryCoordinates, classify_remote,
};
use crate::ports::GIT_METADATA_DIR;

pub(super) const ADDITIONAL_REMOTE: &str = "devops";

const MENU_REMOVE_METADATA: &str = "Remove the local repository metadata and start over";
const MENU_ATTACH_REMOTE: &str = "Add the pipeline repository as an additional remote";

#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) enum RepositoryState {
    NoLocalRepository,
    LocalUnlinked,
    LocalGitHub { full_name: String },
    LocalSameRemote(RepositoryCoordinates),
    LocalDifferentRemote(RepositoryCoordinates),
    LocalUnsupported,
    RemoteSetupMenu,
    Done,
}

impl ProvisioningWorkflow<'_> {
    pub(super) fn reconcile_repository(
        &self,
        state: &mut ProvisioningState,
    ) -> Result<(), AppError> {
        let mut current = if self.local.has_repository() {
            RepositoryState::LocalUnlinked
        } else {
            RepositoryState::NoLocalRepository
        };

        while current != RepositoryState::Done {
            current = self.step_repository(state, current)?;
        }
        Ok(())
    }

    pub(super) fn step_repository(
        &self,
        state: &mut ProvisioningState,
        current: RepositoryState,
    ) -> Result<RepositoryState, AppError> {
        match current {
            RepositoryState::NoLocalRepository => {
                let repository = self.ensure_empty_remote(state)?;
                self.local.publish(&repository.remote_url, &state.branch)?;
                info!("Pushed branch '{}' to {}", state.branch, repository.remote_url);
                Ok(RepositoryState::Done)
            }
            RepositoryState::LocalUnlinked => {
                warn!("The current directory already contains a git repository");
                if self.confirm("Use the existing local repository?")? {
                    self.classify_local(state)
                } else {
                    self.remove_local_metadata()?;
                    Ok(RepositoryState::NoLocalRepository)
                }
            }
            RepositoryState::LocalGitHub { full_name } => self.connect_github(state, full_name),
            RepositoryState::LocalSameRemote(coords) => {
                info!("Local repository already points at '{}'", coords.repository);
                state.repository = coords.repository;
                Ok(RepositoryState::Done)
            }
            RepositoryState::LocalDifferentRemote(coords) => {
                let question = format!(
                    "The local repository belongs to {}/{}. \
                     Switch to that organization and project?",
                    coords.organization, coords.project
                );
                if self.confirm(&question)? {
                    info!(
                        "Switching to organization '{}', project '{}'",
                        coords.organization, coords.project
                    );
                    state.organization = coords.organization;
                    state.project = coords.project;
                    state.repository = coords.repository;
                    Ok(RepositoryState::Done)
                } else {
                    Ok(RepositoryState::RemoteSetupMenu)
                }
            }
            RepositoryState::LocalUnsupported => {
                error!("The local repository's remote provider is not supported");
                Ok(RepositoryState::RemoteSetupMenu)
            }
            RepositoryState::RemoteSetupMenu => self.remote_setup_menu(state),
            RepositoryState::Done => Ok(RepositoryState::Done),
        }
    }

    fn classify_local(&self, state: &ProvisioningState) -> Result<RepositoryState, AppError> {
        let Some(url) = self.local.origin_url()? else {
            warn!("The local repository has no origin remote");
            return Ok(RepositoryState::RemoteSetupMenu);
        };

        let devops_host = self.links.host();
        Ok(match classify_remote(&url, devops_host.as_deref()) {
            RemoteProvider::GitHub(Some(full_name)) => RepositoryState::LocalGitHub { full_name },
            RemoteProvider::AzureRepos(Some(coords)) => {
                if coords.organization.eq_ignore_ascii_case(&state.organization)
                    && coords.project.eq_ignore_ascii_case(&state.project)
                {
                    RepositoryState::LocalSameRemote(coords)
                } else {
                    RepositoryState::LocalDifferentRemote(coords)
                }
            }
            RemoteProvider::GitHub(None)
            | RemoteProvider::AzureRepos(None)
            | RemoteProvider::Unsupported => RepositoryState::LocalUnsupported,
        })
    }

    fn connect_github(
        &self,
        state: &mut ProvisioningState,
        full_name: String,
    ) -> Result<RepositoryState, AppError> {
        let connection =
            self.pipelines.create_github_connection(&state.organization, &state.project)?;
        println!("Authorize the GitHub connection: {}", connection.authorization_url);

        let mut authorized = self.confirm("Did you finish the GitHub login?")?;
        if !authorized {
            println!(
                "Authorize manually under project settings > service connections: {}",
                connection.authorization_url
            );
            authorized = self.confirm("Did you finish the manual authorization?")?;
        }
        if !authorized {
            error!("GitHub authorization was not completed");
            return Ok(RepositoryState::RemoteSetupMenu);
        }

        state.repository = full_name.rsplit('/').next().unwrap_or(&full_name).to_string();
        state.github = Some(GithubBinding { full_name, connection_id: connection.id });
        Ok(RepositoryState::Done)
    }

    fn remote_setup_menu(
        &self,
        state: &mut ProvisioningState,
    ) -> Result<RepositoryState, AppError> {
        let options = vec![MENU_REMOVE_METADATA.to_string(), MENU_ATTACH_REMOTE.to_string()];
        let choice = self
            .prompt
            .choose("How should the local repository be set up?", &options)?
            .ok_or(AppError::Aborted)?;

        if choice == 0 {
            self.remove_local_metadata()?;
            return Ok(RepositoryState::NoLocalRepository);
        }

        let repository = self.ensure_empty_remote(state)?;
        self.local.attach_remote(ADDITIONAL_REMOTE, &repository.remote_url)?;
        self.local.push(ADDITIONAL_REMOTE)?;
        info!("Pushed to remote '{}' at {}", ADDITIONAL_REMOTE, repository.remote_url);
        Ok(RepositoryState::Done)
    }

    fn remove_local_metadata(&self) -> Result<(), AppError> {
        let question = format!("Permanently delete the local {} directory?", GIT_METADATA_DIR);
        if !self.confirm(&question)? {
            return Err(AppError::DestructiveActionRefused { path: GIT_METADATA_DIR.to_string() });
        }
        self.local.remove_metadata()?;
        warn!("Removed local {} directory", GIT_METADATA_DIR);
        Ok(())
    }

    /// Resolve an empty remote repository, creating one under a fresh name
    /// when the current one already has history.
    fn ensure_empty_remote(&self, state: &mut ProvisioningState) -> Result<Repository, AppError> {
        let (org, project) = (state.organization.clone(), state.project.clone());
        let existing = self
            .pipelines
            .list_repositories(&org, &project)?
            .into_iter()
            .find(|repo| repo.name == state.repository);

        let repository = match existing {
            None => {
                let proposed = Some(state.repository.clone());
                self.create_named("repository", "Enter a repository name", proposed, |name| {
                    self.pipelines.create_repository(&org, &project, name)
                })?
            }
            Some(repo) if self.pipelines.list_commits(&org, &project, &repo.name)?.is_empty() => {
                repo
            }
            Some(repo) => {
                warn!(
                    "Repository '{}' already has commits; a new empty repository is required",
                    repo.name
                );
                let prompt = "Enter a name for the new repository";
                self.create_named("repository", prompt, None, |name| {
                    let taken = self
                        .pipelines
                        .list_repositories(&org, &project)?
                        .iter()
                        .any(|other| other.name.eq_ignore_ascii_case(name));
                    if taken {
                        let message = format!("Repository '{name}' already exists");
                        return Ok(Creation::Invalid(message));
                    }
                    self.pipelines.create_repository(&org, &project, name)
                })?
            }
        };

        state.repository = repository.name.clone();
        Ok(repository)
    }
}
