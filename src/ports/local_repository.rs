use crate::domain::AppError;

/// Metadata directory whose presence marks a local repository.
pub const GIT_METADATA_DIR: &str = ".git";

/// Local version-control state of the working directory.
pub trait LocalRepository {
    /// Whether the working directory holds repository metadata.
    fn has_repository(&self) -> bool;

    /// Push (or fetch) URL of `origin`, if configured.
    fn origin_url(&self) -> Result<Option<String>, AppError>;

    /// Irreversibly delete the repository metadata directory.
    fn remove_metadata(&self) -> Result<(), AppError>;

    /// Branch that pushes publish: the checked-out branch of an existing
    /// repository, otherwise the branch a fresh repository would start on.
    fn branch(&self) -> Result<String, AppError>;

    /// Wire the working directory to `remote_url` as `origin` and push.
    ///
    /// Initializes the repository on `branch` and records an initial commit
    /// when needed.
    fn publish(&self, remote_url: &str, branch: &str) -> Result<(), AppError>;

    /// Add an extra remote. Fails with `RemoteConflict` if `name` exists.
    fn attach_remote(&self, name: &str, url: &str) -> Result<(), AppError>;

    /// Push the current branch to `remote`.
    fn push(&self, remote: &str) -> Result<(), AppError>;
}
