use std::io;

use thiserror::Error;

/// Library-wide error type for funcpipe operations.
#[derive(Debug, Error)]
pub enum AppError {
    /// Underlying I/O failure.
    #[error(transparent)]
    Io(#[from] io::Error),

    /// Configuration file is present but invalid.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// Required environment variable is not set.
    #[error("Environment variable '{0}' is not set")]
    EnvironmentVariableMissing(String),

    /// An explicitly named resource matched zero or several remote entries.
    #[error(
        "Error finding {kind} '{name}' ({matches} matches). Please check that the {kind} exists using '{list_command}'"
    )]
    ResourceNotFound { kind: String, name: String, matches: usize, list_command: String },

    /// Nothing to choose from where a choice was required.
    #[error("No {0} available to choose from")]
    NothingToChoose(String),

    /// The configured name attempt limit was reached.
    #[error("Gave up creating {what} after {attempts} attempts")]
    AttemptsExhausted { what: String, attempts: u32 },

    /// The operator cancelled a prompt.
    #[error("Aborted by operator")]
    Aborted,

    /// Prompt rendering or terminal interaction failed.
    #[error("Prompt failed: {0}")]
    Prompt(String),

    /// The triggered build finished unsuccessfully.
    #[error("Build {build_id} failed. To view details go to {url}")]
    BuildFailed { build_id: u64, url: String },

    /// The build finished without publishing anything a release could consume.
    #[error("Build {build_id} completed without artifacts. To view details go to {url}")]
    MissingArtifacts { build_id: u64, url: String },

    /// A remote with the requested name is already configured locally.
    #[error("A git remote named '{remote}' already exists")]
    RemoteConflict { remote: String },

    /// The operator refused to delete local repository metadata.
    #[error("Refused to remove {path}; cannot continue without a clean repository")]
    DestructiveActionRefused { path: String },

    /// Pipeline service request failed.
    #[error("Azure DevOps API error: {message}")]
    DevOpsApi { message: String, status: Option<u16> },

    /// Resource manager request failed.
    #[error("Azure Resource Manager error: {message}")]
    AzureApi { message: String, status: Option<u16> },

    /// Git execution failed.
    #[error("Git error running '{command}': {details}")]
    GitError { command: String, details: String },

    /// Pipeline file template failed to render.
    #[error("Pipeline template error: {0}")]
    PipelineTemplate(String),
}

impl AppError {
    pub fn config_error<S: Into<String>>(message: S) -> Self {
        AppError::InvalidConfig(message.into())
    }

    pub(crate) fn git(command: impl Into<String>, details: impl ToString) -> Self {
        AppError::GitError { command: command.into(), details: details.to_string() }
    }

    /// Process exit code for this error.
    ///
    /// Every unrecoverable path terminates with 1.
    pub fn exit_code(&self) -> i32 {
        1
    }
}
