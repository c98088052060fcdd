use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::domain::{AppError, ExtensionRef};

/// Knobs of the provisioning workflow.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WorkflowSettings {
    /// Agent pool used for builds.
    #[serde(default = "default_build_pool")]
    pub build_pool: String,
    /// Agent pool used for releases.
    #[serde(default = "default_release_pool")]
    pub release_pool: String,
    /// Artifact the build publishes and the release consumes.
    #[serde(default = "default_artifact_name")]
    pub artifact_name: String,
    /// Pipeline definition file, relative to the working directory.
    #[serde(default = "default_pipeline_file")]
    pub pipeline_file: PathBuf,
    /// Sleep between build status polls.
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
    /// Upper bound on name prompts per resource; unset means the operator decides.
    #[serde(default)]
    pub max_name_attempts: Option<u32>,
    /// Marketplace extensions installed before the release is defined.
    #[serde(default = "default_extensions")]
    pub extensions: Vec<ExtensionRef>,
}

impl Default for WorkflowSettings {
    fn default() -> Self {
        Self {
            build_pool: default_build_pool(),
            release_pool: default_release_pool(),
            artifact_name: default_artifact_name(),
            pipeline_file: default_pipeline_file(),
            poll_interval_ms: default_poll_interval_ms(),
            max_name_attempts: None,
            extensions: default_extensions(),
        }
    }
}

impl WorkflowSettings {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.build_pool.trim().is_empty() {
            return Err(AppError::config_error("workflow.build_pool must not be empty"));
        }
        if self.release_pool.trim().is_empty() {
            return Err(AppError::config_error("workflow.release_pool must not be empty"));
        }
        if self.artifact_name.trim().is_empty() {
            return Err(AppError::config_error("workflow.artifact_name must not be empty"));
        }
        if self.pipeline_file.as_os_str().is_empty() {
            return Err(AppError::config_error("workflow.pipeline_file must not be empty"));
        }
        if self.max_name_attempts == Some(0) {
            return Err(AppError::config_error(
                "workflow.max_name_attempts must be greater than 0",
            ));
        }
        Ok(())
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    pub fn attempt_limit(&self) -> AttemptLimit {
        match self.max_name_attempts {
            Some(limit) => AttemptLimit::AtMost(limit),
            None => AttemptLimit::OperatorControlled,
        }
    }
}

/// Bound on interactive name retry loops.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttemptLimit {
    /// Keep prompting until the operator aborts.
    OperatorControlled,
    AtMost(u32),
}

impl AttemptLimit {
    pub fn allows(self, attempts_made: u32) -> bool {
        match self {
            AttemptLimit::OperatorControlled => true,
            AttemptLimit::AtMost(limit) => attempts_made < limit,
        }
    }
}

fn default_build_pool() -> String {
    "Default".to_string()
}

fn default_release_pool() -> String {
    "Hosted VS2017".to_string()
}

fn default_artifact_name() -> String {
    "drop".to_string()
}

fn default_pipeline_file() -> PathBuf {
    PathBuf::from("azure-pipelines.yml")
}

fn default_poll_interval_ms() -> u64 {
    1500
}

fn default_extensions() -> Vec<ExtensionRef> {
    vec![
        ExtensionRef::new("hboelman", "AzureAppServiceSetAppSettings"),
        ExtensionRef::new("pascalnaber", "PascalNaber-Xpirit-CreateSasToken"),
    ]
}
