//! Configuration models loaded from `.funcpipe.toml`.

pub mod parse;
mod services;
mod workflow;

pub use parse::parse_config_content;
pub use services::{AzureConfig, DevOpsConfig};
pub use workflow::{AttemptLimit, WorkflowSettings};

use serde::{Deserialize, Serialize};

use crate::domain::AppError;

pub const CONFIG_FILE: &str = ".funcpipe.toml";

/// Root configuration document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FuncpipeConfig {
    #[serde(default)]
    pub workflow: WorkflowSettings,
    #[serde(default)]
    pub devops: DevOpsConfig,
    #[serde(default)]
    pub azure: AzureConfig,
}

impl FuncpipeConfig {
    pub fn validate(&self) -> Result<(), AppError> {
        self.workflow.validate()?;
        self.devops.validate()?;
        self.azure.validate()?;
        Ok(())
    }
}
