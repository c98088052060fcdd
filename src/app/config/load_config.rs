//! Configuration loading from the working directory.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::domain::config::{CONFIG_FILE, parse_config_content};
use crate::domain::{AppError, FuncpipeConfig};

const SUBSCRIPTION_ID_ENV: &str = "AZURE_SUBSCRIPTION_ID";
const TENANT_ID_ENV: &str = "AZURE_TENANT_ID";

/// Load `.funcpipe.toml` from `root`, or `explicit` when given.
///
/// A missing default file yields defaults; a missing explicit file is an
/// error. Unset Azure ids fall back to the environment.
pub fn load_config(root: &Path, explicit: Option<&Path>) -> Result<FuncpipeConfig, AppError> {
    let mut config = match explicit {
        Some(path) => {
            if !path.exists() {
                return Err(AppError::config_error(format!(
                    "Configuration file not found: {}",
                    path.display()
                )));
            }
            parse_config_content(&fs::read_to_string(path)?)?
        }
        None => {
            let path = root.join(CONFIG_FILE);
            if path.exists() {
                parse_config_content(&fs::read_to_string(&path)?)?
            } else {
                debug!("No {} found; using defaults", CONFIG_FILE);
                FuncpipeConfig::default()
            }
        }
    };

    apply_environment(&mut config, |key| std::env::var(key).ok());
    config.validate()?;
    Ok(config)
}

fn apply_environment(config: &mut FuncpipeConfig, lookup: impl Fn(&str) -> Option<String>) {
    let non_empty = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
    if config.azure.subscription_id.is_none() {
        config.azure.subscription_id = non_empty(SUBSCRIPTION_ID_ENV);
    }
    if config.azure.tenant_id.is_none() {
        config.azure.tenant_id = non_empty(TENANT_ID_ENV);
    }
}
