//! Pure parse/validate for `.funcpipe.toml`.

use crate::domain::AppError;
use crate::domain::config::FuncpipeConfig;

/// Parse and validate configuration from TOML content.
pub fn parse_config_content(content: &str) -> Result<FuncpipeConfig, AppError> {
    let config: FuncpipeConfig = toml::from_str(content)?;
    config.validate()?;
    Ok(config)
}
