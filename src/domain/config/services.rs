use serde::{Deserialize, Serialize};
use url::Url;

use crate::domain::AppError;

/// Azure DevOps service hosts.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DevOpsConfig {
    /// Core REST API and web UI (`https://dev.azure.com`).
    #[serde(default = "default_api_url")]
    pub api_url: Url,
    /// Release management API.
    #[serde(default = "default_release_url")]
    pub release_url: Url,
    /// Profile and account listing API.
    #[serde(default = "default_profile_url")]
    pub profile_url: Url,
    /// Region listing, name availability and organization creation.
    #[serde(default = "default_host_acquisition_url")]
    pub host_acquisition_url: Url,
    /// Extension management API.
    #[serde(default = "default_extension_url")]
    pub extension_url: Url,
    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl Default for DevOpsConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            release_url: default_release_url(),
            profile_url: default_profile_url(),
            host_acquisition_url: default_host_acquisition_url(),
            extension_url: default_extension_url(),
            timeout_secs: default_timeout(),
        }
    }
}

impl DevOpsConfig {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.timeout_secs == 0 {
            return Err(AppError::config_error("devops.timeout_secs must be greater than 0"));
        }
        Ok(())
    }

    /// Point every host at one base URL. Used against local mock servers.
    pub fn single_host(url: Url) -> Self {
        Self {
            api_url: url.clone(),
            release_url: url.clone(),
            profile_url: url.clone(),
            host_acquisition_url: url.clone(),
            extension_url: url,
            timeout_secs: default_timeout(),
        }
    }
}

/// Azure Resource Manager access.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AzureConfig {
    #[serde(default = "default_management_url")]
    pub management_url: Url,
    /// Falls back to `AZURE_SUBSCRIPTION_ID`.
    #[serde(default)]
    pub subscription_id: Option<String>,
    #[serde(default)]
    pub subscription_name: Option<String>,
    /// Falls back to `AZURE_TENANT_ID`.
    #[serde(default)]
    pub tenant_id: Option<String>,
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl Default for AzureConfig {
    fn default() -> Self {
        Self {
            management_url: default_management_url(),
            subscription_id: None,
            subscription_name: None,
            tenant_id: None,
            timeout_secs: default_timeout(),
        }
    }
}

impl AzureConfig {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.timeout_secs == 0 {
            return Err(AppError::config_error("azure.timeout_secs must be greater than 0"));
        }
        if self.subscription_id.as_deref().is_some_and(|id| id.trim().is_empty()) {
            return Err(AppError::config_error("azure.subscription_id must not be empty"));
        }
        Ok(())
    }
}

fn parse_default(url: &str) -> Url {
    Url::parse(url).expect("Default service URL must be valid")
}

fn default_api_url() -> Url {
    parse_default("https://dev.azure.com")
}

fn default_release_url() -> Url {
    parse_default("https://vsrm.dev.azure.com")
}

fn default_profile_url() -> Url {
    parse_default("https://app.vssps.visualstudio.com")
}

fn default_host_acquisition_url() -> Url {
    parse_default("https://aex.dev.azure.com")
}

fn default_extension_url() -> Url {
    parse_default("https://extmgmt.dev.azure.com")
}

fn default_management_url() -> Url {
    parse_default("https://management.azure.com")
}

fn default_timeout() -> u64 {
    30
}
