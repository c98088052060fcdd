//! Azure DevOps REST client implementing the pipeline service port.

mod definitions;
mod dto;
mod service;


use std::time::Duration;

use reqwest::Method;
use reqwest::blocking::{Client, RequestBuilder};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, trace};
use url::Url;

use crate::domain::{AppError, AzureConfig, DevOpsConfig};

pub const PAT_ENV: &str = "AZURE_DEVOPS_PAT";

const API_VERSION: &str = "7.1";
const PREVIEW_API_VERSION: &str = "7.1-preview.1";
const DEFAULT_STATUS_MESSAGE: &str = "Azure DevOps request failed";

/// Outcome of one request that the caller may treat as a soft rejection.
enum Reply<T> {
    Success(T),
    Rejected { status: u16, message: String },
}

/// Blocking HTTP transport authenticated with a personal access token.
///
/// One request per call; no retries.
#[derive(Clone)]
pub struct HttpPipelineClient {
    token: String,
    config: DevOpsConfig,
    azure: AzureConfig,
    client: Client,
}

impl std::fmt::Debug for HttpPipelineClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpPipelineClient")
            .field("api_url", &self.config.api_url)
            .field("token", &"[REDACTED]")
            .finish()
    }
}

impl HttpPipelineClient {
    pub fn new(
        token: String,
        config: &DevOpsConfig,
        azure: &AzureConfig,
    ) -> Result<Self, AppError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| AppError::DevOpsApi {
                message: format!("Failed to create HTTP client: {}", e),
                status: None,
            })?;

        Ok(Self { token, config: config.clone(), azure: azure.clone(), client })
    }

    /// Create with the token from `AZURE_DEVOPS_PAT`.
    pub fn from_env_with_config(
        config: &DevOpsConfig,
        azure: &AzureConfig,
    ) -> Result<Self, AppError> {
        let token = std::env::var(PAT_ENV)
            .map_err(|_| AppError::EnvironmentVariableMissing(PAT_ENV.into()))?;

        Self::new(token, config, azure)
    }

    fn url(
        &self,
        base: &Url,
        segments: &[&str],
        api_version: &str,
        query: &[(&str, &str)],
    ) -> Result<Url, AppError> {
        let mut url = base.clone();
        url.path_segments_mut()
            .map_err(|_| {
                AppError::config_error(format!("'{}' cannot be used as a base URL", base))
            })?
            .pop_if_empty()
            .extend(segments);
        url.query_pairs_mut().extend_pairs(query).append_pair("api-version", api_version);
        Ok(url)
    }

    fn api(&self, segments: &[&str]) -> Result<Url, AppError> {
        self.url(&self.config.api_url, segments, API_VERSION, &[])
    }

    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        debug!(%method, %url, "Azure DevOps request");
        self.client.request(method, url).basic_auth("", Some(&self.token))
    }

    /// Send and classify: 2xx parsed, 4xx surfaced as `Rejected`, the rest fail.
    fn execute<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<Reply<T>, AppError> {
        let response = request.send().map_err(|e| AppError::DevOpsApi {
            message: format!("HTTP request failed: {}", e),
            status: None,
        })?;

        let status = response.status();
        let body_text = response.text().unwrap_or_default();
        trace!(status = status.as_u16(), body = %body_text, "Azure DevOps response");

        if status.is_success() {
            let body = if body_text.trim().is_empty() { "null" } else { body_text.as_str() };
            let parsed = serde_json::from_str(body).map_err(|e| AppError::DevOpsApi {
                message: format!("Failed to parse response: {}", e),
                status: Some(status.as_u16()),
            })?;
            return Ok(Reply::Success(parsed));
        }

        let message = extract_error_message(&body_text).unwrap_or_else(|| {
            if !body_text.trim().is_empty() {
                body_text.clone()
            } else if status.as_u16() == 401 {
                format!("Unauthorized; check {}", PAT_ENV)
            } else if status.is_server_error() {
                "Server error".to_string()
            } else {
                DEFAULT_STATUS_MESSAGE.to_string()
            }
        });

        if status.is_client_error() && status.as_u16() != 401 {
            return Ok(Reply::Rejected { status: status.as_u16(), message });
        }
        Err(AppError::DevOpsApi { message, status: Some(status.as_u16()) })
    }

    /// Like [`Self::execute`] but every non-2xx is an error.
    fn fetch<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, AppError> {
        match self.execute(request)? {
            Reply::Success(value) => Ok(value),
            Reply::Rejected { status, message } => {
                Err(AppError::DevOpsApi { message, status: Some(status) })
            }
        }
    }

    fn get<T: DeserializeOwned>(&self, url: Url) -> Result<T, AppError> {
        self.fetch(self.request(Method::GET, url))
    }

    fn post<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        url: Url,
        body: &B,
    ) -> Result<Reply<T>, AppError> {
        self.execute(self.request(Method::POST, url).json(body))
    }
}

fn extract_error_message(body: &str) -> Option<String> {
    if body.trim().is_empty() {
        return None;
    }

    let parsed = serde_json::from_str::<serde_json::Value>(body).ok()?;

    if let Some(msg) = parsed
        .get("error")
        .and_then(|error| error.get("message"))
        .and_then(|message| message.as_str())
    {
        return Some(msg.to_string());
    }

    parsed.get("message").and_then(|message| message.as_str()).map(ToOwned::to_owned)
}
