//! Function app lookups against the Azure Resource Manager REST API.

use std::collections::BTreeMap;
use std::time::Duration;

use reqwest::Method;
use reqwest::blocking::Client;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::domain::{AppError, AppSetting, AzureConfig, FunctionApp};
use crate::ports::FunctionAppCatalog;

pub const ACCESS_TOKEN_ENV: &str = "AZURE_ACCESS_TOKEN";
const SUBSCRIPTION_ID_ENV: &str = "AZURE_SUBSCRIPTION_ID";
const ARM_API_VERSION: &str = "2022-03-01";
const FUNCTION_APP_KIND: &str = "functionapp";

#[derive(Clone)]
pub struct HttpFunctionAppCatalog {
    token: String,
    management_url: Url,
    subscription_id: String,
    client: Client,
}

impl std::fmt::Debug for HttpFunctionAppCatalog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpFunctionAppCatalog")
            .field("management_url", &self.management_url)
            .field("subscription_id", &self.subscription_id)
            .field("token", &"[REDACTED]")
            .finish()
    }
}

#[derive(Debug, Deserialize)]
struct SitePage {
    #[serde(default)]
    value: Vec<SiteDto>,
    #[serde(rename = "nextLink", default)]
    next_link: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SiteDto {
    #[serde(default)]
    id: String,
    name: String,
    #[serde(default)]
    kind: String,
    #[serde(default)]
    properties: SiteProperties,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SiteProperties {
    #[serde(default)]
    resource_group: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SettingsDto {
    #[serde(default)]
    properties: BTreeMap<String, String>,
}

impl HttpFunctionAppCatalog {
    pub fn new(token: String, config: &AzureConfig) -> Result<Self, AppError> {
        let subscription_id = config
            .subscription_id
            .clone()
            .ok_or_else(|| AppError::EnvironmentVariableMissing(SUBSCRIPTION_ID_ENV.into()))?;
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| AppError::AzureApi {
                message: format!("Failed to create HTTP client: {}", e),
                status: None,
            })?;

        Ok(Self { token, management_url: config.management_url.clone(), subscription_id, client })
    }

    /// Create with the bearer token from `AZURE_ACCESS_TOKEN`.
    pub fn from_env_with_config(config: &AzureConfig) -> Result<Self, AppError> {
        let token = std::env::var(ACCESS_TOKEN_ENV)
            .map_err(|_| AppError::EnvironmentVariableMissing(ACCESS_TOKEN_ENV.into()))?;
        Self::new(token, config)
    }

    fn site_url(&self, app: &FunctionApp, tail: &[&str]) -> Result<Url, AppError> {
        let mut segments = vec![
            "subscriptions",
            self.subscription_id.as_str(),
            "resourceGroups",
            app.resource_group.as_str(),
            "providers",
            "Microsoft.Web",
            "sites",
            app.name.as_str(),
        ];
        segments.extend_from_slice(tail);
        self.url(&segments)
    }

    fn url(&self, segments: &[&str]) -> Result<Url, AppError> {
        let mut url = self.management_url.clone();
        url.path_segments_mut()
            .map_err(|_| {
                AppError::config_error("azure.management_url cannot be used as a base URL")
            })?
            .pop_if_empty()
            .extend(segments);
        url.query_pairs_mut().append_pair("api-version", ARM_API_VERSION);
        Ok(url)
    }

    fn send<T: DeserializeOwned>(&self, method: Method, url: Url) -> Result<T, AppError> {
        debug!(%method, %url, "Resource manager request");
        let response = self
            .client
            .request(method, url)
            .bearer_auth(&self.token)
            .send()
            .map_err(|e| AppError::AzureApi {
                message: format!("HTTP request failed: {}", e),
                status: None,
            })?;

        let status = response.status();
        let body_text = response.text().unwrap_or_default();
        if !status.is_success() {
            let message = arm_error_message(&body_text).unwrap_or_else(|| {
                if body_text.trim().is_empty() { status.to_string() } else { body_text.clone() }
            });
            return Err(AppError::AzureApi { message, status: Some(status.as_u16()) });
        }

        serde_json::from_str(&body_text).map_err(|e| AppError::AzureApi {
            message: format!("Failed to parse response: {}", e),
            status: Some(status.as_u16()),
        })
    }
}

fn arm_error_message(body: &str) -> Option<String> {
    let parsed = serde_json::from_str::<serde_json::Value>(body).ok()?;
    parsed
        .get("error")
        .and_then(|error| error.get("message"))
        .and_then(|message| message.as_str())
        .map(ToOwned::to_owned)
}

/// `/subscriptions/<id>/resourceGroups/<rg>/providers/...` → `<rg>`.
fn resource_group_from_id(id: &str) -> Option<String> {
    let mut segments = id.split('/');
    segments.find(|segment| segment.eq_ignore_ascii_case("resourceGroups"))?;
    segments.next().filter(|rg| !rg.is_empty()).map(str::to_string)
}

impl FunctionAppCatalog for HttpFunctionAppCatalog {
    fn list_function_apps(&self) -> Result<Vec<FunctionApp>, AppError> {
        let mut apps = Vec::new();
        let mut next = Some(self.url(&[
            "subscriptions",
            self.subscription_id.as_str(),
            "providers",
            "Microsoft.Web",
            "sites",
        ])?);

        while let Some(url) = next.take() {
            let page: SitePage = self.send(Method::GET, url)?;
            for site in page.value {
                if !site.kind.to_ascii_lowercase().contains(FUNCTION_APP_KIND) {
                    continue;
                }
                let resource_group = site
                    .properties
                    .resource_group
                    .or_else(|| resource_group_from_id(&site.id))
                    .unwrap_or_default();
                apps.push(FunctionApp { name: site.name, resource_group });
            }
            next = match page.next_link {
                Some(link) => Some(Url::parse(&link).map_err(|e| AppError::AzureApi {
                    message: format!("Invalid nextLink '{}': {}", link, e),
                    status: None,
                })?),
                None => None,
            };
        }

        Ok(apps)
    }

    fn kind_tags(&self, app: &FunctionApp) -> Result<String, AppError> {
        let site: SiteDto = self.send(Method::GET, self.site_url(app, &[])?)?;
        Ok(site.kind)
    }

    fn app_settings(&self, app: &FunctionApp) -> Result<Vec<AppSetting>, AppError> {
        let settings: SettingsDto =
            self.send(Method::POST, self.site_url(app, &["config", "appsettings", "list"])?)?;
        Ok(settings
            .properties
            .into_iter()
            .map(|(name, value)| AppSetting::new(name, value))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;

    fn catalog(server: &mockito::Server) -> HttpFunctionAppCatalog {
        let config = AzureConfig {
            management_url: Url::parse(&server.url()).unwrap(),
            subscription_id: Some("sub-1".into()),
            ..AzureConfig::default()
        };
        HttpFunctionAppCatalog::new("token".into(), &config).unwrap()
    }

    fn func1() -> FunctionApp {
        FunctionApp { name: "func1".into(), resource_group: "rg1".into() }
    }

    #[test]
    fn lists_only_function_apps() {
        let mut server = mockito::Server::new();
        let _m = server
            .mock("GET", "/subscriptions/sub-1/providers/Microsoft.Web/sites")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(
                r#"{"value":[
                    {"id":"/subscriptions/sub-1/resourceGroups/rg1/providers/Microsoft.Web/sites/func1","name":"func1","kind":"functionapp,linux"},
                    {"id":"/subscriptions/sub-1/resourceGroups/rg2/providers/Microsoft.Web/sites/site","name":"site","kind":"app"}
                ]}"#,
            )
            .create();

        let apps = catalog(&server).list_function_apps().unwrap();

        assert_eq!(apps, vec![func1()]);
    }

    #[test]
    fn reads_kind_and_settings() {
        let mut server = mockito::Server::new();
        let _site = server
            .mock(
                "GET",
                "/subscriptions/sub-1/resourceGroups/rg1/providers/Microsoft.Web/sites/func1",
            )
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(r#"{"name":"func1","kind":"functionapp,linux,container"}"#)
            .create();
        let _settings = server
            .mock(
                "POST",
                "/subscriptions/sub-1/resourceGroups/rg1/providers/Microsoft.Web/sites/func1/config/appsettings/list",
            )
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(r#"{"properties":{"FUNCTIONS_WORKER_RUNTIME":"node"}}"#)
            .create();

        let catalog = catalog(&server);

        assert_eq!(catalog.kind_tags(&func1()).unwrap(), "functionapp,linux,container");
        assert_eq!(
            catalog.app_settings(&func1()).unwrap(),
            vec![AppSetting::new("FUNCTIONS_WORKER_RUNTIME", "node")]
        );
    }

    #[test]
    fn error_body_message_is_surfaced() {
        let mut server = mockito::Server::new();
        let _m = server
            .mock("GET", "/subscriptions/sub-1/providers/Microsoft.Web/sites")
            .match_query(Matcher::Any)
            .with_status(403)
            .with_body(r#"{"error":{"code":"AuthorizationFailed","message":"no access"}}"#)
            .create();

        let err = catalog(&server).list_function_apps().unwrap_err();

        match err {
            AppError::AzureApi { message, status } => {
                assert_eq!(message, "no access");
                assert_eq!(status, Some(403));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn missing_subscription_is_reported() {
        let err = HttpFunctionAppCatalog::new("token".into(), &AzureConfig::default()).unwrap_err();
        assert!(matches!(
            err,
            AppError::EnvironmentVariableMissing(name) if name == SUBSCRIPTION_ID_ENV
        ));
    }

    #[test]
    fn resource_group_parsed_from_id() {
        assert_eq!(
            resource_group_from_id("/subscriptions/s/resourceGroups/rg9/providers/x").as_deref(),
            Some("rg9")
        );
        assert_eq!(resource_group_from_id("/subscriptions/s"), None);
    }
}
