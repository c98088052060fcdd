//! Target function application model and the rules that classify it.

use std::fmt;

use serde::Serialize;

pub const WORKER_RUNTIME_SETTING: &str = "FUNCTIONS_WORKER_RUNTIME";
pub const STORAGE_SETTING: &str = "AzureWebJobsStorage";
const ACCOUNT_NAME_MARKER: &str = ";AccountName=";

/// A function app as returned by the resource catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionApp {
    pub name: String,
    pub resource_group: String,
}

/// One application setting key/value pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppSetting {
    pub name: String,
    pub value: String,
}

impl AppSetting {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self { name: name.into(), value: value.into() }
    }
}

/// Execution environment of the target function app.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HostingKind {
    LinuxConsumption,
    LinuxDedicated,
    Windows,
}

impl HostingKind {
    /// Classify from the comma-separated kind tags of a site.
    pub fn from_kind_tags(kind: &str) -> Self {
        let tags: Vec<String> =
            kind.split(',').map(|tag| tag.trim().to_ascii_lowercase()).collect();
        let has = |needle: &str| tags.iter().any(|tag| tag == needle);

        if has("linux") {
            if has("container") {
                HostingKind::LinuxDedicated
            } else {
                HostingKind::LinuxConsumption
            }
        } else {
            HostingKind::Windows
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            HostingKind::LinuxConsumption => "linux_consumption",
            HostingKind::LinuxDedicated => "linux_dedicated",
            HostingKind::Windows => "windows",
        }
    }

    pub fn is_linux(self) -> bool {
        !matches!(self, HostingKind::Windows)
    }
}

impl fmt::Display for HostingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Worker runtime of the function app.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RuntimeLanguage {
    Python,
    Node,
    Dotnet,
    Java,
    /// Runtime setting missing or not recognised.
    Unknown,
}

impl RuntimeLanguage {
    pub fn from_worker_runtime(value: &str) -> Self {
        match value.trim() {
            "python" => RuntimeLanguage::Python,
            "node" => RuntimeLanguage::Node,
            "dotnet" => RuntimeLanguage::Dotnet,
            "java" => RuntimeLanguage::Java,
            _ => RuntimeLanguage::Unknown,
        }
    }

    /// Identifier used in pipeline templates; empty for `Unknown`.
    pub fn as_str(self) -> &'static str {
        match self {
            RuntimeLanguage::Python => "python",
            RuntimeLanguage::Node => "node",
            RuntimeLanguage::Dotnet => "dotnet",
            RuntimeLanguage::Java => "java",
            RuntimeLanguage::Unknown => "",
        }
    }
}

impl fmt::Display for RuntimeLanguage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuntimeLanguage::Unknown => f.write_str("unknown"),
            other => f.write_str(other.as_str()),
        }
    }
}

/// Fully resolved deployment target. Read-only once resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetApplication {
    pub name: String,
    pub resource_group: String,
    pub language: RuntimeLanguage,
    pub hosting_kind: HostingKind,
    pub storage_account_name: Option<String>,
}

impl TargetApplication {
    pub fn storage_name(&self) -> &str {
        self.storage_account_name.as_deref().unwrap_or_default()
    }
}

/// Scan app settings for the worker runtime and the storage account name.
///
/// A missing or unrecognised runtime yields `RuntimeLanguage::Unknown`.
pub fn language_and_storage(settings: &[AppSetting]) -> (RuntimeLanguage, Option<String>) {
    let mut language = RuntimeLanguage::Unknown;
    let mut storage = None;

    for setting in settings {
        if setting.name == WORKER_RUNTIME_SETTING {
            language = RuntimeLanguage::from_worker_runtime(&setting.value);
        } else if setting.name == STORAGE_SETTING {
            storage = storage_account_name(&setting.value);
        }
    }

    (language, storage)
}

/// Extract the value between the first `;AccountName=` and the next `;`.
pub fn storage_account_name(connection_string: &str) -> Option<String> {
    let start = connection_string.find(ACCOUNT_NAME_MARKER)? + ACCOUNT_NAME_MARKER.len();
    let rest = &connection_string[start..];
    let name = rest.split(';').next().unwrap_or_default();
    if name.is_empty() { None } else { Some(name.to_string()) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn linux_with_container_is_dedicated() {
        assert_eq!(
            HostingKind::from_kind_tags("functionapp,linux,container"),
            HostingKind::LinuxDedicated
        );
        assert_eq!(HostingKind::from_kind_tags("linux,container"), HostingKind::LinuxDedicated);
    }

    #[test]
    fn linux_alone_is_consumption() {
        assert_eq!(HostingKind::from_kind_tags("linux"), HostingKind::LinuxConsumption);
        assert_eq!(
            HostingKind::from_kind_tags("functionapp, Linux"),
            HostingKind::LinuxConsumption
        );
    }

    #[test]
    fn everything_else_is_windows() {
        assert_eq!(HostingKind::from_kind_tags(""), HostingKind::Windows);
        assert_eq!(HostingKind::from_kind_tags("windows"), HostingKind::Windows);
        assert_eq!(HostingKind::from_kind_tags("functionapp,container"), HostingKind::Windows);
    }

    #[test]
    fn python_app_with_storage_connection() {
        let settings = vec![
            AppSetting::new(WORKER_RUNTIME_SETTING, "python"),
            AppSetting::new(
                STORAGE_SETTING,
                "DefaultEndpointsProtocol=https;AccountName=acct1;AccountKey=abc==",
            ),
        ];

        let (language, storage) = language_and_storage(&settings);
        assert_eq!(language, RuntimeLanguage::Python);
        assert_eq!(storage.as_deref(), Some("acct1"));
    }

    #[test]
    fn unrecognised_runtime_is_unknown_not_an_error() {
        let settings = vec![AppSetting::new(WORKER_RUNTIME_SETTING, "powershell")];
        let (language, storage) = language_and_storage(&settings);
        assert_eq!(language, RuntimeLanguage::Unknown);
        assert_eq!(language.as_str(), "");
        assert!(storage.is_none());
    }

    #[test]
    fn account_name_without_trailing_delimiter() {
        assert_eq!(
            storage_account_name("DefaultEndpointsProtocol=https;AccountName=last").as_deref(),
            Some("last")
        );
        assert_eq!(storage_account_name("UseDevelopmentStorage=true"), None);
    }

    proptest! {
        #[test]
        fn account_name_round_trips(name in "[a-z0-9]{3,24}", key in "[A-Za-z0-9+/=]{0,40}") {
            let conn =
                format!("DefaultEndpointsProtocol=https;AccountName={name};AccountKey={key}");
            prop_assert_eq!(storage_account_name(&conn), Some(name));
        }

        #[test]
        fn tags_without_linux_are_windows(
            tags in proptest::collection::vec("[a-km-z]{1,8}", 0..5)
        ) {
            let kind = tags.join(",");
            prop_assert_eq!(HostingKind::from_kind_tags(&kind), HostingKind::Windows);
        }
    }
}
