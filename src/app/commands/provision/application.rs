use tracing::{info, warn};

use super::ProvisioningWorkflow;
use super::naming::require_single;
use crate::domain::{
    AppError, HostingKind, RuntimeLanguage, TargetApplication, language_and_storage,
};

const LIST_FUNCTION_APPS: &str = "az functionapp list";

impl ProvisioningWorkflow<'_> {
    pub(super) fn resolve_application(
        &self,
        name: Option<&str>,
    ) -> Result<TargetApplication, AppError> {
        let apps = self.apps.list_function_apps()?;
        let app = match name {
            Some(name) => {
                require_single("function app", name, LIST_FUNCTION_APPS, &apps, |a| &a.name)?
            }
            None => {
                if apps.is_empty() {
                    return Err(AppError::NothingToChoose("function apps".into()));
                }
                let mut apps = apps;
                apps.sort_by(|a, b| a.name.cmp(&b.name));
                let labels: Vec<String> =
                    apps.iter().map(|a| format!("{} ({})", a.name, a.resource_group)).collect();
                let index = self
                    .prompt
                    .choose("Choose the function app to deploy", &labels)?
                    .ok_or(AppError::Aborted)?;
                apps.into_iter()
                    .nth(index)
                    .ok_or_else(|| AppError::Prompt(format!("No function app at index {index}")))?
            }
        };

        let hosting_kind = HostingKind::from_kind_tags(&self.apps.kind_tags(&app)?);
        let (language, storage_account_name) = language_and_storage(&self.apps.app_settings(&app)?);
        if language == RuntimeLanguage::Unknown {
            warn!("Could not determine the worker runtime of '{}'", app.name);
        }
        if storage_account_name.is_none() {
            warn!("Could not determine the storage account of '{}'", app.name);
        }
        info!(app = %app.name, %hosting_kind, %language, "Resolved function app");

        Ok(TargetApplication {
            name: app.name,
            resource_group: app.resource_group,
            language,
            hosting_kind,
            storage_account_name,
        })
    }
}
