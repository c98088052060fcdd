use crate::domain::{AppError, AppSetting, FunctionApp};
use crate::ports::FunctionAppCatalog;

struct Entry {
    app: FunctionApp,
    kind: String,
    settings: Vec<AppSetting>,
}

#[derive(Default)]
pub struct FakeFunctionApps {
    entries: Vec<Entry>,
}

impl FakeFunctionApps {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_app(mut self, name: &str, kind: &str, settings: &[(&str, &str)]) -> Self {
        self.entries.push(Entry {
            app: FunctionApp { name: name.to_string(), resource_group: format!("{name}-rg") },
            kind: kind.to_string(),
            settings: settings.iter().map(|(k, v)| AppSetting::new(*k, *v)).collect(),
        });
        self
    }

    fn entry(&self, app: &FunctionApp) -> Result<&Entry, AppError> {
        self.entries.iter().find(|entry| entry.app == *app).ok_or_else(|| AppError::AzureApi {
            message: format!("site {} not found", app.name),
            status: Some(404),
        })
    }
}

impl FunctionAppCatalog for FakeFunctionApps {
    fn list_function_apps(&self) -> Result<Vec<FunctionApp>, AppError> {
        Ok(self.entries.iter().map(|entry| entry.app.clone()).collect())
    }

    fn kind_tags(&self, app: &FunctionApp) -> Result<String, AppError> {
        Ok(self.entry(app)?.kind.clone())
    }

    fn app_settings(&self, app: &FunctionApp) -> Result<Vec<AppSetting>, AppError> {
        Ok(self.entry(app)?.settings.clone())
    }
}
