use crate::domain::{AppError, AppSetting, FunctionApp};

/// Read access to deployed function apps.
pub trait FunctionAppCatalog {
    fn list_function_apps(&self) -> Result<Vec<FunctionApp>, AppError>;

    /// Comma-separated capability tags (e.g. `functionapp,linux`).
    fn kind_tags(&self, app: &FunctionApp) -> Result<String, AppError>;

    fn app_settings(&self, app: &FunctionApp) -> Result<Vec<AppSetting>, AppError>;
}
