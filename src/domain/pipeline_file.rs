//! Parameters of the generated pipeline-definition file.

use serde::Serialize;

use crate::domain::{HostingKind, RuntimeLanguage, TargetApplication};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PipelineFileSpec {
    pub language: RuntimeLanguage,
    pub hosting_kind: HostingKind,
    pub app_name: String,
    pub service_endpoint: String,
    pub storage_account: String,
    pub artifact_name: String,
    pub branch: String,
}

impl PipelineFileSpec {
    pub fn for_application(
        application: &TargetApplication,
        service_endpoint: &str,
        artifact_name: &str,
        branch: &str,
    ) -> Self {
        Self {
            language: application.language,
            hosting_kind: application.hosting_kind,
            app_name: application.name.clone(),
            service_endpoint: service_endpoint.to_string(),
            storage_account: application.storage_name().to_string(),
            artifact_name: artifact_name.to_string(),
            branch: branch.to_string(),
        }
    }
}
