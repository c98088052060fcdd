//! Names derived from the resolved organization/project/repository.
//!
//! Always recomputed from current state; never stored and patched.

const RELEASE_SUFFIX: &str = " release";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceNames {
    pub service_endpoint: String,
    pub build_definition: String,
    pub release_definition: String,
}

impl ResourceNames {
    pub fn derive(organization: &str, project: &str, repository: &str) -> Self {
        let build_definition = repository.to_string();
        Self {
            service_endpoint: service_endpoint_name(organization, project),
            release_definition: release_definition_name(&build_definition),
            build_definition,
        }
    }
}

pub fn service_endpoint_name(organization: &str, project: &str) -> String {
    format!("{organization}{project}")
}

pub fn release_definition_name(build_definition: &str) -> String {
    format!("{build_definition}{RELEASE_SUFFIX}")
}

/// Default repository for a project shares the project's name.
pub fn default_repository_name(project: &str) -> String {
    project.to_string()
}
