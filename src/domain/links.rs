//! Web UI links printed for manual follow-up.

use url::Url;

#[derive(Debug, Clone)]
pub struct WebLinks {
    base: String,
}

impl WebLinks {
    pub fn new(base: &Url) -> Self {
        Self { base: base.as_str().trim_end_matches('/').to_string() }
    }

    /// Host name of the web UI, which is also the Git remote host.
    pub fn host(&self) -> Option<String> {
        Url::parse(&self.base).ok()?.host_str().map(ToOwned::to_owned)
    }

    pub fn organization(&self, organization: &str) -> String {
        format!("{}/{}/", self.base, organization)
    }

    pub fn project(&self, organization: &str, project: &str) -> String {
        format!("{}/{}/{}/", self.base, organization, project)
    }

    pub fn builds(&self, organization: &str, project: &str) -> String {
        format!("{}/{}/{}/_build", self.base, organization, project)
    }

    pub fn build_results(&self, organization: &str, project: &str, build_id: u64) -> String {
        format!(
            "{}/{}/{}/_build/results?buildId={}",
            self.base, organization, project, build_id
        )
    }

    pub fn service_connection(
        &self,
        organization: &str,
        project: &str,
        endpoint_id: &str,
    ) -> String {
        format!(
            "{}/{}/{}/_settings/adminservices?resourceId={}",
            self.base, organization, project, endpoint_id
        )
    }

    pub fn release(&self, organization: &str, project: &str, release_id: u64) -> String {
        format!(
            "{}/{}/{}/_releaseProgress?releaseId={}",
            self.base, organization, project, release_id
        )
    }
}
