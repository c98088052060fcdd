//! Classification of a local repository's remote URL.

use url::Url;

const AZURE_SSH_MARKERS: [&str; 2] = ["vs-ssh.visualstudio.com:v3/", "ssh.dev.azure.com:v3/"];
const AZURE_HOSTS: [&str; 2] = ["visualstudio.com", "dev.azure.com"];
const LEGACY_HOST_SUFFIX: &str = ".visualstudio.com";
const GIT_SEGMENT: &str = "_git";

/// Coordinates of an Azure Repos repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryCoordinates {
    pub organization: String,
    pub project: String,
    pub repository: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoteProvider {
    /// GitHub; carries `owner/repo` when it could be parsed.
    GitHub(Option<String>),
    /// Azure Repos; carries coordinates when the path could be parsed.
    AzureRepos(Option<RepositoryCoordinates>),
    Unsupported,
}

/// Classify by host substring, then parse the provider-specific layout.
///
/// `devops_host` is the configured Azure DevOps host, recognised in
/// addition to the public ones.
pub fn classify_remote(url: &str, devops_host: Option<&str>) -> RemoteProvider {
    let azure = AZURE_HOSTS.iter().any(|host| url.contains(host))
        || devops_host.is_some_and(|host| !host.is_empty() && url.contains(host));
    if url.contains("github") {
        RemoteProvider::GitHub(parse_github_url(url))
    } else if azure {
        RemoteProvider::AzureRepos(parse_azure_repos_url(url))
    } else {
        RemoteProvider::Unsupported
    }
}

/// Parse a GitHub remote URL to extract `owner/repo`.
///
/// Supports SSH (`git@github.com:owner/repo.git`) and
/// HTTPS (`https://github.com/owner/repo.git`) formats.
pub fn parse_github_url(url: &str) -> Option<String> {
    if let Some(rest) = url.strip_prefix("git@github.com:") {
        return Some(rest.trim_end_matches(".git").to_string());
    }

    let parsed = Url::parse(url).ok()?;
    if parsed.host_str()? != "github.com" {
        return None;
    }
    let segments: Vec<&str> = parsed.path_segments()?.filter(|s| !s.is_empty()).collect();
    match segments.as_slice() {
        [owner, repo, ..] => Some(format!("{}/{}", owner, repo.trim_end_matches(".git"))),
        _ => None,
    }
}

/// Parse one of:
///
/// - `https://<org>.visualstudio.com/[<collection>/]<project>/_git/<repo>`
/// - `https://[<user>@]dev.azure.com/<org>/<project>/_git/<repo>`
/// - `<org>@vs-ssh.visualstudio.com:v3/<org>/<project>/<repo>`
/// - `git@ssh.dev.azure.com:v3/<org>/<project>/<repo>`
pub fn parse_azure_repos_url(url: &str) -> Option<RepositoryCoordinates> {
    let ssh = AZURE_SSH_MARKERS
        .iter()
        .find_map(|marker| url.find(marker).map(|index| index + marker.len()));
    if let Some(start) = ssh {
        let parts: Vec<&str> = url[start..].trim_end_matches(".git").split('/').collect();
        return match parts.as_slice() {
            [organization, project, repository] => Some(RepositoryCoordinates {
                organization: decode(organization),
                project: decode(project),
                repository: decode(repository),
            }),
            _ => None,
        };
    }

    let parsed = Url::parse(url).ok()?;
    let host = parsed.host_str()?;
    let segments: Vec<&str> = parsed.path_segments()?.collect();
    let git_index = segments.iter().position(|segment| *segment == GIT_SEGMENT)?;
    let project = segments.get(git_index.checked_sub(1)?)?;
    let repository = segments.get(git_index + 1)?;

    // Legacy hosts carry the organization in the host name, the others in
    // the first path segment.
    let organization = if host.ends_with(LEGACY_HOST_SUFFIX) {
        host.split('.').next()?
    } else if git_index >= 2 {
        segments.first()?
    } else {
        return None;
    };
    if organization.is_empty() || project.is_empty() || repository.is_empty() {
        return None;
    }

    Some(RepositoryCoordinates {
        organization: decode(organization),
        project: decode(project),
        repository: decode(repository),
    })
}

fn decode(segment: &str) -> String {
    segment.replace("%20", " ")
}
