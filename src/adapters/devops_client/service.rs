use std::thread;
use std::time::Duration;

use reqwest::Method;
use serde_json::{Value, json};
use tracing::{debug, info, warn};

use super::dto::{
    AccountDto, ArtifactDto, BuildDto, CommitDto, DefinitionDto, EndpointDto, ListResponse,
    NameAvailabilityDto, OperationDto, ProfileDto, ProjectDto, QueueDto, RegionDto, ReleaseDto,
    RepositoryDto,
};
use super::{API_VERSION, HttpPipelineClient, PREVIEW_API_VERSION, Reply, definitions};
use crate::domain::{
    AppError, Artifact, BuildDefinition, BuildDefinitionRequest, BuildRun, Commit, Creation,
    ExtensionRef, GithubConnection, Organization, Project, Region, Release, ReleaseDefinition,
    ReleaseDefinitionRequest, Repository, RepositorySource, ServiceEndpoint, WebLinks,
};
use crate::ports::PipelineService;

const OPERATION_POLL_INTERVAL: Duration = Duration::from_secs(1);
const SUBSCRIPTION_ID_ENV: &str = "AZURE_SUBSCRIPTION_ID";
const TENANT_ID_ENV: &str = "AZURE_TENANT_ID";
/// Statuses with which the service refuses a proposed name; any other
/// rejection is a failure of the call itself.
const NAME_REJECTION_STATUSES: [u16; 2] = [400, 409];

impl HttpPipelineClient {
    fn project_id(&self, organization: &str, project: &str) -> Result<String, AppError> {
        let dto: ProjectDto = self.get(self.api(&[organization, "_apis", "projects", project])?)?;
        Ok(dto.id)
    }

    fn queue_id(&self, organization: &str, project: &str, pool: &str) -> Result<u64, AppError> {
        let url = self.url(
            &self.config.api_url,
            &[organization, project, "_apis", "distributedtask", "queues"],
            PREVIEW_API_VERSION,
            &[("queueName", pool)],
        )?;
        let queues: ListResponse<QueueDto> = self.get(url)?;
        queues
            .value
            .into_iter()
            .find(|queue| queue.name.eq_ignore_ascii_case(pool))
            .map(|queue| queue.id)
            .ok_or_else(|| AppError::DevOpsApi {
                message: format!("Agent pool '{}' is not available in project '{}'", pool, project),
                status: None,
            })
    }

    /// Project creation is asynchronous; follow the operation to its end.
    fn wait_for_operation(
        &self,
        organization: &str,
        operation_id: &str,
    ) -> Result<Option<String>, AppError> {
        let url = self.api(&[organization, "_apis", "operations", operation_id])?;
        for _ in 0..self.config.timeout_secs.max(1) {
            let operation: OperationDto = self.get(url.clone())?;
            match operation.status.as_str() {
                "succeeded" => return Ok(None),
                "failed" | "cancelled" => {
                    let message = operation
                        .result_message
                        .unwrap_or_else(|| format!("Operation {}", operation.status));
                    return Ok(Some(message));
                }
                other => debug!(operation = %operation.id, status = other, "Waiting for operation"),
            }
            thread::sleep(OPERATION_POLL_INTERVAL);
        }
        Err(AppError::DevOpsApi {
            message: format!("Operation {} did not finish in time", operation_id),
            status: None,
        })
    }

    fn subscription(&self) -> Result<(String, String, String), AppError> {
        let subscription_id = self
            .azure
            .subscription_id
            .clone()
            .ok_or_else(|| AppError::EnvironmentVariableMissing(SUBSCRIPTION_ID_ENV.into()))?;
        let tenant_id = self
            .azure
            .tenant_id
            .clone()
            .ok_or_else(|| AppError::EnvironmentVariableMissing(TENANT_ID_ENV.into()))?;
        let subscription_name =
            self.azure.subscription_name.clone().unwrap_or_else(|| subscription_id.clone());
        Ok((subscription_id, subscription_name, tenant_id))
    }
}

fn creation<T, D: Into<T>>(reply: Reply<D>) -> Result<Creation<T>, AppError> {
    match reply {
        Reply::Success(dto) => Ok(Creation::Created(dto.into())),
        Reply::Rejected { status, message } if NAME_REJECTION_STATUSES.contains(&status) => {
            Ok(Creation::Invalid(message))
        }
        Reply::Rejected { status, message } => {
            Err(AppError::DevOpsApi { message, status: Some(status) })
        }
    }
}

impl PipelineService for HttpPipelineClient {
    fn list_organizations(&self) -> Result<Vec<Organization>, AppError> {
        let profile_url = &self.config.profile_url;
        let me: ProfileDto = self.get(self.url(
            profile_url,
            &["_apis", "profile", "profiles", "me"],
            API_VERSION,
            &[],
        )?)?;
        let accounts: ListResponse<AccountDto> = self.get(self.url(
            profile_url,
            &["_apis", "accounts"],
            API_VERSION,
            &[("memberId", me.id.as_str())],
        )?)?;
        Ok(accounts.value.into_iter().map(|a| Organization { name: a.account_name }).collect())
    }

    fn list_regions(&self) -> Result<Vec<Region>, AppError> {
        let regions: ListResponse<RegionDto> = self.get(self.url(
            &self.config.host_acquisition_url,
            &["_apis", "hostacquisition", "regions"],
            PREVIEW_API_VERSION,
            &[],
        )?)?;
        Ok(regions.value.into_iter().map(Region::from).collect())
    }

    fn create_organization(
        &self,
        name: &str,
        region_code: &str,
    ) -> Result<Creation<Organization>, AppError> {
        if !self.list_regions()?.iter().any(|region| region.code == region_code) {
            return Ok(Creation::Invalid(format!(
                "'{}' is not a valid region code; \
                 run 'funcpipe organization regions' to list valid codes",
                region_code
            )));
        }

        let host = &self.config.host_acquisition_url;
        let availability: NameAvailabilityDto = self.get(self.url(
            host,
            &["_apis", "hostacquisition", "nameavailability", name],
            PREVIEW_API_VERSION,
            &[],
        )?)?;
        if !availability.is_available {
            let reason = availability.unavailability_reason.unwrap_or_else(|| {
                format!("The organization name '{}' is not available", name)
            });
            return Ok(Creation::Invalid(reason));
        }

        let url = self.url(
            host,
            &["_apis", "hostacquisition", "collections"],
            PREVIEW_API_VERSION,
            &[("collectionName", name), ("preferredRegion", region_code)],
        )?;
        let body = json!({
            "VisualStudio.Services.HostResolution.UseCodexDomainForHostCreation": "true"
        });
        let reply: Reply<Value> = self.post(url, &body)?;
        Ok(creation(reply)?.map(|_: Value| Organization { name: name.to_string() }))
    }

    fn list_projects(&self, organization: &str) -> Result<Vec<Project>, AppError> {
        let projects: ListResponse<ProjectDto> =
            self.get(self.api(&[organization, "_apis", "projects"])?)?;
        Ok(projects.value.into_iter().map(|p| Project { name: p.name }).collect())
    }

    fn create_project(
        &self,
        organization: &str,
        name: &str,
    ) -> Result<Creation<Project>, AppError> {
        let url = self.api(&[organization, "_apis", "projects"])?;
        let reply: Reply<OperationDto> = self.post(url, &definitions::project_body(name))?;
        let operation = match creation::<OperationDto, OperationDto>(reply)? {
            Creation::Created(operation) => operation,
            Creation::Invalid(message) => return Ok(Creation::Invalid(message)),
        };

        match self.wait_for_operation(organization, &operation.id)? {
            None => Ok(Creation::Created(Project { name: name.to_string() })),
            Some(message) => Ok(Creation::Invalid(message)),
        }
    }

    fn list_repositories(
        &self,
        organization: &str,
        project: &str,
    ) -> Result<Vec<Repository>, AppError> {
        let repositories: ListResponse<RepositoryDto> =
            self.get(self.api(&[organization, project, "_apis", "git", "repositories"])?)?;
        Ok(repositories.value.into_iter().map(Repository::from).collect())
    }

    fn create_repository(
        &self,
        organization: &str,
        project: &str,
        name: &str,
    ) -> Result<Creation<Repository>, AppError> {
        let url = self.api(&[organization, project, "_apis", "git", "repositories"])?;
        let reply: Reply<RepositoryDto> = self.post(url, &json!({ "name": name }))?;
        creation(reply)
    }

    fn list_commits(
        &self,
        organization: &str,
        project: &str,
        repository: &str,
    ) -> Result<Vec<Commit>, AppError> {
        let url = self.api(&[
            organization,
            project,
            "_apis",
            "git",
            "repositories",
            repository,
            "commits",
        ])?;
        // Empty repositories answer 404.
        match self.execute::<ListResponse<CommitDto>>(self.request(Method::GET, url))? {
            Reply::Success(commits) => {
                Ok(commits.value.into_iter().map(|c| Commit { id: c.commit_id }).collect())
            }
            Reply::Rejected { status: 404, .. } => Ok(Vec::new()),
            Reply::Rejected { status, message } => {
                Err(AppError::DevOpsApi { message, status: Some(status) })
            }
        }
    }

    fn list_service_endpoints(
        &self,
        organization: &str,
        project: &str,
    ) -> Result<Vec<ServiceEndpoint>, AppError> {
        let endpoints: ListResponse<EndpointDto> =
            self.get(self.api(&[organization, project, "_apis", "serviceendpoint", "endpoints"])?)?;
        Ok(endpoints.value.into_iter().map(ServiceEndpoint::from).collect())
    }

    fn create_service_endpoint(
        &self,
        organization: &str,
        project: &str,
        name: &str,
    ) -> Result<ServiceEndpoint, AppError> {
        let (subscription_id, subscription_name, tenant_id) = self.subscription()?;
        let project_id = self.project_id(organization, project)?;
        let body = definitions::azure_endpoint_body(
            name,
            &project_id,
            project,
            self.azure.management_url.as_str(),
            &subscription_id,
            &subscription_name,
            &tenant_id,
        );
        let url = self.api(&[organization, "_apis", "serviceendpoint", "endpoints"])?;
        let endpoint: EndpointDto = self.fetch(self.request(Method::POST, url).json(&body))?;
        Ok(endpoint.into())
    }

    fn install_extension(
        &self,
        organization: &str,
        extension: &ExtensionRef,
    ) -> Result<(), AppError> {
        let url = self.url(
            &self.config.extension_url,
            &[
                organization,
                "_apis",
                "extensionmanagement",
                "installedextensionsbyname",
                &extension.publisher,
                &extension.name,
            ],
            PREVIEW_API_VERSION,
            &[],
        )?;
        match self.post::<_, Value>(url, &json!({}))? {
            Reply::Success(_) => Ok(()),
            Reply::Rejected { status: 409, .. } => {
                info!("Extension {}.{} is already installed", extension.publisher, extension.name);
                Ok(())
            }
            Reply::Rejected { message, .. }
                if message.to_ascii_lowercase().contains("already installed") =>
            {
                Ok(())
            }
            Reply::Rejected { status, message } => {
                Err(AppError::DevOpsApi { message, status: Some(status) })
            }
        }
    }

    fn list_build_definitions(
        &self,
        organization: &str,
        project: &str,
    ) -> Result<Vec<BuildDefinition>, AppError> {
        let definitions: ListResponse<DefinitionDto> =
            self.get(self.api(&[organization, project, "_apis", "build", "definitions"])?)?;
        Ok(definitions.value.into_iter().map(BuildDefinition::from).collect())
    }

    fn create_build_definition(
        &self,
        request: &BuildDefinitionRequest,
    ) -> Result<BuildDefinition, AppError> {
        let (org, project) = (request.organization.as_str(), request.project.as_str());
        let (repository_id, repository_url) = match &request.source {
            RepositorySource::AzureRepos { name } => {
                let repository = self
                    .list_repositories(org, project)?
                    .into_iter()
                    .find(|repo| repo.name == *name)
                    .ok_or_else(|| AppError::DevOpsApi {
                        message: format!(
                            "Repository '{}' not found in project '{}'",
                            name, project
                        ),
                        status: None,
                    })?;
                (repository.id, repository.remote_url)
            }
            RepositorySource::GitHub { .. } => (String::new(), String::new()),
        };

        let queue_id = self.queue_id(org, project, &request.pool)?;
        let body =
            definitions::build_definition_body(request, &repository_id, &repository_url, queue_id);
        let url = self.api(&[org, project, "_apis", "build", "definitions"])?;
        let definition: DefinitionDto = self.fetch(self.request(Method::POST, url).json(&body))?;
        Ok(definition.into())
    }

    fn queue_build(
        &self,
        organization: &str,
        project: &str,
        definition: &BuildDefinition,
        pool: &str,
    ) -> Result<BuildRun, AppError> {
        let queue_id = self.queue_id(organization, project, pool)?;
        let body = json!({ "definition": { "id": definition.id }, "queue": { "id": queue_id } });
        let url = self.api(&[organization, project, "_apis", "build", "builds"])?;
        let build: BuildDto = self.fetch(self.request(Method::POST, url).json(&body))?;
        Ok(build.into())
    }

    fn get_build(
        &self,
        organization: &str,
        project: &str,
        build_id: u64,
    ) -> Result<BuildRun, AppError> {
        let id = build_id.to_string();
        let url = self.api(&[organization, project, "_apis", "build", "builds", &id])?;
        let build: BuildDto = self.get(url)?;
        Ok(build.into())
    }

    fn list_artifacts(
        &self,
        organization: &str,
        project: &str,
        build_id: u64,
    ) -> Result<Vec<Artifact>, AppError> {
        let id = build_id.to_string();
        let url = self.api(&[organization, project, "_apis", "build", "builds", &id, "artifacts"])?;
        let artifacts: ListResponse<ArtifactDto> = self.get(url)?;
        Ok(artifacts.value.into_iter().map(Artifact::from).collect())
    }

    fn list_release_definitions(
        &self,
        organization: &str,
        project: &str,
    ) -> Result<Vec<ReleaseDefinition>, AppError> {
        let url = self.url(
            &self.config.release_url,
            &[organization, project, "_apis", "release", "definitions"],
            API_VERSION,
            &[],
        )?;
        let definitions: ListResponse<DefinitionDto> = self.get(url)?;
        Ok(definitions.value.into_iter().map(ReleaseDefinition::from).collect())
    }

    fn create_release_definition(
        &self,
        request: &ReleaseDefinitionRequest,
    ) -> Result<ReleaseDefinition, AppError> {
        let (org, project) = (request.organization.as_str(), request.project.as_str());
        let project_id = self.project_id(org, project)?;
        let queue_id = self.queue_id(org, project, &request.pool)?;
        let body = definitions::release_definition_body(request, &project_id, queue_id);
        let url = self.url(
            &self.config.release_url,
            &[org, project, "_apis", "release", "definitions"],
            API_VERSION,
            &[],
        )?;
        let definition: DefinitionDto = self.fetch(self.request(Method::POST, url).json(&body))?;
        Ok(definition.into())
    }

    fn create_release(
        &self,
        organization: &str,
        project: &str,
        definition: &ReleaseDefinition,
    ) -> Result<Release, AppError> {
        let url = self.url(
            &self.config.release_url,
            &[organization, project, "_apis", "release", "releases"],
            API_VERSION,
            &[],
        )?;
        let body = json!({ "definitionId": definition.id, "description": "Created by funcpipe" });
        let release: ReleaseDto = self.fetch(self.request(Method::POST, url).json(&body))?;
        Ok(release.into())
    }

    fn create_github_connection(
        &self,
        organization: &str,
        project: &str,
    ) -> Result<GithubConnection, AppError> {
        let name = format!("github-{}", project);
        let mut existing: Vec<ServiceEndpoint> = self
            .list_service_endpoints(organization, project)?
            .into_iter()
            .filter(|endpoint| endpoint.name == name)
            .collect();
        if existing.len() > 1 {
            warn!("Found {} GitHub connections named '{}'; using the first", existing.len(), name);
        }

        let endpoint_id = if existing.is_empty() {
            let project_id = self.project_id(organization, project)?;
            let body = definitions::github_endpoint_body(&name, &project_id, project);
            let url = self.api(&[organization, "_apis", "serviceendpoint", "endpoints"])?;
            let endpoint: EndpointDto = self.fetch(self.request(Method::POST, url).json(&body))?;
            info!("Created GitHub connection '{}'", name);
            endpoint.id
        } else {
            info!("Using existing GitHub connection '{}'", name);
            existing.remove(0).id
        };

        let authorization_url = WebLinks::new(&self.config.api_url).service_connection(
            organization,
            project,
            &endpoint_id,
        );
        Ok(GithubConnection { id: endpoint_id, authorization_url })
    }
}
