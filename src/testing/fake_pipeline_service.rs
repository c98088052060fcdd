use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::Mutex;

use crate::domain::{
    AppError, Artifact, BuildDefinition, BuildDefinitionRequest, BuildResult, BuildRun,
    BuildStatus, Commit, Creation, ExtensionRef, GithubConnection, Organization, Project, Region,
    Release, ReleaseDefinition, ReleaseDefinitionRequest, Repository, ServiceEndpoint,
};
use crate::ports::PipelineService;

type Scoped<T> = (String, String, T);

struct FakeState {
    organizations: Vec<String>,
    regions: Vec<Region>,
    projects: Vec<(String, String)>,
    repositories: Vec<Scoped<Repository>>,
    commits: HashMap<String, usize>,
    endpoints: Vec<Scoped<ServiceEndpoint>>,
    build_definitions: Vec<Scoped<BuildDefinition>>,
    release_definitions: Vec<Scoped<ReleaseDefinition>>,
    rejected: HashSet<String>,
    build_script: VecDeque<(BuildStatus, Option<BuildResult>)>,
    artifacts_from_poll: Option<usize>,
    polls: usize,
    next_id: u64,
    events: Vec<String>,
    build_requests: Vec<BuildDefinitionRequest>,
    release_requests: Vec<ReleaseDefinitionRequest>,
}

/// In-memory pipeline service that records every mutating call.
pub struct FakePipelineService {
    state: Mutex<FakeState>,
}

impl Default for FakePipelineService {
    fn default() -> Self {
        Self::new()
    }
}

impl FakePipelineService {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(FakeState {
                organizations: Vec::new(),
                regions: Vec::new(),
                projects: Vec::new(),
                repositories: Vec::new(),
                commits: HashMap::new(),
                endpoints: Vec::new(),
                build_definitions: Vec::new(),
                release_definitions: Vec::new(),
                rejected: HashSet::new(),
                build_script: VecDeque::new(),
                artifacts_from_poll: Some(1),
                polls: 0,
                next_id: 100,
                events: Vec::new(),
                build_requests: Vec::new(),
                release_requests: Vec::new(),
            }),
        }
    }

    pub fn with_organization(self, name: &str) -> Self {
        self.state.lock().unwrap().organizations.push(name.to_string());
        self
    }

    pub fn with_region(self, display_name: &str, code: &str) -> Self {
        self.state
            .lock()
            .unwrap()
            .regions
            .push(Region { display_name: display_name.to_string(), code: code.to_string() });
        self
    }

    pub fn with_project(self, organization: &str, name: &str) -> Self {
        self.state.lock().unwrap().projects.push((organization.to_string(), name.to_string()));
        self
    }

    pub fn with_repository(
        self,
        organization: &str,
        project: &str,
        name: &str,
        commits: usize,
    ) -> Self {
        {
            let mut state = self.state.lock().unwrap();
            let repository = repository(organization, project, name);
            state.repositories.push((organization.to_string(), project.to_string(), repository));
            state.commits.insert(name.to_string(), commits);
        }
        self
    }

    pub fn with_service_endpoint(self, organization: &str, project: &str, name: &str) -> Self {
        {
            let mut state = self.state.lock().unwrap();
            let id = state.allocate_id();
            state.endpoints.push((
                organization.to_string(),
                project.to_string(),
                ServiceEndpoint { id: id.to_string(), name: name.to_string() },
            ));
        }
        self
    }

    pub fn with_build_definition(self, organization: &str, project: &str, name: &str) -> Self {
        {
            let mut state = self.state.lock().unwrap();
            let id = state.allocate_id();
            state.build_definitions.push((
                organization.to_string(),
                project.to_string(),
                BuildDefinition { id, name: name.to_string() },
            ));
        }
        self
    }

    pub fn with_release_definition(self, organization: &str, project: &str, name: &str) -> Self {
        {
            let mut state = self.state.lock().unwrap();
            let id = state.allocate_id();
            state.release_definitions.push((
                organization.to_string(),
                project.to_string(),
                ReleaseDefinition { id, name: name.to_string() },
            ));
        }
        self
    }

    /// Names the service refuses with `Creation::Invalid`.
    pub fn rejecting(self, name: &str) -> Self {
        self.state.lock().unwrap().rejected.insert(name.to_string());
        self
    }

    /// Successive `get_build` answers; completed+succeeded once exhausted.
    pub fn with_build_polls(self, polls: Vec<(BuildStatus, Option<BuildResult>)>) -> Self {
        self.state.lock().unwrap().build_script = polls.into();
        self
    }

    /// Poll number from which artifacts are listed; `None` never lists any.
    pub fn with_artifacts_from_poll(self, poll: Option<usize>) -> Self {
        self.state.lock().unwrap().artifacts_from_poll = poll;
        self
    }

    pub fn events(&self) -> Vec<String> {
        self.state.lock().unwrap().events.clone()
    }

    /// Events whose call name equals `call`.
    pub fn events_named(&self, call: &str) -> Vec<String> {
        self.events()
            .into_iter()
            .filter(|event| event.split(':').next() == Some(call))
            .collect()
    }

    pub fn polls(&self) -> usize {
        self.state.lock().unwrap().polls
    }

    pub fn build_requests(&self) -> Vec<BuildDefinitionRequest> {
        self.state.lock().unwrap().build_requests.clone()
    }

    pub fn release_requests(&self) -> Vec<ReleaseDefinitionRequest> {
        self.state.lock().unwrap().release_requests.clone()
    }

    pub fn service_endpoints(&self, organization: &str, project: &str) -> Vec<ServiceEndpoint> {
        scoped(&self.state.lock().unwrap().endpoints, organization, project)
    }

    pub fn repository_names(&self, organization: &str, project: &str) -> Vec<String> {
        self.state
            .lock()
            .unwrap()
            .repositories
            .iter()
            .filter(|(org, proj, _)| org == organization && proj == project)
            .map(|(_, _, repo)| repo.name.clone())
            .collect()
    }
}

impl FakeState {
    fn allocate_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }

    fn record(&mut self, event: String) {
        self.events.push(event);
    }

    fn rejects(&self, name: &str) -> Option<String> {
        self.rejected.contains(name).then(|| format!("The name '{name}' is not available"))
    }
}

fn repository(organization: &str, project: &str, name: &str) -> Repository {
    Repository {
        id: format!("repo-{name}"),
        name: name.to_string(),
        remote_url: format!(
            "https://{organization}@dev.azure.com/{organization}/{project}/_git/{name}"
        ),
    }
}

fn scoped<'a, T: Clone + 'a>(
    items: impl IntoIterator<Item = &'a Scoped<T>>,
    organization: &str,
    project: &str,
) -> Vec<T> {
    items
        .into_iter()
        .filter(|(org, proj, _)| org == organization && proj == project)
        .map(|(_, _, item)| item.clone())
        .collect()
}

impl PipelineService for FakePipelineService {
    fn list_organizations(&self) -> Result<Vec<Organization>, AppError> {
        let state = self.state.lock().unwrap();
        Ok(state.organizations.iter().map(|name| Organization { name: name.clone() }).collect())
    }

    fn list_regions(&self) -> Result<Vec<Region>, AppError> {
        Ok(self.state.lock().unwrap().regions.clone())
    }

    fn create_organization(
        &self,
        name: &str,
        region_code: &str,
    ) -> Result<Creation<Organization>, AppError> {
        let mut state = self.state.lock().unwrap();
        state.record(format!("create_organization:{name}@{region_code}"));
        if let Some(message) = state.rejects(name) {
            return Ok(Creation::Invalid(message));
        }
        if state.organizations.iter().any(|existing| existing == name) {
            return Ok(Creation::Invalid(format!("Organization '{name}' already exists")));
        }
        state.organizations.push(name.to_string());
        Ok(Creation::Created(Organization { name: name.to_string() }))
    }

    fn list_projects(&self, organization: &str) -> Result<Vec<Project>, AppError> {
        let state = self.state.lock().unwrap();
        Ok(state
            .projects
            .iter()
            .filter(|(org, _)| org == organization)
            .map(|(_, name)| Project { name: name.clone() })
            .collect())
    }

    fn create_project(
        &self,
        organization: &str,
        name: &str,
    ) -> Result<Creation<Project>, AppError> {
        let mut state = self.state.lock().unwrap();
        state.record(format!("create_project:{organization}/{name}"));
        if let Some(message) = state.rejects(name) {
            return Ok(Creation::Invalid(message));
        }
        state.projects.push((organization.to_string(), name.to_string()));
        Ok(Creation::Created(Project { name: name.to_string() }))
    }

    fn list_repositories(
        &self,
        organization: &str,
        project: &str,
    ) -> Result<Vec<Repository>, AppError> {
        let state = self.state.lock().unwrap();
        Ok(scoped(&state.repositories, organization, project))
    }

    fn create_repository(
        &self,
        organization: &str,
        project: &str,
        name: &str,
    ) -> Result<Creation<Repository>, AppError> {
        let mut state = self.state.lock().unwrap();
        state.record(format!("create_repository:{organization}/{project}/{name}"));
        if let Some(message) = state.rejects(name) {
            return Ok(Creation::Invalid(message));
        }
        let created = repository(organization, project, name);
        state.repositories.push((organization.to_string(), project.to_string(), created.clone()));
        state.commits.insert(name.to_string(), 0);
        Ok(Creation::Created(created))
    }

    fn list_commits(
        &self,
        _organization: &str,
        _project: &str,
        repository: &str,
    ) -> Result<Vec<Commit>, AppError> {
        let state = self.state.lock().unwrap();
        let count = state.commits.get(repository).copied().unwrap_or_default();
        Ok((0..count).map(|index| Commit { id: format!("{repository}-{index}") }).collect())
    }

    fn list_service_endpoints(
        &self,
        organization: &str,
        project: &str,
    ) -> Result<Vec<ServiceEndpoint>, AppError> {
        let state = self.state.lock().unwrap();
        Ok(scoped(&state.endpoints, organization, project))
    }

    fn create_service_endpoint(
        &self,
        organization: &str,
        project: &str,
        name: &str,
    ) -> Result<ServiceEndpoint, AppError> {
        let mut state = self.state.lock().unwrap();
        state.record(format!("create_service_endpoint:{name}"));
        let endpoint =
            ServiceEndpoint { id: state.allocate_id().to_string(), name: name.to_string() };
        state.endpoints.push((organization.to_string(), project.to_string(), endpoint.clone()));
        Ok(endpoint)
    }

    fn install_extension(
        &self,
        _organization: &str,
        extension: &ExtensionRef,
    ) -> Result<(), AppError> {
        let mut state = self.state.lock().unwrap();
        state.record(format!("install_extension:{}.{}", extension.publisher, extension.name));
        Ok(())
    }

    fn list_build_definitions(
        &self,
        organization: &str,
        project: &str,
    ) -> Result<Vec<BuildDefinition>, AppError> {
        let state = self.state.lock().unwrap();
        Ok(scoped(&state.build_definitions, organization, project))
    }

    fn create_build_definition(
        &self,
        request: &BuildDefinitionRequest,
    ) -> Result<BuildDefinition, AppError> {
        let mut state = self.state.lock().unwrap();
        state.record(format!("create_build_definition:{}", request.name));
        let definition = BuildDefinition { id: state.allocate_id(), name: request.name.clone() };
        state.build_definitions.push((
            request.organization.clone(),
            request.project.clone(),
            definition.clone(),
        ));
        state.build_requests.push(request.clone());
        Ok(definition)
    }

    fn queue_build(
        &self,
        _organization: &str,
        _project: &str,
        definition: &BuildDefinition,
        pool: &str,
    ) -> Result<BuildRun, AppError> {
        let mut state = self.state.lock().unwrap();
        state.record(format!("queue_build:{}@{pool}", definition.name));
        Ok(BuildRun { id: state.allocate_id(), status: BuildStatus::NotStarted, result: None })
    }

    fn get_build(
        &self,
        _organization: &str,
        _project: &str,
        build_id: u64,
    ) -> Result<BuildRun, AppError> {
        let mut state = self.state.lock().unwrap();
        state.polls += 1;
        let (status, result) = state
            .build_script
            .pop_front()
            .unwrap_or((BuildStatus::Completed, Some(BuildResult::Succeeded)));
        Ok(BuildRun { id: build_id, status, result })
    }

    fn list_artifacts(
        &self,
        _organization: &str,
        _project: &str,
        build_id: u64,
    ) -> Result<Vec<Artifact>, AppError> {
        let mut state = self.state.lock().unwrap();
        state.record(format!("list_artifacts:{build_id}"));
        let ready = state.artifacts_from_poll.is_some_and(|from| state.polls >= from);
        Ok(if ready { vec![Artifact { name: "drop".to_string() }] } else { Vec::new() })
    }

    fn list_release_definitions(
        &self,
        organization: &str,
        project: &str,
    ) -> Result<Vec<ReleaseDefinition>, AppError> {
        let state = self.state.lock().unwrap();
        Ok(scoped(&state.release_definitions, organization, project))
    }

    fn create_release_definition(
        &self,
        request: &ReleaseDefinitionRequest,
    ) -> Result<ReleaseDefinition, AppError> {
        let mut state = self.state.lock().unwrap();
        state.record(format!("create_release_definition:{}", request.name));
        let definition = ReleaseDefinition { id: state.allocate_id(), name: request.name.clone() };
        state.release_definitions.push((
            request.organization.clone(),
            request.project.clone(),
            definition.clone(),
        ));
        state.release_requests.push(request.clone());
        Ok(definition)
    }

    fn create_release(
        &self,
        _organization: &str,
        _project: &str,
        definition: &ReleaseDefinition,
    ) -> Result<Release, AppError> {
        let mut state = self.state.lock().unwrap();
        state.record(format!("create_release:{}", definition.name));
        let id = state.allocate_id();
        Ok(Release { id, name: format!("Release-{id}") })
    }

    fn create_github_connection(
        &self,
        organization: &str,
        project: &str,
    ) -> Result<GithubConnection, AppError> {
        let mut state = self.state.lock().unwrap();
        state.record(format!("create_github_connection:{organization}/{project}"));
        let id = state.allocate_id();
        Ok(GithubConnection {
            id: format!("github-{id}"),
            authorization_url: format!("https://github.example/authorize/{id}"),
        })
    }
}
