//! Wire shapes of the Azure DevOps REST API.

use serde::Deserialize;

use crate::domain::{
    Artifact, BuildDefinition, BuildResult, BuildRun, BuildStatus, Region, Release,
    ReleaseDefinition, Repository, ServiceEndpoint,
};

#[derive(Debug, Deserialize)]
pub(super) struct ListResponse<T> {
    #[serde(default = "Vec::new")]
    pub value: Vec<T>,
}

#[derive(Debug, Deserialize)]
pub(super) struct ProfileDto {
    pub id: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct AccountDto {
    pub account_name: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct RegionDto {
    #[serde(alias = "name")]
    pub region_code: String,
    pub display_name: String,
}

impl From<RegionDto> for Region {
    fn from(dto: RegionDto) -> Self {
        Region { display_name: dto.display_name, code: dto.region_code }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct NameAvailabilityDto {
    pub is_available: bool,
    #[serde(default)]
    pub unavailability_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(super) struct ProjectDto {
    #[serde(default)]
    pub id: String,
    pub name: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct OperationDto {
    pub id: String,
    pub status: String,
    #[serde(default)]
    pub result_message: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct RepositoryDto {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub remote_url: String,
}

impl From<RepositoryDto> for Repository {
    fn from(dto: RepositoryDto) -> Self {
        Repository { id: dto.id, name: dto.name, remote_url: dto.remote_url }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct CommitDto {
    pub commit_id: String,
}

#[derive(Debug, Deserialize)]
pub(super) struct EndpointDto {
    pub id: String,
    pub name: String,
}

impl From<EndpointDto> for ServiceEndpoint {
    fn from(dto: EndpointDto) -> Self {
        ServiceEndpoint { id: dto.id, name: dto.name }
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct QueueDto {
    pub id: u64,
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub(super) struct DefinitionDto {
    pub id: u64,
    pub name: String,
}

impl From<DefinitionDto> for BuildDefinition {
    fn from(dto: DefinitionDto) -> Self {
        BuildDefinition { id: dto.id, name: dto.name }
    }
}

impl From<DefinitionDto> for ReleaseDefinition {
    fn from(dto: DefinitionDto) -> Self {
        ReleaseDefinition { id: dto.id, name: dto.name }
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct BuildDto {
    pub id: u64,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub result: Option<String>,
}

impl From<BuildDto> for BuildRun {
    fn from(dto: BuildDto) -> Self {
        BuildRun {
            id: dto.id,
            status: BuildStatus::from_api(&dto.status),
            result: dto.result.as_deref().and_then(BuildResult::from_api),
        }
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct ArtifactDto {
    pub name: String,
}

impl From<ArtifactDto> for Artifact {
    fn from(dto: ArtifactDto) -> Self {
        Artifact { name: dto.name }
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct ReleaseDto {
    pub id: u64,
    pub name: String,
}

impl From<ReleaseDto> for Release {
    fn from(dto: ReleaseDto) -> Self {
        Release { id: dto.id, name: dto.name }
    }
}
