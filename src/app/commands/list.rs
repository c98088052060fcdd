//! Listing commands referenced by not-found diagnostics.

use crate::domain::{AppError, Organization, Project, Region};
use crate::ports::PipelineService;

pub fn organizations(service: &impl PipelineService) -> Result<Vec<Organization>, AppError> {
    let mut organizations = service.list_organizations()?;
    organizations.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(organizations)
}

pub fn regions(service: &impl PipelineService) -> Result<Vec<Region>, AppError> {
    let mut regions = service.list_regions()?;
    regions.sort_by(|a, b| a.display_name.cmp(&b.display_name));
    Ok(regions)
}

pub fn projects(
    service: &impl PipelineService,
    organization: &str,
) -> Result<Vec<Project>, AppError> {
    let mut projects = service.list_projects(organization)?;
    projects.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(projects)
}
