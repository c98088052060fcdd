//! JSON bodies for create calls whose payloads are too large for typed DTOs.

use serde_json::{Value, json};

use crate::domain::{
    BuildDefinitionRequest, HostingKind, ReleaseDefinitionRequest, RepositorySource,
};

const AGILE_PROCESS_TEMPLATE: &str = "adcc42ab-9882-485e-a3ed-7678f01f66bc";
const WEB_APP_DEPLOY_TASK: &str = "497d490f-eea7-4f2b-ab94-48d9c1acdcb1";

pub(super) fn project_body(name: &str) -> Value {
    json!({
        "name": name,
        "description": "Build and release pipeline for an Azure Functions app",
        "capabilities": {
            "versioncontrol": { "sourceControlType": "Git" },
            "processTemplate": { "templateTypeId": AGILE_PROCESS_TEMPLATE }
        }
    })
}

pub(super) fn azure_endpoint_body(
    name: &str,
    project_id: &str,
    project: &str,
    management_url: &str,
    subscription_id: &str,
    subscription_name: &str,
    tenant_id: &str,
) -> Value {
    json!({
        "name": name,
        "type": "azurerm",
        "url": management_url,
        "authorization": {
            "scheme": "ServicePrincipal",
            "parameters": {
                "tenantid": tenant_id,
                "scope": format!("/subscriptions/{subscription_id}")
            }
        },
        "data": {
            "subscriptionId": subscription_id,
            "subscriptionName": subscription_name,
            "environment": "AzureCloud",
            "scopeLevel": "Subscription",
            "creationMode": "Automatic"
        },
        "isShared": false,
        "serviceEndpointProjectReferences": [
            { "projectReference": { "id": project_id, "name": project }, "name": name }
        ]
    })
}

pub(super) fn github_endpoint_body(name: &str, project_id: &str, project: &str) -> Value {
    json!({
        "name": name,
        "type": "github",
        "url": "https://github.com",
        "authorization": { "scheme": "OAuth", "parameters": {} },
        "serviceEndpointProjectReferences": [
            { "projectReference": { "id": project_id, "name": project }, "name": name }
        ]
    })
}

/// `repository_id` and `repository_url` belong to the Azure Repos repository
/// and are ignored for GitHub sources.
pub(super) fn build_definition_body(
    request: &BuildDefinitionRequest,
    repository_id: &str,
    repository_url: &str,
    queue_id: u64,
) -> Value {
    let branch = request.branch.as_str();
    let repository = match &request.source {
        RepositorySource::AzureRepos { name } => json!({
            "id": repository_id,
            "name": name,
            "type": "TfsGit",
            "url": repository_url,
            "defaultBranch": format!("refs/heads/{branch}")
        }),
        RepositorySource::GitHub { full_name, connection_id } => json!({
            "id": full_name,
            "name": full_name,
            "type": "GitHub",
            "url": format!("https://github.com/{full_name}.git"),
            "defaultBranch": branch,
            "properties": { "connectedServiceId": connection_id }
        }),
    };

    json!({
        "name": request.name,
        "type": "build",
        "queue": { "id": queue_id },
        "process": { "type": 2, "yamlFilename": request.pipeline_file },
        "repository": repository,
        "triggers": [{
            "triggerType": "continuousIntegration",
            "branchFilters": [format!("+{branch}")],
            "settingsSourceType": 2,
            "batchChanges": false
        }]
    })
}

fn web_app_kind(kind: HostingKind) -> &'static str {
    if kind.is_linux() { "functionAppLinux" } else { "functionApp" }
}

pub(super) fn release_definition_body(
    request: &ReleaseDefinitionRequest,
    project_id: &str,
    queue_id: u64,
) -> Value {
    let alias = format!("_{}", request.build_definition.name);
    let package = format!(
        "$(System.DefaultWorkingDirectory)/{}/{}/*.zip",
        alias, request.artifact_name
    );

    json!({
        "name": request.name,
        "artifacts": [{
            "alias": alias,
            "type": "Build",
            "isPrimary": true,
            "definitionReference": {
                "definition": {
                    "id": request.build_definition.id.to_string(),
                    "name": request.build_definition.name
                },
                "project": { "id": project_id, "name": request.project },
                "defaultVersionType": { "id": "latestType", "name": "Latest" }
            }
        }],
        "triggers": [{ "artifactAlias": alias, "triggerType": 1 }],
        "variables": {
            "StorageAccountName": { "value": request.storage_account }
        },
        "environments": [{
            "name": "Production",
            "rank": 1,
            "retentionPolicy": { "daysToKeep": 30, "releasesToKeep": 3, "retainBuild": true },
            "preDeployApprovals": {
                "approvals": [{ "rank": 1, "isAutomated": true, "isNotificationOn": false }]
            },
            "postDeployApprovals": {
                "approvals": [{ "rank": 1, "isAutomated": true, "isNotificationOn": false }]
            },
            "deployPhases": [{
                "name": "Agent job",
                "rank": 1,
                "phaseType": 1,
                "deploymentInput": { "queueId": queue_id },
                "workflowTasks": [{
                    "name": format!("Deploy {}", request.app_name),
                    "taskId": WEB_APP_DEPLOY_TASK,
                    "version": "4.*",
                    "enabled": true,
                    "inputs": {
                        "ConnectionType": "AzureRM",
                        "ConnectedServiceName": request.service_endpoint_id,
                        "WebAppKind": web_app_kind(request.hosting_kind),
                        "WebAppName": request.app_name,
                        "ResourceGroupName": request.resource_group,
                        "Package": package
                    }
                }]
            }]
        }]
    })
}
