//! Deployment provider HTTP client

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::debug;

use crate::deploy::bundle::EnvironmentBundle;
use crate::deploy::source::SourceRef;
use crate::errors::CliError;
use crate::http::client::HttpClient;
use crate::models::deployment::Deployment;
use crate::models::project::ProjectHandle;
use crate::provider::DeployProvider;

/// REST client for the deployment provider
pub struct ProviderClient {
    http: HttpClient,
}

impl ProviderClient {
    pub fn new(base_url: &str, token: &str) -> Result<Self, CliError> {
        Ok(Self {
            http: HttpClient::new(base_url, token)?,
        })
    }
}

#[derive(Debug, Deserialize)]
struct ProjectResponse {
    id: String,
}

#[derive(Debug, Deserialize)]
struct DomainListResponse {
    domains: Vec<DomainEntry>,
}

#[derive(Debug, Deserialize)]
struct DomainEntry {
    name: String,
}

#[derive(Debug, Serialize)]
struct EnvVarPayload<'a> {
    key: &'a str,
    value: &'a str,
    target: [&'a str; 2],
    #[serde(rename = "type")]
    kind: &'a str,
}

#[async_trait]
impl DeployProvider for ProviderClient {
    async fn create_or_get_project(&self, name: &str) -> Result<ProjectHandle, CliError> {
        if let Some(existing) = self
            .http
            .get_optional::<ProjectResponse>(&format!("/projects/{name}"))
            .await?
        {
            debug!("project {name} already exists: {}", existing.id);
            return Ok(ProjectHandle {
                id: existing.id,
                is_new: false,
            });
        }

        let created: ProjectResponse =
            self.http.post("/projects", &json!({ "name": name })).await?;
        debug!("created project {name}: {}", created.id);
        Ok(ProjectHandle {
            id: created.id,
            is_new: true,
        })
    }

    async fn bind_environment(
        &self,
        project_id: &str,
        bundle: &EnvironmentBundle,
    ) -> Result<(), CliError> {
        let payload: Vec<EnvVarPayload<'_>> = bundle
            .iter()
            .map(|(key, value)| EnvVarPayload {
                key,
                value,
                target: ["production", "preview"],
                kind: "encrypted",
            })
            .collect();

        let _: serde_json::Value = self
            .http
            .post(&format!("/projects/{project_id}/env?upsert=true"), &payload)
            .await?;
        Ok(())
    }

    async fn get_domain(&self, project_id: &str) -> Result<String, CliError> {
        let response: DomainListResponse = self
            .http
            .get(&format!("/projects/{project_id}/domains"))
            .await?;
        response
            .domains
            .into_iter()
            .next()
            .map(|domain| domain.name)
            .ok_or_else(|| CliError::DomainNotAssigned {
                project_id: project_id.to_string(),
            })
    }

    async fn trigger_deployment(
        &self,
        project_id: &str,
        source: &SourceRef,
        is_new: bool,
    ) -> Result<Deployment, CliError> {
        let mut body = json!({
            "project": project_id,
            "gitSource": {
                "type": "github",
                "org": source.owner,
                "repo": source.slug,
                "ref": source.git_ref,
            },
        });
        // A never-deployed project gets its production alias from the
        // provider's first-build flow instead of an explicit target.
        if !is_new {
            body["target"] = json!("production");
        }

        self.http.post("/deployments", &body).await
    }

    async fn get_deployment(&self, deployment_id: &str) -> Result<Deployment, CliError> {
        self.http.get(&format!("/deployments/{deployment_id}")).await
    }
}
