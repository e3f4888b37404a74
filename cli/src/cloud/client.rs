//! Commerce backend HTTP client

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;

use crate::cloud::{CloudApi, TaskOperation};
use crate::errors::CliError;
use crate::http::client::HttpClient;
use crate::models::app::App;
use crate::models::backup::Backup;
use crate::models::organization::Organization;
use crate::models::task::{Task, TaskHandle};

/// REST client for the commerce backend task API
pub struct CloudClient {
    http: HttpClient,
}

impl CloudClient {
    pub fn new(base_url: &str, token: &str) -> Result<Self, CliError> {
        Ok(Self {
            http: HttpClient::new(base_url, token)?,
        })
    }
}

#[derive(Debug, Deserialize)]
struct AppListResponse {
    apps: Vec<App>,
}

#[derive(Debug, Deserialize)]
struct AppTokenResponse {
    auth_token: String,
}

#[derive(Debug, Deserialize)]
struct OrganizationListResponse {
    organizations: Vec<Organization>,
}

#[derive(Debug, Deserialize)]
struct BackupListResponse {
    backups: Vec<Backup>,
}

#[async_trait]
impl CloudApi for CloudClient {
    async fn submit(&self, operation: TaskOperation) -> Result<TaskHandle, CliError> {
        match operation {
            TaskOperation::CreateEnvironment { name } => {
                self.http.post("/environments", &json!({ "name": name })).await
            }
            TaskOperation::DeleteEnvironment { key } => {
                self.http.delete(&format!("/environments/{key}")).await
            }
            TaskOperation::InstallApp {
                environment,
                manifest_url,
            } => {
                self.http
                    .post(
                        &format!("/environments/{environment}/apps/install"),
                        &json!({ "manifest_url": manifest_url }),
                    )
                    .await
            }
        }
    }

    async fn task(&self, task_id: &str) -> Result<Task, CliError> {
        self.http.get(&format!("/tasks/{task_id}")).await
    }

    async fn list_apps(&self, environment: &str) -> Result<Vec<App>, CliError> {
        let response: AppListResponse = self
            .http
            .get(&format!("/environments/{environment}/apps"))
            .await?;
        Ok(response.apps)
    }

    async fn find_app(&self, environment: &str, manifest_url: &str) -> Result<App, CliError> {
        let apps = self.list_apps(environment).await?;
        apps.into_iter()
            .find(|app| app.manifest_url.as_deref() == Some(manifest_url))
            .ok_or_else(|| {
                CliError::NotFound(format!(
                    "no app installed from {manifest_url} in environment {environment}"
                ))
            })
    }

    async fn create_app_token(
        &self,
        environment: &str,
        app_id: &str,
    ) -> Result<String, CliError> {
        let response: AppTokenResponse = self
            .http
            .post(
                &format!("/environments/{environment}/apps/{app_id}/tokens"),
                &json!({}),
            )
            .await?;
        Ok(response.auth_token)
    }

    async fn list_organizations(&self) -> Result<Vec<Organization>, CliError> {
        let response: OrganizationListResponse = self.http.get("/organizations").await?;
        Ok(response.organizations)
    }

    async fn list_backups(&self, environment: &str) -> Result<Vec<Backup>, CliError> {
        let response: BackupListResponse = self
            .http
            .get(&format!("/environments/{environment}/backups"))
            .await?;
        Ok(response.backups)
    }
}
