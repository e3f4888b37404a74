//! Commerce backend API
//!
//! Mutating calls queue asynchronous tasks on the backend; the CLI only
//! observes them via [`tasks::wait_for_task`].

pub mod client;
pub mod tasks;

use async_trait::async_trait;

use crate::errors::CliError;
use crate::models::app::App;
use crate::models::backup::Backup;
use crate::models::organization::Organization;
use crate::models::task::{Task, TaskHandle};

/// Backend operations that resolve asynchronously through a task
#[derive(Debug, Clone)]
pub enum TaskOperation {
    CreateEnvironment { name: String },
    DeleteEnvironment { key: String },
    InstallApp { environment: String, manifest_url: String },
}

impl TaskOperation {
    /// Short label for logs and progress messages
    pub fn describe(&self) -> String {
        match self {
            TaskOperation::CreateEnvironment { name } => format!("create environment {name}"),
            TaskOperation::DeleteEnvironment { key } => format!("delete environment {key}"),
            TaskOperation::InstallApp { manifest_url, .. } => {
                format!("install app from {manifest_url}")
            }
        }
    }
}

/// Narrow seam over the commerce backend. The HTTP implementation is
/// [`client::CloudClient`]; tests substitute in-memory fakes.
#[async_trait]
pub trait CloudApi: Send + Sync {
    /// Queue an asynchronous operation. On error the caller must not
    /// assume the task has been queued.
    async fn submit(&self, operation: TaskOperation) -> Result<TaskHandle, CliError>;

    /// Read the current status of a task
    async fn task(&self, task_id: &str) -> Result<Task, CliError>;

    /// List apps installed in an environment
    async fn list_apps(&self, environment: &str) -> Result<Vec<App>, CliError>;

    /// Find the installed app matching a manifest URL
    async fn find_app(&self, environment: &str, manifest_url: &str) -> Result<App, CliError>;

    /// Create an auth token for an installed app
    async fn create_app_token(&self, environment: &str, app_id: &str)
        -> Result<String, CliError>;

    /// List organizations the authenticated operator belongs to
    async fn list_organizations(&self) -> Result<Vec<Organization>, CliError>;

    /// List stored backups of an environment
    async fn list_backups(&self, environment: &str) -> Result<Vec<Backup>, CliError>;
}
