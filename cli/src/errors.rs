//! Error types for storectl

use std::time::Duration;

use thiserror::Error;

use crate::models::deployment::DeploymentStatus;

/// Main error type for storectl
#[derive(Error, Debug)]
pub enum CliError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The remote API answered with a non-2xx status or an unreadable body.
    #[error("remote call failed: {status} {body}")]
    Remote { status: u16, body: String },

    /// The commerce backend reported a terminal task failure.
    #[error("task {task_id} failed: {detail}")]
    TaskFailed { task_id: String, detail: String },

    /// Task polling exceeded its window; the remote task may still finish.
    #[error("task {task_id} did not reach a terminal state within {waited:?}")]
    TaskTimeout { task_id: String, waited: Duration },

    /// The deployment provider reported a terminal build failure.
    #[error("deployment {id} ended with status `{status}` (build logs: {inspect_url})")]
    DeploymentFailed {
        id: String,
        status: DeploymentStatus,
        inspect_url: String,
    },

    /// Deployment polling exceeded its window; the build may still finish.
    #[error("deployment {id} did not reach a terminal state within {waited:?}")]
    DeploymentTimeout { id: String, waited: Duration },

    /// The provider has not assigned a domain to the project yet.
    #[error("no domain assigned to project {project_id} yet")]
    DomainNotAssigned { project_id: String },

    /// A remote status outside the known vocabulary; never treated as
    /// "still running" to avoid polling forever on an API change.
    #[error("unrecognized remote status: {0}")]
    UnknownStatus(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("git error: {0}")]
    Git(String),
}
