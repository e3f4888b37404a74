//! Deployment-provider models

use std::fmt;

use serde::{Deserialize, Serialize};

/// Read-only handle to a build at the deployment provider
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Deployment {
    /// Some provider API versions answer with `uid` instead of `id`
    #[serde(alias = "uid")]
    pub id: String,

    #[serde(alias = "readyState")]
    pub status: DeploymentStatus,

    /// Public URL of the build, once assigned
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    /// Provider build-log page, surfaced in failure details
    #[serde(default, alias = "inspectorUrl", skip_serializing_if = "Option::is_none")]
    pub inspect_url: Option<String>,
}

impl Deployment {
    /// Logs reference for error reporting, with a stable fallback
    pub fn inspect_url_or_unavailable(&self) -> String {
        self.inspect_url
            .clone()
            .unwrap_or_else(|| "unavailable".to_string())
    }
}

/// Deployment status vocabulary. The provider spells these uppercase in
/// some API versions; both forms are accepted. Anything else deserializes
/// to `Unknown` and is reported as a failure by the poller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeploymentStatus {
    #[serde(alias = "QUEUED")]
    Queued,
    #[serde(alias = "BUILDING")]
    Building,
    #[serde(alias = "READY")]
    Ready,
    #[serde(alias = "ERROR")]
    Error,
    #[serde(alias = "CANCELED")]
    Canceled,
    #[serde(other)]
    Unknown,
}

impl fmt::Display for DeploymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            DeploymentStatus::Queued => "queued",
            DeploymentStatus::Building => "building",
            DeploymentStatus::Ready => "ready",
            DeploymentStatus::Error => "error",
            DeploymentStatus::Canceled => "canceled",
            DeploymentStatus::Unknown => "unknown",
        };
        f.write_str(s)
    }
}
