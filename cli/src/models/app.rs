//! Installed-app models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An app installed in a commerce environment
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct App {
    pub id: String,
    pub name: String,

    #[serde(default)]
    pub is_active: bool,

    /// Manifest the app was installed from; used to find the checkout app
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manifest_url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}
