//! Environment backup models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A stored backup of a commerce environment
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Backup {
    pub key: String,
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}
