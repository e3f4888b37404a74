//! Commerce-backend task models

use std::fmt;

use serde::{Deserialize, Serialize};

/// Handle returned when a mutating backend call queues an async task
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskHandle {
    pub task_id: String,
}

/// Observed state of a backend task
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    pub status: TaskStatus,

    /// Failure detail reported by the backend, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Task status vocabulary. Anything outside it deserializes to `Unknown`,
/// which the poller reports as a failure instead of polling forever.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    Pending,
    Running,
    Succeeded,
    Failed,
    #[serde(other)]
    Unknown,
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TaskStatus::Pending => "pending",
            TaskStatus::Running => "running",
            TaskStatus::Succeeded => "succeeded",
            TaskStatus::Failed => "failed",
            TaskStatus::Unknown => "unknown",
        };
        f.write_str(s)
    }
}
