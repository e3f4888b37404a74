//! Task poller

use std::time::Duration;

use tracing::info;

use crate::cloud::CloudApi;
use crate::errors::CliError;
use crate::models::task::TaskStatus;
use crate::poll::{poll_until, Poll, PollError, PollOptions};

/// Default task polling cadence: a couple of seconds between reads,
/// bounded by a window on the order of minutes.
pub fn default_task_poll() -> PollOptions {
    PollOptions {
        interval: Duration::from_secs(3),
        timeout: Duration::from_secs(600),
    }
}

/// Poll a backend task until it succeeds, fails, or the window elapses.
///
/// Interrupting the process aborts the next scheduled poll; the remote
/// task keeps running on the backend.
pub async fn wait_for_task(
    cloud: &dyn CloudApi,
    options: PollOptions,
    task_id: &str,
    description: &str,
    success_message: &str,
) -> Result<(), CliError> {
    info!("{description} (task {task_id})");

    let outcome = poll_until(options, || async {
        let task = cloud.task(task_id).await?;
        match task.status {
            TaskStatus::Succeeded => Ok(Poll::Ready(())),
            TaskStatus::Failed => Err(CliError::TaskFailed {
                task_id: task_id.to_string(),
                detail: task
                    .error
                    .unwrap_or_else(|| "no detail provided".to_string()),
            }),
            TaskStatus::Pending | TaskStatus::Running => {
                Ok(Poll::Pending(task.status.to_string()))
            }
            TaskStatus::Unknown => Err(CliError::UnknownStatus(format!(
                "task {task_id} reported a status outside the known vocabulary"
            ))),
        }
    })
    .await;

    match outcome {
        Ok(()) => {
            info!("{success_message}");
            Ok(())
        }
        Err(PollError::TimedOut { waited }) => Err(CliError::TaskTimeout {
            task_id: task_id.to_string(),
            waited,
        }),
        Err(PollError::Failed(e)) => Err(e),
    }
}
