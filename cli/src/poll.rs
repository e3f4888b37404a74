//! Generic poll-until-terminal primitive
//!
//! Both the task poller and the deployment poller are instances of this
//! one mechanism: query a status source at a fixed interval until it
//! reports a terminal outcome or the overall window runs out. Progress
//! is logged only when the reported status changes, not on every tick.

use std::future::Future;
use std::time::Duration;

use tokio::time::{sleep, Instant};
use tracing::info;

use crate::errors::CliError;

/// Polling interval and overall window.
#[derive(Debug, Clone, Copy)]
pub struct PollOptions {
    pub interval: Duration,
    pub timeout: Duration,
}

/// One observation of the remote status source.
#[derive(Debug)]
pub enum Poll<T> {
    /// Terminal: stop polling and yield the value.
    Ready(T),
    /// Not terminal yet; the label is shown to the operator on change.
    Pending(String),
}

/// Why a poll loop stopped without a value.
#[derive(Debug)]
pub enum PollError {
    /// The window elapsed before a terminal state was observed. The
    /// remote operation may still complete later.
    TimedOut { waited: Duration },
    /// The check itself failed (transport error or remote-reported failure).
    Failed(CliError),
}

/// Poll `check` every `options.interval` until it returns [`Poll::Ready`],
/// fails, or `options.timeout` elapses.
///
/// The loop suspends between polls; dropping the returned future between
/// ticks cancels the loop without touching the remote operation.
pub async fn poll_until<T, F, Fut>(options: PollOptions, mut check: F) -> Result<T, PollError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<Poll<T>, CliError>>,
{
    let started = Instant::now();
    let mut last_status: Option<String> = None;

    loop {
        match check().await {
            Ok(Poll::Ready(value)) => return Ok(value),
            Ok(Poll::Pending(status)) => {
                if last_status.as_deref() != Some(status.as_str()) {
                    info!("status: {status}");
                    last_status = Some(status);
                }
            }
            Err(e) => return Err(PollError::Failed(e)),
        }

        // Stop before sleeping into a poll that could not finish in time.
        if started.elapsed() + options.interval >= options.timeout {
            return Err(PollError::TimedOut {
                waited: started.elapsed(),
            });
        }
        sleep(options.interval).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn options() -> PollOptions {
        PollOptions {
            interval: Duration::from_secs(1),
            timeout: Duration::from_secs(10),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn returns_value_on_first_ready() {
        let result: Result<u32, _> = poll_until(options(), || async { Ok(Poll::Ready(7)) }).await;
        assert_eq!(result.unwrap(), 7);
    }

    #[tokio::test(start_paused = true)]
    async fn keeps_polling_while_pending() {
        let calls = AtomicUsize::new(0);
        let result = poll_until(options(), || async {
            if calls.fetch_add(1, Ordering::SeqCst) < 3 {
                Ok(Poll::Pending("running".to_string()))
            } else {
                Ok(Poll::Ready("done"))
            }
        })
        .await;
        assert_eq!(result.unwrap(), "done");
        assert_eq!(calls.load(Ordering::SeqCst), 4);
    }

    #[tokio::test(start_paused = true)]
    async fn stops_on_check_failure() {
        let result: Result<(), _> = poll_until(options(), || async {
            Err(CliError::Config("boom".to_string()))
        })
        .await;
        match result {
            Err(PollError::Failed(CliError::Config(msg))) => assert_eq!(msg, "boom"),
            other => panic!("unexpected outcome: {other:?}"),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn times_out_when_never_terminal() {
        let result: Result<(), _> = poll_until(options(), || async {
            Ok(Poll::Pending("building".to_string()))
        })
        .await;
        match result {
            Err(PollError::TimedOut { waited }) => {
                assert!(waited < Duration::from_secs(10));
            }
            other => panic!("unexpected outcome: {other:?}"),
        }
    }
}
