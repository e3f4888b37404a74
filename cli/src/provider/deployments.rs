//! Deployment poller

use std::time::Duration;

use tracing::info;

use crate::errors::CliError;
use crate::models::deployment::DeploymentStatus;
use crate::poll::{poll_until, Poll, PollError, PollOptions};
use crate::provider::DeployProvider;

/// Default deployment polling cadence. Builds take longer than backend
/// tasks, so the window is wider.
pub fn default_deployment_poll() -> PollOptions {
    PollOptions {
        interval: Duration::from_secs(5),
        timeout: Duration::from_secs(900),
    }
}

/// Poll a deployment until it is ready, fails, or the window elapses.
///
/// Failure details carry the provider's build-log URL so the operator can
/// diagnose without re-querying.
pub async fn verify_deployment(
    provider: &dyn DeployProvider,
    options: PollOptions,
    name: &str,
    deployment_id: &str,
) -> Result<(), CliError> {
    info!("waiting for deployment {deployment_id} of {name}");

    let outcome = poll_until(options, || async {
        let deployment = provider.get_deployment(deployment_id).await?;
        match deployment.status {
            DeploymentStatus::Ready => Ok(Poll::Ready(())),
            DeploymentStatus::Error | DeploymentStatus::Canceled => {
                Err(CliError::DeploymentFailed {
                    id: deployment.id.clone(),
                    status: deployment.status,
                    inspect_url: deployment.inspect_url_or_unavailable(),
                })
            }
            DeploymentStatus::Queued | DeploymentStatus::Building => {
                Ok(Poll::Pending(deployment.status.to_string()))
            }
            DeploymentStatus::Unknown => Err(CliError::UnknownStatus(format!(
                "deployment {deployment_id} reported a status outside the known vocabulary"
            ))),
        }
    })
    .await;

    match outcome {
        Ok(()) => {
            info!("deployment {deployment_id} is ready");
            Ok(())
        }
        Err(PollError::TimedOut { waited }) => Err(CliError::DeploymentTimeout {
            id: deployment_id.to_string(),
            waited,
        }),
        Err(PollError::Failed(e)) => Err(e),
    }
}
