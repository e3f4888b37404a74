//! Storefront deployment orchestrator
//!
//! The only component that knows both external systems. Steps run
//! strictly in sequence, each feeding the next; any failure aborts the
//! remaining steps and discards the bundle built so far.

use tracing::{info, warn};

use crate::cloud::CloudApi;
use crate::deploy::bundle::{
    EnvironmentBundle, CHECKOUT_APP_URL, CHECKOUT_STOREFRONT_URL, COMMERCE_APP_ID,
    COMMERCE_APP_TOKEN, STOREFRONT_URL,
};
use crate::deploy::checkout::{self, CHECKOUT_SPA_PATH};
use crate::deploy::source::SourceRef;
use crate::errors::CliError;
use crate::models::deployment::Deployment;
use crate::models::project::ProjectHandle;
use crate::poll::PollOptions;
use crate::provider::deployments::{default_deployment_poll, verify_deployment};
use crate::provider::DeployProvider;

/// One requested storefront deployment
#[derive(Debug, Clone)]
pub struct DeployRequest {
    /// Provider project name, inferred from the local package manifest
    pub name: String,

    /// Deploy the checkout app first and fold its settings into the bundle
    pub with_checkout: bool,

    /// Trigger the deployment and return without waiting for completion
    pub dispatch: bool,

    /// Running inside a continuous-integration context; CI always waits
    pub ci: bool,

    /// Commerce environment the checkout app installs into
    pub environment: String,

    /// Source connection for the storefront repository
    pub source: SourceRef,
}

/// Polling cadences, injectable so tests can shrink them
#[derive(Debug, Clone, Copy)]
pub struct DeployOptions {
    pub task_poll: PollOptions,
    pub deployment_poll: PollOptions,
}

impl Default for DeployOptions {
    fn default() -> Self {
        Self {
            task_poll: crate::cloud::tasks::default_task_poll(),
            deployment_poll: default_deployment_poll(),
        }
    }
}

/// Result of a completed (or dispatched) orchestration
#[derive(Debug)]
pub struct DeployOutcome {
    pub project: ProjectHandle,
    pub deployment: Deployment,

    /// The fully resolved bundle. Never persisted by the orchestrator;
    /// callers decide whether to save it.
    pub bundle: EnvironmentBundle,

    /// Whether completion was awaited (false only in dispatch mode)
    pub waited: bool,
}

/// Deploy a storefront, optionally preceded by a checkout sub-deployment.
///
/// The bundle is threaded by value through every step; on failure it is
/// dropped with the error.
pub async fn deploy_storefront(
    cloud: &dyn CloudApi,
    provider: &dyn DeployProvider,
    request: &DeployRequest,
    options: &DeployOptions,
    mut bundle: EnvironmentBundle,
) -> Result<DeployOutcome, CliError> {
    if request.with_checkout {
        let handles = checkout::setup_checkout(cloud, provider, request, options, &bundle).await?;
        bundle.set(
            CHECKOUT_STOREFRONT_URL,
            format!("{}{}", handles.app_url, CHECKOUT_SPA_PATH),
        );
        bundle.set(CHECKOUT_APP_URL, handles.app_url);
        bundle.set(COMMERCE_APP_TOKEN, handles.app_token);
        bundle.set(COMMERCE_APP_ID, handles.app_id);
    }

    let wait = request.ci || !request.dispatch;
    deploy_project(provider, &request.name, &request.source, wait, options, bundle).await
}

/// The core step sequence for one provider project: create-or-fetch,
/// bind environment, resolve domain, trigger, optionally wait.
///
/// The checkout sub-deployment re-enters here directly, which is what
/// keeps checkout chains from recursing.
pub(crate) async fn deploy_project(
    provider: &dyn DeployProvider,
    name: &str,
    source: &SourceRef,
    wait: bool,
    options: &DeployOptions,
    mut bundle: EnvironmentBundle,
) -> Result<DeployOutcome, CliError> {
    info!("deploying {name}");

    let project = provider.create_or_get_project(name).await?;
    provider.bind_environment(&project.id, &bundle).await?;

    // The domain reflects project creation, not this deployment; on a
    // first-time deploy it may not exist yet.
    match provider.get_domain(&project.id).await {
        Ok(domain) => {
            bundle.set(STOREFRONT_URL, format!("https://{domain}"));
        }
        Err(CliError::DomainNotAssigned { .. }) => {
            warn!("domain not yet assigned, proceeding without storefront URL prefill");
        }
        Err(e) => return Err(e),
    }

    let deployment = provider
        .trigger_deployment(&project.id, source, project.is_new)
        .await?;
    info!("triggered deployment {} for {name}", deployment.id);

    if wait {
        verify_deployment(provider, options.deployment_poll, name, &deployment.id).await?;
    } else {
        info!("deployment {} dispatched, not waiting for completion", deployment.id);
    }

    Ok(DeployOutcome {
        project,
        deployment,
        bundle,
        waited: wait,
    })
}
