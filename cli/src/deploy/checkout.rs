//! Checkout app sub-deployment
//!
//! Deploys the checkout app as its own provider project, installs it
//! into the commerce environment, and hands back the values the
//! storefront bundle needs.

use tracing::info;

use crate::cloud::tasks::wait_for_task;
use crate::cloud::{CloudApi, TaskOperation};
use crate::deploy::bundle::EnvironmentBundle;
use crate::deploy::orchestrator::{deploy_project, DeployOptions, DeployRequest};
use crate::deploy::source::SourceRef;
use crate::errors::CliError;
use crate::provider::DeployProvider;

/// Well-known checkout repository under the storefront's own owner
const CHECKOUT_REPO_SLUG: &str = "storefront-checkout";
const CHECKOUT_REPO_REF: &str = "main";

/// Manifest route served by a deployed checkout app
const CHECKOUT_MANIFEST_PATH: &str = "/api/manifest";

/// Route of the embedded checkout SPA
pub(crate) const CHECKOUT_SPA_PATH: &str = "/checkout-spa";

/// Values the storefront bundle folds in after a checkout deployment
#[derive(Debug)]
pub struct CheckoutHandles {
    pub app_url: String,
    pub app_token: String,
    pub app_id: String,
}

/// Deploy `${name}-app-checkout`, install the app, and mint its token.
///
/// The sub-deployment always waits for completion: the app URL and the
/// install both need a finished build.
pub(crate) async fn setup_checkout(
    cloud: &dyn CloudApi,
    provider: &dyn DeployProvider,
    request: &DeployRequest,
    options: &DeployOptions,
    bundle: &EnvironmentBundle,
) -> Result<CheckoutHandles, CliError> {
    let checkout_name = format!("{}-app-checkout", request.name);
    info!("deploying checkout app {checkout_name}");

    let source = SourceRef {
        owner: request.source.owner.clone(),
        slug: CHECKOUT_REPO_SLUG.to_string(),
        git_ref: CHECKOUT_REPO_REF.to_string(),
    };

    let outcome = deploy_project(
        provider,
        &checkout_name,
        &source,
        true,
        options,
        bundle.clone(),
    )
    .await?;

    // With the build finished the provider has assigned a domain even on
    // a first-time deploy, so this read is required rather than a prefill.
    let domain = provider.get_domain(&outcome.project.id).await?;
    let app_url = format!("https://{domain}");

    let manifest_url = format!("{app_url}{CHECKOUT_MANIFEST_PATH}");
    let operation = TaskOperation::InstallApp {
        environment: request.environment.clone(),
        manifest_url: manifest_url.clone(),
    };
    let description = operation.describe();
    let handle = cloud.submit(operation).await?;
    wait_for_task(
        cloud,
        options.task_poll,
        &handle.task_id,
        &description,
        "Checkout app installed",
    )
    .await?;

    let app = cloud.find_app(&request.environment, &manifest_url).await?;
    let app_token = cloud
        .create_app_token(&request.environment, &app.id)
        .await?;

    Ok(CheckoutHandles {
        app_url,
        app_token,
        app_id: app.id,
    })
}
