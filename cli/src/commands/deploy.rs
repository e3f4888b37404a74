//! `storectl deploy`

use std::path::Path;

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use crate::cloud::client::CloudClient;
use crate::commands::load_credentials;
use crate::deploy::bundle::{EnvironmentBundle, STOREFRONT_URL};
use crate::deploy::orchestrator::{deploy_storefront, DeployOptions, DeployRequest};
use crate::deploy::source::resolve_source;
use crate::errors::CliError;
use crate::provider::client::ProviderClient;

/// Deploy this storefront to the deployment provider
#[derive(Args, Debug)]
pub struct DeployArgs {
    /// Trigger the deployment and don't wait till it ends
    #[arg(long)]
    pub dispatch: bool,

    /// Deploy with checkout
    #[arg(long = "with-checkout")]
    pub with_checkout: bool,

    /// Commerce environment for the checkout app install
    #[arg(long)]
    pub environment: Option<String>,

    /// Git ref to deploy from
    #[arg(long, default_value = "main")]
    pub git_ref: String,
}

pub async fn handle_deploy(args: DeployArgs) -> Result<()> {
    let name = read_package_name().await?;
    println!(
        "\nDeploying {} (name inferred from {})",
        name.cyan(),
        "package.json".yellow()
    );

    let credentials = load_credentials().await?;
    let cloud = CloudClient::new(
        &credentials.cloud_api_url,
        credentials.require_cloud_token()?,
    )?;
    let provider = ProviderClient::new(
        &credentials.provider_api_url,
        credentials.require_provider_token()?,
    )?;

    let bundle = EnvironmentBundle::read_env_file(Path::new(".env")).await?;
    let source = resolve_source(&args.git_ref).await?;

    let environment = args
        .environment
        .or(credentials.environment)
        .unwrap_or_default();
    if args.with_checkout && environment.is_empty() {
        return Err(CliError::Config(
            "--with-checkout needs a commerce environment; pass --environment or store a default"
                .to_string(),
        )
        .into());
    }

    let request = DeployRequest {
        name: name.clone(),
        with_checkout: args.with_checkout,
        dispatch: args.dispatch,
        ci: in_ci(),
        environment,
        source,
    };

    let outcome = deploy_storefront(
        &cloud,
        &provider,
        &request,
        &DeployOptions::default(),
        bundle,
    )
    .await?;

    if outcome.waited {
        println!("\n{} {} deployed", "✓".green(), name.cyan());
    } else {
        println!(
            "\nDeployment {} dispatched; it finishes on the provider side",
            outcome.deployment.id.cyan()
        );
    }
    if let Some(url) = outcome.bundle.get(STOREFRONT_URL) {
        println!("Storefront: {}", url.cyan());
    }
    Ok(())
}

/// CI context always waits for completion, regardless of `--dispatch`
fn in_ci() -> bool {
    std::env::var("CI").map(|v| !v.is_empty()).unwrap_or(false)
}

/// The project name comes from `package.json` in the working directory
async fn read_package_name() -> Result<String> {
    let raw = tokio::fs::read_to_string("package.json")
        .await
        .context("unable to read package.json in the current directory")?;
    let manifest: serde_json::Value =
        serde_json::from_str(&raw).context("package.json is not valid JSON")?;
    manifest
        .get("name")
        .and_then(|name| name.as_str())
        .map(str::to_owned)
        .ok_or_else(|| CliError::Config("package.json has no \"name\" field".to_string()).into())
}
