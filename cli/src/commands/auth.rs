//! `storectl auth`

use anyhow::Result;
use clap::Args;
use colored::Colorize;

use crate::storage::credentials::Credentials;
use crate::storage::layout::ConfigLayout;

/// Store tokens and defaults for the remote systems
#[derive(Args, Debug)]
pub struct AuthArgs {
    /// Bearer token for the commerce backend
    #[arg(long)]
    pub cloud_token: Option<String>,

    /// Bearer token for the deployment provider
    #[arg(long)]
    pub provider_token: Option<String>,

    /// Default commerce environment key
    #[arg(long)]
    pub environment: Option<String>,

    /// Override the commerce backend API base URL
    #[arg(long)]
    pub cloud_api_url: Option<String>,

    /// Override the deployment provider API base URL
    #[arg(long)]
    pub provider_api_url: Option<String>,
}

pub async fn handle_auth(args: AuthArgs) -> Result<()> {
    let layout = ConfigLayout::default();
    let mut credentials = Credentials::load(&layout).await?;

    if let Some(token) = args.cloud_token {
        credentials.cloud_token = Some(token);
    }
    if let Some(token) = args.provider_token {
        credentials.provider_token = Some(token);
    }
    if let Some(environment) = args.environment {
        credentials.environment = Some(environment);
    }
    if let Some(url) = args.cloud_api_url {
        credentials.cloud_api_url = url;
    }
    if let Some(url) = args.provider_api_url {
        credentials.provider_api_url = url;
    }

    credentials.save(&layout).await?;
    println!(
        "{} credentials saved to {}",
        "✓".green(),
        layout.credentials_file().path().display()
    );
    Ok(())
}
