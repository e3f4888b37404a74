//! `storectl app`

use anyhow::Result;
use clap::{Args, Subcommand};
use colored::Colorize;

use crate::cloud::client::CloudClient;
use crate::cloud::CloudApi;
use crate::commands::{format_created, load_credentials, pad};
use crate::errors::CliError;

/// Inspect apps installed in a commerce environment
#[derive(Args, Debug)]
pub struct AppArgs {
    #[command(subcommand)]
    command: AppCommand,
}

#[derive(Subcommand, Debug)]
enum AppCommand {
    /// List installed apps for an environment
    List {
        /// Environment key; falls back to the stored default
        #[arg(long)]
        environment: Option<String>,
    },
}

pub async fn handle_app(args: AppArgs) -> Result<()> {
    let credentials = load_credentials().await?;
    let cloud = CloudClient::new(
        &credentials.cloud_api_url,
        credentials.require_cloud_token()?,
    )?;

    match args.command {
        AppCommand::List { environment } => {
            let environment = environment
                .or(credentials.environment)
                .ok_or_else(|| {
                    CliError::Config(
                        "no environment given; pass --environment or store a default".to_string(),
                    )
                })?;

            let apps = cloud.list_apps(&environment).await?;
            if apps.is_empty() {
                println!("No apps installed in {environment}");
                return Ok(());
            }

            let name_width = apps
                .iter()
                .map(|app| app.name.len())
                .max()
                .unwrap_or(0)
                .max("NAME".len());
            let id_width = apps
                .iter()
                .map(|app| app.id.len())
                .max()
                .unwrap_or(0)
                .max("ID".len());

            println!(
                "{:<name_width$}  {:<id_width$}  {:<7}  CREATED",
                "NAME", "ID", "ACTIVE"
            );
            for app in &apps {
                // pad before colorizing so escape bytes don't skew the column
                let active = if app.is_active {
                    pad("Yes", 7).green()
                } else {
                    pad("No", 7).red()
                };
                println!(
                    "{}  {}  {}  {}",
                    pad(&app.name, name_width).cyan(),
                    pad(&app.id, id_width).dimmed(),
                    active,
                    format_created(app.created_at).dimmed()
                );
            }
        }
    }
    Ok(())
}
