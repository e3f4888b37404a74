//! `storectl backup`

use anyhow::Result;
use clap::{Args, Subcommand};

use crate::cloud::client::CloudClient;
use crate::cloud::CloudApi;
use crate::commands::{format_created, format_table, load_credentials};
use crate::errors::CliError;
use crate::models::backup::Backup;

/// Inspect stored backups of a commerce environment
#[derive(Args, Debug)]
pub struct BackupArgs {
    #[command(subcommand)]
    command: BackupCommand,
}

#[derive(Subcommand, Debug)]
enum BackupCommand {
    /// List backups for an environment
    List {
        /// Environment key; falls back to the stored default
        #[arg(long)]
        environment: Option<String>,
    },
}

pub async fn handle_backup(args: BackupArgs) -> Result<()> {
    let credentials = load_credentials().await?;
    let cloud = CloudClient::new(
        &credentials.cloud_api_url,
        credentials.require_cloud_token()?,
    )?;

    match args.command {
        BackupCommand::List { environment } => {
            let environment = environment
                .or(credentials.environment)
                .ok_or_else(|| {
                    CliError::Config(
                        "no environment given; pass --environment or store a default".to_string(),
                    )
                })?;

            let backups = cloud.list_backups(&environment).await?;
            if backups.is_empty() {
                println!("No backups for {environment}");
                return Ok(());
            }
            for line in backup_table(&backups) {
                println!("{line}");
            }
        }
    }
    Ok(())
}

/// Aligned table lines for `backup list`
pub fn backup_table(backups: &[Backup]) -> Vec<String> {
    let rows: Vec<Vec<String>> = backups
        .iter()
        .map(|backup| {
            vec![
                backup.key.clone(),
                backup.name.clone(),
                format_created(backup.created_at),
            ]
        })
        .collect();
    format_table(&["KEY", "NAME", "CREATED"], &rows)
}
