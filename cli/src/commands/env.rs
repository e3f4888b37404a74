//! `storectl env`

use anyhow::Result;
use clap::{Args, Subcommand};
use colored::Colorize;
use dialoguer::Confirm;

use crate::cloud::client::CloudClient;
use crate::cloud::tasks::{default_task_poll, wait_for_task};
use crate::cloud::{CloudApi, TaskOperation};
use crate::commands::load_credentials;
use crate::errors::CliError;

/// Manage commerce environments
#[derive(Args, Debug)]
pub struct EnvArgs {
    #[command(subcommand)]
    command: EnvCommand,
}

#[derive(Subcommand, Debug)]
enum EnvCommand {
    /// Create an environment
    Create {
        /// Name for the new environment
        name: String,
    },
    /// Remove an environment
    Remove {
        /// Key of the environment
        name: String,

        /// Skip the confirmation prompt
        #[arg(long)]
        force: bool,
    },
}

pub async fn handle_env(args: EnvArgs) -> Result<()> {
    let credentials = load_credentials().await?;
    let cloud = CloudClient::new(
        &credentials.cloud_api_url,
        credentials.require_cloud_token()?,
    )?;

    match args.command {
        EnvCommand::Create { name } => {
            let operation = TaskOperation::CreateEnvironment { name: name.clone() };
            let description = operation.describe();
            let handle = cloud.submit(operation).await?;
            wait_for_task(
                &cloud,
                default_task_poll(),
                &handle.task_id,
                &description,
                "Environment created",
            )
            .await?;
            println!("{} environment {} created", "✓".green(), name.cyan());
        }
        EnvCommand::Remove { name, force } => {
            if !force && !confirm_removal(&name)? {
                println!("Aborted");
                return Ok(());
            }
            let operation = TaskOperation::DeleteEnvironment { key: name.clone() };
            let description = operation.describe();
            let handle = cloud.submit(operation).await?;
            wait_for_task(
                &cloud,
                default_task_poll(),
                &handle.task_id,
                &description,
                "Environment deleted",
            )
            .await?;
            println!("{} environment {} removed", "✓".green(), name.cyan());
        }
    }
    Ok(())
}

fn confirm_removal(name: &str) -> Result<bool> {
    Confirm::new()
        .with_prompt(format!("Remove environment {name}? This cannot be undone"))
        .default(false)
        .interact()
        .map_err(|e| CliError::Config(format!("prompt failed: {e}")).into())
}
