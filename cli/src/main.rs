//! storectl - Entry Point
//!
//! Operator CLI for provisioning commerce-cloud resources and deploying
//! storefront projects to a deployment provider.

use clap::{Parser, Subcommand};
use colored::Colorize;
use tracing::info;

use storectl::commands::app::{handle_app, AppArgs};
use storectl::commands::auth::{handle_auth, AuthArgs};
use storectl::commands::backup::{handle_backup, BackupArgs};
use storectl::commands::deploy::{handle_deploy, DeployArgs};
use storectl::commands::env::{handle_env, EnvArgs};
use storectl::commands::organization::{handle_organization, OrganizationArgs};
use storectl::logs::init_logging;

#[derive(Parser, Debug)]
#[command(
    name = "storectl",
    version,
    about = "Provision and deploy storefront resources"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand, Debug)]
enum Commands {
    Deploy(DeployArgs),
    Env(EnvArgs),
    App(AppArgs),
    Organization(OrganizationArgs),
    Backup(BackupArgs),
    Auth(AuthArgs),
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let command = async {
        match cli.command {
            Commands::Deploy(args) => handle_deploy(args).await,
            Commands::Env(args) => handle_env(args).await,
            Commands::App(args) => handle_app(args).await,
            Commands::Organization(args) => handle_organization(args).await,
            Commands::Backup(args) => handle_backup(args).await,
            Commands::Auth(args) => handle_auth(args).await,
        }
    };

    // An interrupt stops observing remote work; it never cancels the
    // already-submitted task or deployment.
    tokio::select! {
        result = command => {
            if let Err(e) = result {
                eprintln!("{} {e:#}", "Error:".red());
                std::process::exit(1);
            }
        }
        _ = await_shutdown_signal() => {
            eprintln!("\nInterrupted; remote operations keep running");
            std::process::exit(130);
        }
    }
}

async fn await_shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};
        let mut sigterm =
            signal(SignalKind::terminate()).expect("failed to register SIGTERM handler");

        tokio::select! {
            _ = sigterm.recv() => {
                info!("SIGTERM received, shutting down...");
            }
            _ = tokio::signal::ctrl_c() => {
                info!("Ctrl+C received, shutting down...");
            }
        }
    }

    #[cfg(not(unix))]
    {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to listen for Ctrl+C");
        info!("Ctrl+C received, shutting down...");
    }
}
