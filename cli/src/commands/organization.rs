//! `storectl organization`

use anyhow::Result;
use clap::{Args, Subcommand};

use crate::cloud::client::CloudClient;
use crate::cloud::CloudApi;
use crate::commands::{format_created, format_table, load_credentials};
use crate::models::organization::Organization;

/// Inspect organizations the operator belongs to
#[derive(Args, Debug)]
pub struct OrganizationArgs {
    #[command(subcommand)]
    command: OrganizationCommand,
}

#[derive(Subcommand, Debug)]
enum OrganizationCommand {
    /// List organizations
    List,
}

pub async fn handle_organization(args: OrganizationArgs) -> Result<()> {
    let credentials = load_credentials().await?;
    let cloud = CloudClient::new(
        &credentials.cloud_api_url,
        credentials.require_cloud_token()?,
    )?;

    match args.command {
        OrganizationCommand::List => {
            let organizations = cloud.list_organizations().await?;
            if organizations.is_empty() {
                println!("No organizations");
                return Ok(());
            }
            for line in organization_table(&organizations) {
                println!("{line}");
            }
        }
    }
    Ok(())
}

/// Aligned table lines for `organization list`
pub fn organization_table(organizations: &[Organization]) -> Vec<String> {
    let rows: Vec<Vec<String>> = organizations
        .iter()
        .map(|org| {
            vec![
                org.slug.clone(),
                org.name.clone(),
                org.company_name.clone().unwrap_or_else(|| "-".to_string()),
                org.owner_email.clone().unwrap_or_else(|| "-".to_string()),
                format_created(org.created_at),
            ]
        })
        .collect();
    format_table(&["SLUG", "NAME", "COMPANY", "OWNER", "CREATED"], &rows)
}
