//! Git source resolution
//!
//! The provider deploys from a connected git repository; the orchestrator
//! needs the owner/slug pair of the current project's origin remote to
//! name that source connection.

use tokio::process::Command;
use url::Url;

use crate::errors::CliError;

/// A provider-side source connection: repository owner, slug, and ref
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceRef {
    pub owner: String,
    pub slug: String,
    pub git_ref: String,
}

/// Resolve the origin remote of the working directory into a [`SourceRef`]
pub async fn resolve_source(git_ref: &str) -> Result<SourceRef, CliError> {
    let output = Command::new("git")
        .args(["config", "--get", "remote.origin.url"])
        .output()
        .await
        .map_err(|e| CliError::Git(format!("failed to run git: {e}")))?;

    if !output.status.success() {
        return Err(CliError::Git(
            "no origin remote configured in this repository".to_string(),
        ));
    }

    let raw = String::from_utf8_lossy(&output.stdout).trim().to_string();
    let (owner, slug) = parse_remote_url(&raw)?;
    Ok(SourceRef {
        owner,
        slug,
        git_ref: git_ref.to_string(),
    })
}

/// Parse `owner` and `slug` out of an ssh or https remote URL
fn parse_remote_url(raw: &str) -> Result<(String, String), CliError> {
    let path = if let Some(rest) = raw.strip_prefix("git@") {
        // scp-like form: git@host:owner/repo.git
        rest.split_once(':')
            .map(|(_, path)| path.to_string())
            .ok_or_else(|| CliError::Git(format!("unparseable remote url: {raw}")))?
    } else {
        let url = Url::parse(raw)
            .map_err(|e| CliError::Git(format!("unparseable remote url {raw}: {e}")))?;
        url.path().to_string()
    };

    let path = path.trim_matches('/').trim_end_matches(".git");
    let mut segments = path.rsplit('/');
    let slug = segments.next().filter(|s| !s.is_empty());
    let owner = segments.next().filter(|s| !s.is_empty());
    match (owner, slug) {
        (Some(owner), Some(slug)) => Ok((owner.to_string(), slug.to_string())),
        _ => Err(CliError::Git(format!(
            "remote url {raw} has no owner/repository path"
        ))),
    }
}
