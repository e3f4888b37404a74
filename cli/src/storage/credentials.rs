//! Credentials file management

use serde::{Deserialize, Serialize};

use crate::errors::CliError;
use crate::storage::layout::ConfigLayout;

/// Locally stored tokens and defaults for both remote systems
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Credentials {
    /// Commerce backend API base URL
    #[serde(default = "default_cloud_api_url")]
    pub cloud_api_url: String,

    /// Deployment provider API base URL
    #[serde(default = "default_provider_api_url")]
    pub provider_api_url: String,

    /// Bearer token for the commerce backend
    #[serde(default)]
    pub cloud_token: Option<String>,

    /// Bearer token for the deployment provider
    #[serde(default)]
    pub provider_token: Option<String>,

    /// Default commerce environment key
    #[serde(default)]
    pub environment: Option<String>,
}

fn default_cloud_api_url() -> String {
    "https://cloud.commerce.example/api".to_string()
}

fn default_provider_api_url() -> String {
    "https://api.deploy.example/v1".to_string()
}

impl Default for Credentials {
    fn default() -> Self {
        Self {
            cloud_api_url: default_cloud_api_url(),
            provider_api_url: default_provider_api_url(),
            cloud_token: None,
            provider_token: None,
            environment: None,
        }
    }
}

impl Credentials {
    /// Load stored credentials, or defaults when none are stored yet
    pub async fn load(layout: &ConfigLayout) -> Result<Self, CliError> {
        let file = layout.credentials_file();
        if !file.exists().await {
            return Ok(Self::default());
        }
        file.read_json().await
    }

    /// Persist credentials with owner-only permissions
    pub async fn save(&self, layout: &ConfigLayout) -> Result<(), CliError> {
        let file = layout.credentials_file();
        file.write_json(self).await?;
        file.set_permissions_600().await
    }

    pub fn require_cloud_token(&self) -> Result<&str, CliError> {
        self.cloud_token.as_deref().ok_or_else(|| {
            CliError::Config(
                "no commerce-cloud token stored; run `storectl auth --cloud-token <token>`"
                    .to_string(),
            )
        })
    }

    pub fn require_provider_token(&self) -> Result<&str, CliError> {
        self.provider_token.as_deref().ok_or_else(|| {
            CliError::Config(
                "no deployment-provider token stored; run `storectl auth --provider-token <token>`"
                    .to_string(),
            )
        })
    }
}
