//! Deployment provider API
//!
//! Projects, environment-variable bindings, domains, and deployments.
//! Creation is idempotent where possible: re-running a deploy reuses the
//! existing project instead of creating a duplicate.

pub mod client;
pub mod deployments;

use async_trait::async_trait;

use crate::deploy::bundle::EnvironmentBundle;
use crate::deploy::source::SourceRef;
use crate::errors::CliError;
use crate::models::deployment::Deployment;
use crate::models::project::ProjectHandle;

/// Narrow seam over the deployment provider. The HTTP implementation is
/// [`client::ProviderClient`]; tests substitute in-memory fakes.
#[async_trait]
pub trait DeployProvider: Send + Sync {
    /// Look up a project by name, creating it if absent. Safe to call
    /// twice with the same name.
    async fn create_or_get_project(&self, name: &str) -> Result<ProjectHandle, CliError>;

    /// Set each key of the bundle on the project. Additive: keys left
    /// over from a previous run are not deleted.
    async fn bind_environment(
        &self,
        project_id: &str,
        bundle: &EnvironmentBundle,
    ) -> Result<(), CliError>;

    /// Read the project's assigned domain. Fails with
    /// [`CliError::DomainNotAssigned`] before the first deployment.
    async fn get_domain(&self, project_id: &str) -> Result<String, CliError>;

    /// Start a build from the named source ref. `is_new` defers the
    /// production alias for never-deployed projects.
    async fn trigger_deployment(
        &self,
        project_id: &str,
        source: &SourceRef,
        is_new: bool,
    ) -> Result<Deployment, CliError>;

    /// Read the current status of a deployment
    async fn get_deployment(&self, deployment_id: &str) -> Result<Deployment, CliError>;
}
