//! Orchestrator integration tests against in-memory API fakes

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use storectl::cloud::{CloudApi, TaskOperation};
use storectl::deploy::bundle::{
    EnvironmentBundle, CHECKOUT_APP_URL, CHECKOUT_STOREFRONT_URL, COMMERCE_APP_ID,
    COMMERCE_APP_TOKEN, STOREFRONT_URL,
};
use storectl::deploy::orchestrator::{deploy_storefront, DeployOptions, DeployRequest};
use storectl::deploy::source::SourceRef;
use storectl::errors::CliError;
use storectl::models::app::App;
use storectl::models::backup::Backup;
use storectl::models::deployment::{Deployment, DeploymentStatus};
use storectl::models::organization::Organization;
use storectl::models::project::ProjectHandle;
use storectl::models::task::{Task, TaskHandle, TaskStatus};
use storectl::poll::PollOptions;
use storectl::provider::DeployProvider;

struct FakeProvider {
    /// name -> id
    projects: Mutex<HashMap<String, String>>,
    domains_assigned: bool,
    /// statuses handed out by successive `get_deployment` calls; once
    /// drained the deployment reports `ready`
    statuses: Mutex<Vec<DeploymentStatus>>,
    /// reports `building` forever, for timeout tests
    stuck_building: bool,
    binds: Mutex<Vec<(String, EnvironmentBundle)>>,
    triggers: Mutex<Vec<(String, SourceRef, bool)>>,
    status_polls: AtomicUsize,
}

impl FakeProvider {
    fn new() -> Self {
        Self {
            projects: Mutex::new(HashMap::new()),
            domains_assigned: true,
            statuses: Mutex::new(Vec::new()),
            stuck_building: false,
            binds: Mutex::new(Vec::new()),
            triggers: Mutex::new(Vec::new()),
            status_polls: AtomicUsize::new(0),
        }
    }

    fn with_statuses(statuses: Vec<DeploymentStatus>) -> Self {
        Self {
            statuses: Mutex::new(statuses),
            ..Self::new()
        }
    }
}

#[async_trait]
impl DeployProvider for FakeProvider {
    async fn create_or_get_project(&self, name: &str) -> Result<ProjectHandle, CliError> {
        let mut projects = self.projects.lock().unwrap();
        if let Some(id) = projects.get(name) {
            return Ok(ProjectHandle {
                id: id.clone(),
                is_new: false,
            });
        }
        let id = format!("p{}", projects.len() + 1);
        projects.insert(name.to_string(), id.clone());
        Ok(ProjectHandle { id, is_new: true })
    }

    async fn bind_environment(
        &self,
        project_id: &str,
        bundle: &EnvironmentBundle,
    ) -> Result<(), CliError> {
        self.binds
            .lock()
            .unwrap()
            .push((project_id.to_string(), bundle.clone()));
        Ok(())
    }

    async fn get_domain(&self, project_id: &str) -> Result<String, CliError> {
        if !self.domains_assigned {
            return Err(CliError::DomainNotAssigned {
                project_id: project_id.to_string(),
            });
        }
        let projects = self.projects.lock().unwrap();
        let name = projects
            .iter()
            .find(|(_, id)| id.as_str() == project_id)
            .map(|(name, _)| name.clone())
            .ok_or_else(|| CliError::NotFound(project_id.to_string()))?;
        Ok(format!("{name}.example"))
    }

    async fn trigger_deployment(
        &self,
        project_id: &str,
        source: &SourceRef,
        is_new: bool,
    ) -> Result<Deployment, CliError> {
        let mut triggers = self.triggers.lock().unwrap();
        triggers.push((project_id.to_string(), source.clone(), is_new));
        Ok(Deployment {
            id: format!("d{}", triggers.len()),
            status: DeploymentStatus::Queued,
            url: None,
            inspect_url: None,
        })
    }

    async fn get_deployment(&self, deployment_id: &str) -> Result<Deployment, CliError> {
        self.status_polls.fetch_add(1, Ordering::SeqCst);
        let status = if self.stuck_building {
            DeploymentStatus::Building
        } else {
            let mut statuses = self.statuses.lock().unwrap();
            if statuses.is_empty() {
                DeploymentStatus::Ready
            } else {
                statuses.remove(0)
            }
        };
        Ok(Deployment {
            id: deployment_id.to_string(),
            status,
            url: None,
            inspect_url: Some(format!("https://logs.example/{deployment_id}")),
        })
    }
}

struct FakeCloud {
    /// statuses handed out by successive `task` reads; once drained the
    /// task reports `succeeded`
    task_statuses: Mutex<Vec<TaskStatus>>,
    submitted: Mutex<Vec<TaskOperation>>,
    installed_manifest: Mutex<Option<String>>,
}

impl FakeCloud {
    fn new() -> Self {
        Self {
            task_statuses: Mutex::new(Vec::new()),
            submitted: Mutex::new(Vec::new()),
            installed_manifest: Mutex::new(None),
        }
    }
}

#[async_trait]
impl CloudApi for FakeCloud {
    async fn submit(&self, operation: TaskOperation) -> Result<TaskHandle, CliError> {
        if let TaskOperation::InstallApp { manifest_url, .. } = &operation {
            *self.installed_manifest.lock().unwrap() = Some(manifest_url.clone());
        }
        let mut submitted = self.submitted.lock().unwrap();
        submitted.push(operation);
        Ok(TaskHandle {
            task_id: format!("t{}", submitted.len()),
        })
    }

    async fn task(&self, _task_id: &str) -> Result<Task, CliError> {
        let mut statuses = self.task_statuses.lock().unwrap();
        let status = if statuses.is_empty() {
            TaskStatus::Succeeded
        } else {
            statuses.remove(0)
        };
        Ok(Task {
            status,
            error: (status == TaskStatus::Failed).then(|| "remote failure".to_string()),
        })
    }

    async fn list_apps(&self, _environment: &str) -> Result<Vec<App>, CliError> {
        Ok(vec![App {
            id: "app-1".to_string(),
            name: "Checkout".to_string(),
            is_active: true,
            manifest_url: self.installed_manifest.lock().unwrap().clone(),
            created_at: None,
        }])
    }

    async fn find_app(&self, environment: &str, manifest_url: &str) -> Result<App, CliError> {
        self.list_apps(environment)
            .await?
            .into_iter()
            .find(|app| app.manifest_url.as_deref() == Some(manifest_url))
            .ok_or_else(|| CliError::NotFound(manifest_url.to_string()))
    }

    async fn create_app_token(
        &self,
        _environment: &str,
        _app_id: &str,
    ) -> Result<String, CliError> {
        Ok("tok-1".to_string())
    }

    async fn list_organizations(&self) -> Result<Vec<Organization>, CliError> {
        unimplemented!("not used by the orchestrator")
    }

    async fn list_backups(&self, _environment: &str) -> Result<Vec<Backup>, CliError> {
        unimplemented!("not used by the orchestrator")
    }
}

fn fast_options() -> DeployOptions {
    let poll = PollOptions {
        interval: Duration::from_millis(5),
        timeout: Duration::from_secs(2),
    };
    DeployOptions {
        task_poll: poll,
        deployment_poll: poll,
    }
}

fn request(name: &str, with_checkout: bool, dispatch: bool, ci: bool) -> DeployRequest {
    DeployRequest {
        name: name.to_string(),
        with_checkout,
        dispatch,
        ci,
        environment: "prod-1".to_string(),
        source: SourceRef {
            owner: "acme".to_string(),
            slug: name.to_string(),
            git_ref: "main".to_string(),
        },
    }
}

#[tokio::test]
async fn deploy_succeeds_after_three_status_polls() {
    let cloud = FakeCloud::new();
    let provider = FakeProvider::with_statuses(vec![
        DeploymentStatus::Queued,
        DeploymentStatus::Building,
        DeploymentStatus::Ready,
    ]);

    let outcome = deploy_storefront(
        &cloud,
        &provider,
        &request("demo-store", false, false, false),
        &fast_options(),
        EnvironmentBundle::new(),
    )
    .await
    .unwrap();

    assert!(outcome.waited);
    assert_eq!(outcome.deployment.id, "d1");
    assert_eq!(
        outcome.bundle.get(STOREFRONT_URL),
        Some("https://demo-store.example")
    );
    assert_eq!(provider.status_polls.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn deploy_fails_without_retry_when_build_errors() {
    let cloud = FakeCloud::new();
    let provider = FakeProvider::with_statuses(vec![
        DeploymentStatus::Building,
        DeploymentStatus::Error,
    ]);

    let result = deploy_storefront(
        &cloud,
        &provider,
        &request("demo-store", false, false, false),
        &fast_options(),
        EnvironmentBundle::new(),
    )
    .await;

    match result {
        Err(CliError::DeploymentFailed { id, status, inspect_url }) => {
            assert_eq!(id, "d1");
            assert_eq!(status, DeploymentStatus::Error);
            assert_eq!(inspect_url, "https://logs.example/d1");
        }
        other => panic!("unexpected outcome: {other:?}"),
    }
    assert_eq!(provider.triggers.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn dispatch_returns_without_polling() {
    let cloud = FakeCloud::new();
    let provider = FakeProvider::new();

    let outcome = deploy_storefront(
        &cloud,
        &provider,
        &request("demo-store", false, true, false),
        &fast_options(),
        EnvironmentBundle::new(),
    )
    .await
    .unwrap();

    assert!(!outcome.waited);
    assert_eq!(provider.status_polls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn ci_context_waits_despite_dispatch() {
    let cloud = FakeCloud::new();
    let provider = FakeProvider::new();

    let outcome = deploy_storefront(
        &cloud,
        &provider,
        &request("demo-store", false, true, true),
        &fast_options(),
        EnvironmentBundle::new(),
    )
    .await
    .unwrap();

    assert!(outcome.waited);
    assert!(provider.status_polls.load(Ordering::SeqCst) >= 1);
}

#[tokio::test]
async fn second_run_reuses_the_project() {
    let cloud = FakeCloud::new();
    let provider = FakeProvider::new();
    let req = request("demo-store", false, true, false);

    let first = deploy_storefront(
        &cloud,
        &provider,
        &req,
        &fast_options(),
        EnvironmentBundle::new(),
    )
    .await
    .unwrap();
    let second = deploy_storefront(
        &cloud,
        &provider,
        &req,
        &fast_options(),
        EnvironmentBundle::new(),
    )
    .await
    .unwrap();

    assert!(first.project.is_new);
    assert!(!second.project.is_new);
    assert_eq!(first.project.id, second.project.id);
    assert_eq!(provider.projects.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn checkout_keys_are_folded_into_the_storefront_bundle() {
    let cloud = FakeCloud::new();
    let provider = FakeProvider::new();

    let mut bundle = EnvironmentBundle::new();
    bundle.set("COMMERCE_API_URL", "https://prod-1.commerce.example/graphql/");
    bundle.set("EXISTING_KEY", "kept");

    let outcome = deploy_storefront(
        &cloud,
        &provider,
        &request("demo-store", true, false, false),
        &fast_options(),
        bundle,
    )
    .await
    .unwrap();

    // Two projects: the checkout app first, then the storefront.
    let binds = provider.binds.lock().unwrap();
    assert_eq!(binds.len(), 2);
    let storefront_bundle = &binds[1].1;

    assert_eq!(
        storefront_bundle.get(CHECKOUT_APP_URL),
        Some("https://demo-store-app-checkout.example")
    );
    assert_eq!(
        storefront_bundle.get(CHECKOUT_STOREFRONT_URL),
        Some("https://demo-store-app-checkout.example/checkout-spa")
    );
    assert_eq!(storefront_bundle.get(COMMERCE_APP_TOKEN), Some("tok-1"));
    assert_eq!(storefront_bundle.get(COMMERCE_APP_ID), Some("app-1"));
    // Pre-existing keys survive the fold.
    assert_eq!(storefront_bundle.get("EXISTING_KEY"), Some("kept"));
    assert_eq!(
        storefront_bundle.get("COMMERCE_API_URL"),
        Some("https://prod-1.commerce.example/graphql/")
    );

    // The install targeted the requested environment.
    let submitted = cloud.submitted.lock().unwrap();
    assert_eq!(submitted.len(), 1);
    match &submitted[0] {
        TaskOperation::InstallApp { environment, manifest_url } => {
            assert_eq!(environment, "prod-1");
            assert_eq!(
                manifest_url,
                "https://demo-store-app-checkout.example/api/manifest"
            );
        }
        other => panic!("unexpected operation: {other:?}"),
    }

    assert_eq!(
        outcome.bundle.get(STOREFRONT_URL),
        Some("https://demo-store.example")
    );
}

#[tokio::test]
async fn missing_domain_is_a_logged_fallback_not_a_failure() {
    let cloud = FakeCloud::new();
    let provider = FakeProvider {
        domains_assigned: false,
        ..FakeProvider::new()
    };

    let outcome = deploy_storefront(
        &cloud,
        &provider,
        &request("demo-store", false, true, false),
        &fast_options(),
        EnvironmentBundle::new(),
    )
    .await
    .unwrap();

    assert!(!outcome.bundle.contains_key(STOREFRONT_URL));
}

#[tokio::test]
async fn unrecognized_deployment_status_fails_the_wait() {
    let cloud = FakeCloud::new();
    let provider = FakeProvider::with_statuses(vec![DeploymentStatus::Unknown]);

    let result = deploy_storefront(
        &cloud,
        &provider,
        &request("demo-store", false, false, false),
        &fast_options(),
        EnvironmentBundle::new(),
    )
    .await;

    assert!(matches!(result, Err(CliError::UnknownStatus(_))));
}

#[tokio::test]
async fn wait_times_out_on_a_deployment_stuck_building() {
    let cloud = FakeCloud::new();
    let provider = FakeProvider {
        stuck_building: true,
        ..FakeProvider::new()
    };
    let options = DeployOptions {
        deployment_poll: PollOptions {
            interval: Duration::from_millis(5),
            timeout: Duration::from_millis(50),
        },
        ..fast_options()
    };

    let result = deploy_storefront(
        &cloud,
        &provider,
        &request("demo-store", false, false, false),
        &options,
        EnvironmentBundle::new(),
    )
    .await;

    match result {
        Err(CliError::DeploymentTimeout { id, .. }) => assert_eq!(id, "d1"),
        other => panic!("unexpected outcome: {other:?}"),
    }
}
