//! iceScrum implementation of the host-facing task repository.

use async_trait::async_trait;
use icescrum_api::{IceScrumClient, IceScrumError, NormalizedTask, Result};
use log::{debug, info, warn};

use crate::identity::{derive_identity, ServerIdentity};
use crate::redact_log_details;
use crate::settings::RepositorySettings;
use crate::task::Task;

const PRESENTABLE_PREFIX: &str = "iceScrum: ";
const INVALID_PARAMETERS: &str = "invalid parameters";

/// Capabilities a task-tracking host needs from a remote repository.
#[async_trait]
pub trait TaskRepository: Send + Sync {
    type Item: Task + Send;

    /// True when credentials are present and the URL yields a server root and project key.
    fn is_configured(&self) -> bool;

    fn presentable_name(&self) -> String;

    /// Fetches every task of the project in server order. Zero tasks is a valid result.
    async fn list_tasks(&self) -> Result<Vec<Self::Item>>;

    /// Strict self-test used before saving settings: zero tasks counts as a failure.
    async fn test_connection(&self) -> Result<()>;

    async fn find_task(&self, id: &str) -> Result<Option<Self::Item>>;
}

/// Task repository backed by one iceScrum project. Identity is re-derived from the raw URL on every call.
#[derive(Clone, Debug, Default)]
pub struct IceScrumRepository {
    settings: RepositorySettings,
}

impl IceScrumRepository {
    pub fn new(settings: RepositorySettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &RepositorySettings {
        &self.settings
    }

    /// Replaces the stored settings, e.g. after the host's settings form was edited.
    pub fn update_settings(&mut self, settings: RepositorySettings) {
        self.settings = settings;
    }

    pub fn identity(&self) -> Option<ServerIdentity> {
        derive_identity(&self.settings.url)
    }

    /// Builds a client from a fresh identity snapshot, refusing before any I/O when unconfigured.
    fn configured_client(&self) -> Result<IceScrumClient> {
        if !self.settings.has_credentials() {
            return Err(IceScrumError::NotConfigured(
                "username and password are required".to_string(),
            ));
        }
        let identity = self.identity().ok_or_else(|| {
            IceScrumError::NotConfigured(
                "the URL must look like https://server/p/PROJECTKEY".to_string(),
            )
        })?;
        IceScrumClient::new(self.settings.client_config(&identity))
    }
}

#[async_trait]
impl TaskRepository for IceScrumRepository {
    type Item = NormalizedTask;

    fn is_configured(&self) -> bool {
        self.settings.has_credentials() && self.identity().is_some()
    }

    fn presentable_name(&self) -> String {
        let key = self
            .identity()
            .map(|identity| identity.project_key)
            .unwrap_or_else(|| INVALID_PARAMETERS.to_string());
        format!("{PRESENTABLE_PREFIX}{key}")
    }

    async fn list_tasks(&self) -> Result<Vec<NormalizedTask>> {
        let client = self.configured_client()?;
        match client.list_tasks().await {
            Ok(tasks) => {
                debug!("{}: fetched {} tasks", self.presentable_name(), tasks.len());
                Ok(tasks)
            }
            Err(err) => {
                warn!(
                    "{}: task fetch failed: {}",
                    self.presentable_name(),
                    redact_log_details(&err.to_string())
                );
                Err(err)
            }
        }
    }

    async fn test_connection(&self) -> Result<()> {
        let client = self.configured_client()?;
        client.check_access().await?;

        let tasks = client.list_tasks().await?;
        if tasks.is_empty() {
            warn!("{}: connection works but no tasks were returned", self.presentable_name());
            return Err(IceScrumError::EmptyResult);
        }

        info!("{}: connection test passed ({} tasks)", self.presentable_name(), tasks.len());
        Ok(())
    }

    /// The task web service has no single-task endpoint, so lookups never hit the network.
    async fn find_task(&self, id: &str) -> Result<Option<NormalizedTask>> {
        debug!("single task lookup for {id} is not supported by iceScrum");
        Ok(None)
    }
}
