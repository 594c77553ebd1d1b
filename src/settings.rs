//! Raw repository settings as stored by the host.

use std::fmt;
use std::time::Duration;

use icescrum_api::config::{DEFAULT_CONNECT_TIMEOUT_SECS, DEFAULT_TIMEOUT_SECS};
use icescrum_api::ClientConfig;
use serde::{Deserialize, Serialize};

use crate::identity::ServerIdentity;

/// Relaxed certificate checks are on unless the host turns them off.
fn default_accept_invalid_certs() -> bool {
    true
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

fn default_connect_timeout_secs() -> u64 {
    DEFAULT_CONNECT_TIMEOUT_SECS
}

/// Represents the repository settings kept by the host: project URL, credentials and transport options.
#[derive(Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct RepositorySettings {
    pub url: String,
    pub username: String,
    pub password: String,
    #[serde(default = "default_accept_invalid_certs")]
    pub accept_invalid_certs: bool,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
}

impl RepositorySettings {
    pub fn new(
        url: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            url: url.into(),
            username: username.into(),
            password: password.into(),
            accept_invalid_certs: default_accept_invalid_certs(),
            timeout_secs: default_timeout_secs(),
            connect_timeout_secs: default_connect_timeout_secs(),
        }
    }

    pub fn has_credentials(&self) -> bool {
        !self.username.is_empty() && !self.password.is_empty()
    }

    /// Client configuration for the given derived identity.
    pub fn client_config(&self, identity: &ServerIdentity) -> ClientConfig {
        ClientConfig::new(
            identity.base_url.clone(),
            identity.project_key.clone(),
            self.username.clone(),
            self.password.clone(),
        )
        .with_timeout(Duration::from_secs(self.timeout_secs))
        .with_connect_timeout(Duration::from_secs(self.connect_timeout_secs))
        .with_accept_invalid_certs(self.accept_invalid_certs)
    }
}

impl Default for RepositorySettings {
    /// Returns empty, unconfigured settings with default transport options.
    fn default() -> Self {
        Self::new("", "", "")
    }
}

impl fmt::Debug for RepositorySettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RepositorySettings")
            .field("url", &self.url)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("accept_invalid_certs", &self.accept_invalid_certs)
            .field("timeout_secs", &self.timeout_secs)
            .field("connect_timeout_secs", &self.connect_timeout_secs)
            .finish()
    }
}
