//! HTTP client configuration

use opload_config::HttpConfig as ConfigHttpConfig;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Settings the reqwest client is built from
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Base URL of the operations service
    pub base_url: String,

    /// Per-request timeout
    pub timeout: Duration,

    /// User agent string
    pub user_agent: String,

    /// Whether to verify SSL certificates
    pub verify_ssl: bool,

    /// Maximum idle connections per host
    pub max_idle_per_host: usize,

    /// Idle connection timeout
    pub idle_timeout: Duration,

    /// Connection establishment timeout
    pub connect_timeout: Duration,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        ConfigHttpConfig::default().into()
    }
}

impl From<ConfigHttpConfig> for ClientConfig {
    fn from(config: ConfigHttpConfig) -> Self {
        Self {
            base_url: config.base_url,
            timeout: config.timeout,
            user_agent: config.user_agent,
            verify_ssl: config.verify_ssl,
            max_idle_per_host: config.connection_pool.max_idle_per_host,
            idle_timeout: config.connection_pool.idle_timeout,
            connect_timeout: config.connection_pool.connection_timeout,
        }
    }
}
