//! Target service and HTTP client configuration

use crate::error::ConfigResult;
use crate::validation::{validate_http_url, validate_positive, validate_required_string, Validatable};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// HTTP client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// Base URL of the operations service
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout
    #[serde(
        with = "crate::domains::utils::serde_duration",
        default = "default_timeout"
    )]
    pub timeout: Duration,

    /// User agent string
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Whether to verify SSL certificates
    #[serde(default = "crate::domains::utils::default_true")]
    pub verify_ssl: bool,

    /// Connection pool configuration
    #[serde(default)]
    pub connection_pool: ConnectionPoolConfig,
}

/// Connection pool configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ConnectionPoolConfig {
    /// Maximum idle connections per host
    #[serde(default = "default_max_idle_per_host")]
    pub max_idle_per_host: usize,

    /// Idle connection timeout
    #[serde(
        with = "crate::domains::utils::serde_duration",
        default = "default_idle_timeout"
    )]
    pub idle_timeout: Duration,

    /// Connection timeout
    #[serde(
        with = "crate::domains::utils::serde_duration",
        default = "default_connection_timeout"
    )]
    pub connection_timeout: Duration,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout: default_timeout(),
            user_agent: default_user_agent(),
            verify_ssl: true,
            connection_pool: ConnectionPoolConfig::default(),
        }
    }
}

impl Default for ConnectionPoolConfig {
    fn default() -> Self {
        Self {
            max_idle_per_host: default_max_idle_per_host(),
            idle_timeout: default_idle_timeout(),
            connection_timeout: default_connection_timeout(),
        }
    }
}

impl Validatable for HttpConfig {
    fn validate(&self) -> ConfigResult<()> {
        validate_http_url(&self.base_url, "base_url", self.domain_name())?;
        validate_positive(self.timeout.as_secs(), "timeout", self.domain_name())?;
        validate_required_string(&self.user_agent, "user_agent", self.domain_name())?;
        self.connection_pool.validate()?;
        Ok(())
    }

    fn domain_name(&self) -> &'static str {
        "http"
    }
}

impl Validatable for ConnectionPoolConfig {
    fn validate(&self) -> ConfigResult<()> {
        validate_positive(
            self.max_idle_per_host,
            "max_idle_per_host",
            self.domain_name(),
        )?;

        validate_positive(
            self.idle_timeout.as_secs(),
            "idle_timeout",
            self.domain_name(),
        )?;

        validate_positive(
            self.connection_timeout.as_secs(),
            "connection_timeout",
            self.domain_name(),
        )?;

        Ok(())
    }

    fn domain_name(&self) -> &'static str {
        "http.connection_pool"
    }
}

// Default value functions
fn default_base_url() -> String {
    "http://localhost:8003".to_string()
}

fn default_timeout() -> Duration {
    Duration::from_secs(100)
}

fn default_user_agent() -> String {
    format!("opload/{}", env!("CARGO_PKG_VERSION"))
}

fn default_max_idle_per_host() -> usize {
    32
}

fn default_idle_timeout() -> Duration {
    Duration::from_secs(90)
}

fn default_connection_timeout() -> Duration {
    Duration::from_secs(10)
}
