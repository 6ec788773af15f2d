//! Domain-specific configuration modules

pub mod http;
pub mod logging;
pub mod run;
pub mod seeds;
pub mod utils;

use crate::error::ConfigResult;
use crate::validation::Validatable;
use serde::{Deserialize, Serialize};

/// Main opload configuration combining all domains
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct OploadConfig {
    /// Target service and HTTP client configuration
    #[serde(default)]
    pub http: http::HttpConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: logging::LoggingConfig,

    /// Load shape: users, spawn rate, duration, think-time
    #[serde(default)]
    pub run: run::RunConfig,

    /// Seed provisioning configuration
    #[serde(default)]
    pub seeds: seeds::SeedsConfig,
}

impl OploadConfig {
    /// Validate all domain configurations
    pub fn validate_all(&self) -> ConfigResult<()> {
        self.http.validate()?;
        self.logging.validate()?;
        self.run.validate()?;
        self.seeds.validate()?;
        Ok(())
    }

    /// Generate a sample configuration file
    pub fn generate_sample() -> String {
        let config = OploadConfig::default();
        serde_yaml::to_string(&config)
            .unwrap_or_else(|_| "# Failed to generate sample config".to_string())
    }
}
