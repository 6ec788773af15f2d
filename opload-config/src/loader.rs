//! Configuration loading and environment variable handling

use crate::domains::http::HttpConfig;
use crate::domains::logging::{LogFormat, LogLevel, LoggingConfig};
use crate::domains::run::RunConfig;
use crate::domains::seeds::SeedsConfig;
use crate::domains::utils::parse_duration;
use crate::domains::OploadConfig;
use crate::error::{ConfigError, ConfigResult};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

/// Configuration loader with environment variable support
pub struct ConfigLoader {
    /// Environment variable prefix
    prefix: String,
}

impl ConfigLoader {
    /// Create a new config loader with default prefix
    pub fn new() -> Self {
        Self {
            prefix: "OPLOAD".to_string(),
        }
    }

    /// Create a new config loader with custom prefix
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    /// Load configuration from a YAML file with environment overrides
    pub fn from_file(&self, path: impl AsRef<Path>) -> ConfigResult<OploadConfig> {
        let path = path.as_ref();
        log::debug!("Loading configuration from {}", path.display());

        let content = std::fs::read_to_string(path)?;
        let mut config: OploadConfig = serde_yaml::from_str(&content)?;

        self.apply_env_overrides(&mut config)?;
        config.validate_all()?;

        Ok(config)
    }

    /// Load configuration from environment variables only
    pub fn from_env(&self) -> ConfigResult<OploadConfig> {
        let mut config = OploadConfig::default();
        self.apply_env_overrides(&mut config)?;
        config.validate_all()?;
        Ok(config)
    }

    /// Load configuration with fallback chain
    pub fn load(&self, config_path: Option<impl AsRef<Path>>) -> ConfigResult<OploadConfig> {
        match config_path {
            Some(path) => self.from_file(path),
            None => self.from_env(),
        }
    }

    /// Apply environment variable overrides to configuration
    fn apply_env_overrides(&self, config: &mut OploadConfig) -> ConfigResult<()> {
        self.apply_http_overrides(&mut config.http)?;
        self.apply_logging_overrides(&mut config.logging)?;
        self.apply_run_overrides(&mut config.run)?;
        self.apply_seeds_overrides(&mut config.seeds)?;
        Ok(())
    }

    /// Apply HTTP config overrides
    fn apply_http_overrides(&self, config: &mut HttpConfig) -> ConfigResult<()> {
        if let Ok(base_url) = self.get_env_var("HTTP_BASE_URL") {
            config.base_url = base_url;
        }

        if let Some(seconds) = self.parse_env_var::<u64>("HTTP_TIMEOUT")? {
            config.timeout = Duration::from_secs(seconds);
        }

        if let Ok(user_agent) = self.get_env_var("HTTP_USER_AGENT") {
            config.user_agent = user_agent;
        }

        if let Some(verify_ssl) = self.parse_env_var("HTTP_VERIFY_SSL")? {
            config.verify_ssl = verify_ssl;
        }

        Ok(())
    }

    /// Apply logging config overrides
    fn apply_logging_overrides(&self, config: &mut LoggingConfig) -> ConfigResult<()> {
        if let Ok(log_level) = self.get_env_var("LOG_LEVEL") {
            config.level = LogLevel::from_str(&log_level)
                .map_err(|_| ConfigError::EnvError(format!("Invalid LOG_LEVEL: {}", log_level)))?;
        }

        if let Ok(format) = self.get_env_var("LOG_FORMAT") {
            config.format = LogFormat::from_str(&format)
                .map_err(|_| ConfigError::EnvError(format!("Invalid LOG_FORMAT: {}", format)))?;
        }

        Ok(())
    }

    /// Apply load shape overrides
    fn apply_run_overrides(&self, config: &mut RunConfig) -> ConfigResult<()> {
        if let Some(users) = self.parse_env_var("RUN_USERS")? {
            config.users = users;
        }

        if let Some(spawn_rate) = self.parse_env_var("RUN_SPAWN_RATE")? {
            config.spawn_rate = spawn_rate;
        }

        if let Ok(run_time) = self.get_env_var("RUN_TIME") {
            let run_time = parse_duration(&run_time)
                .map_err(|e| ConfigError::EnvError(format!("Invalid RUN_TIME: {}", e)))?;
            config.run_time = Some(run_time);
        }

        Ok(())
    }

    /// Apply seed provisioning overrides
    fn apply_seeds_overrides(&self, config: &mut SeedsConfig) -> ConfigResult<()> {
        if let Ok(dumps_dir) = self.get_env_var("SEEDS_DUMPS_DIR") {
            config.dumps_dir = PathBuf::from(dumps_dir);
        }

        if let Some(count) = self.parse_env_var("SEEDS_OPERATIONS_COUNT")? {
            config.operations_count = Some(count);
        }

        Ok(())
    }

    /// Get environment variable with prefix
    fn get_env_var(&self, name: &str) -> Result<String, std::env::VarError> {
        std::env::var(format!("{}_{}", self.prefix, name))
    }

    /// Parse a prefixed environment variable if it is set
    fn parse_env_var<T>(&self, name: &str) -> ConfigResult<Option<T>>
    where
        T: FromStr,
        T::Err: std::fmt::Display,
    {
        match self.get_env_var(name) {
            Ok(value) => value
                .trim()
                .parse()
                .map(Some)
                .map_err(|e| ConfigError::EnvError(format!("Invalid {}: {}", name, e))),
            Err(_) => Ok(None),
        }
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}
