//! Subcommand handlers

pub mod config;
pub mod run;
pub mod scenarios;
pub mod seed;

use anyhow::{Context, Result};
use opload_config::{ConfigLoader, OploadConfig};
use opload_core::SharedGateway;
use opload_http::{ClientConfig, OperationsClient};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Where the effective configuration came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    File(PathBuf),
    /// The requested file does not exist; defaults plus environment were used
    MissingFile(PathBuf),
    Environment,
}

impl ConfigSource {
    /// Report the source; called once tracing is initialized
    pub fn log(&self) {
        match self {
            ConfigSource::File(path) => info!("Loaded configuration from: {:?}", path),
            ConfigSource::MissingFile(path) => {
                warn!("Configuration file not found: {:?}. Using defaults.", path)
            }
            ConfigSource::Environment => {
                debug!("No configuration file specified. Loaded from environment or defaults.")
            }
        }
    }
}

/// Load configuration from `config_path` when it exists, else from the environment
pub fn load_config(config_path: Option<&Path>) -> Result<(OploadConfig, ConfigSource)> {
    let loader = ConfigLoader::new();

    match config_path {
        Some(path) if path.exists() => {
            let config = loader
                .from_file(path)
                .with_context(|| format!("Failed to load configuration from {:?}", path))?;
            Ok((config, ConfigSource::File(path.to_path_buf())))
        }
        Some(path) => {
            let config = loader
                .from_env()
                .context("Failed to load configuration from environment")?;
            Ok((config, ConfigSource::MissingFile(path.to_path_buf())))
        }
        None => {
            let config = loader
                .from_env()
                .context("Failed to load configuration from environment")?;
            Ok((config, ConfigSource::Environment))
        }
    }
}

/// Uninstrumented reqwest gateway for the configured service
pub fn build_client(config: &OploadConfig) -> Result<SharedGateway> {
    let client = OperationsClient::new(ClientConfig::from(config.http.clone()))
        .context("Failed to build HTTP client")?;
    Ok(Arc::new(client))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("absent.yaml");

        let (config, source) = load_config(Some(path.as_path())).unwrap();

        assert_eq!(source, ConfigSource::MissingFile(path));
        assert!(config.run.users >= 1);
    }

    #[test]
    fn test_existing_file_is_reported_as_source() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("opload.yaml");
        std::fs::write(&path, "run:\n  users: 4\n").unwrap();

        let (_, source) = load_config(Some(path.as_path())).unwrap();

        assert_eq!(source, ConfigSource::File(path));
    }

    #[test]
    fn test_no_path_uses_environment() {
        let (_, source) = load_config(None).unwrap();
        assert_eq!(source, ConfigSource::Environment);
    }
}
