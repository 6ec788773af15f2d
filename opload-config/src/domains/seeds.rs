//! Seed provisioning configuration

use crate::error::ConfigResult;
use crate::validation::Validatable;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SeedsConfig {
    /// Directory seed dumps are written to
    #[serde(default = "default_dumps_dir")]
    pub dumps_dir: PathBuf,

    /// Replaces the operation count of the scenario's seed plan
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operations_count: Option<usize>,
}

impl Default for SeedsConfig {
    fn default() -> Self {
        Self {
            dumps_dir: default_dumps_dir(),
            operations_count: None,
        }
    }
}

impl Validatable for SeedsConfig {
    fn validate(&self) -> ConfigResult<()> {
        if self.dumps_dir.as_os_str().is_empty() {
            return Err(self.validation_error("dumps_dir cannot be empty"));
        }
        Ok(())
    }

    fn domain_name(&self) -> &'static str {
        "seeds"
    }
}

fn default_dumps_dir() -> PathBuf {
    PathBuf::from("dumps")
}
