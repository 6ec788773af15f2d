//! Seed dump persistence
//!
//! Each seeded run leaves one pretty-printed JSON file per scenario behind,
//! `<dumps_dir>/<scenario>_seeds.json`, overwritten by the next run.

use super::plan::SeedsPlan;
use super::result::SeedsResult;
use crate::error::DumpError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::info;

/// What a seeded run persisted
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeedDump {
    pub scenario: String,
    pub created_at: DateTime<Utc>,
    pub plan: SeedsPlan,
    pub result: SeedsResult,
}

/// Location of a scenario's dump inside `dir`
pub fn dump_path(dir: &Path, scenario: &str) -> PathBuf {
    dir.join(format!("{}_seeds.json", scenario))
}

impl SeedDump {
    pub fn new(scenario: impl Into<String>, plan: SeedsPlan, result: SeedsResult) -> Self {
        Self {
            scenario: scenario.into(),
            created_at: Utc::now(),
            plan,
            result,
        }
    }

    /// Write the dump into `dir`, creating the directory if needed
    pub async fn write(&self, dir: &Path) -> Result<PathBuf, DumpError> {
        let path = dump_path(dir, &self.scenario);
        let content = serde_json::to_string_pretty(self)?;

        tokio::fs::create_dir_all(dir).await.map_err(|source| DumpError::Io {
            path: dir.display().to_string(),
            source,
        })?;
        tokio::fs::write(&path, content).await.map_err(|source| DumpError::Io {
            path: path.display().to_string(),
            source,
        })?;

        info!("Seed dump written to {}", path.display());
        Ok(path)
    }

    pub async fn read(path: &Path) -> Result<Self, DumpError> {
        let content = tokio::fs::read_to_string(path).await.map_err(|source| DumpError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Ok(serde_json::from_str(&content)?)
    }
}
