//! Run-scoped context handed to every virtual user

use crate::error::SeedPoolError;
use crate::seeds::{SeedOperationResult, SeedPool};
use chrono::{DateTime, Utc};
use std::sync::Arc;

/// Everything a virtual user may read about the current run.
///
/// Built once by the run controller before any user starts and shared
/// behind an `Arc`. The seed pool is the only mutable part.
#[derive(Debug)]
pub struct RunContext {
    scenario: String,
    seeds: Option<Arc<SeedPool>>,
    started_at: DateTime<Utc>,
}

impl RunContext {
    /// Context for a scenario that declares no seed plan
    pub fn unseeded(scenario: impl Into<String>) -> Self {
        Self {
            scenario: scenario.into(),
            seeds: None,
            started_at: Utc::now(),
        }
    }

    pub fn seeded(scenario: impl Into<String>, pool: SeedPool) -> Self {
        Self {
            scenario: scenario.into(),
            seeds: Some(Arc::new(pool)),
            started_at: Utc::now(),
        }
    }

    pub fn scenario(&self) -> &str {
        &self.scenario
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    pub fn seeds(&self) -> Option<&Arc<SeedPool>> {
        self.seeds.as_ref()
    }

    fn pool(&self) -> Result<&SeedPool, SeedPoolError> {
        self.seeds.as_deref().ok_or(SeedPoolError::NotSeeded)
    }

    /// Random, non-destructive pick from the seed pool
    pub fn get_random_operation(&self) -> Result<SeedOperationResult, SeedPoolError> {
        self.pool()?.random_pick()
    }

    /// Destructive FIFO take from the seed pool
    pub fn get_next_operation(&self) -> Result<SeedOperationResult, SeedPoolError> {
        self.pool()?.take_next()
    }
}
