//! Run start-up: seed provisioning and run context construction

use crate::error::RunError;
use crate::scenario::Scenario;
use opload_config::SeedsConfig;
use opload_core::{RunContext, SeedDump, SeedPool, SeedsBuilder, SeedsPlan, SharedGateway};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{error, info};

/// Prepares the shared state of a run before any user is spawned.
///
/// Seeding goes through the gateway given here, which should be the
/// uninstrumented one: seed traffic is not part of the run statistics.
pub struct RunController {
    seeding_gateway: SharedGateway,
    dumps_dir: PathBuf,
    operations_count: Option<usize>,
}

impl RunController {
    pub fn new(seeding_gateway: SharedGateway, dumps_dir: impl Into<PathBuf>) -> Self {
        Self {
            seeding_gateway,
            dumps_dir: dumps_dir.into(),
            operations_count: None,
        }
    }

    pub fn from_config(seeding_gateway: SharedGateway, config: &SeedsConfig) -> Self {
        Self::new(seeding_gateway, config.dumps_dir.clone())
            .with_operations_count(config.operations_count)
    }

    /// Replace the operation count of every scenario's seed plan
    pub fn with_operations_count(mut self, count: Option<usize>) -> Self {
        self.operations_count = count;
        self
    }

    pub fn dumps_dir(&self) -> &Path {
        &self.dumps_dir
    }

    /// Seed plan after applying the configured count override
    pub fn effective_plan(&self, scenario: &dyn Scenario) -> Option<SeedsPlan> {
        scenario.seed_plan().map(|plan| match self.operations_count {
            Some(count) => SeedsPlan::with_operations(count),
            None => plan,
        })
    }

    /// Build the run context for `scenario`.
    ///
    /// Seeds are built and dumped first when the scenario declares a plan.
    /// Any failure here aborts the run before traffic starts.
    pub async fn on_run_start(&self, scenario: &dyn Scenario) -> Result<Arc<RunContext>, RunError> {
        let context = match self.effective_plan(scenario) {
            Some(plan) => {
                let dump = self.provision(scenario.name(), plan).await?;
                RunContext::seeded(scenario.name(), SeedPool::from(dump.result))
            }
            None => {
                info!("Scenario {} needs no seeds", scenario.name());
                RunContext::unseeded(scenario.name())
            }
        };
        Ok(Arc::new(context))
    }

    /// Build and dump seeds without starting a run
    pub async fn seed_only(&self, scenario: &dyn Scenario) -> Result<(SeedDump, PathBuf), RunError> {
        let plan = self
            .effective_plan(scenario)
            .ok_or_else(|| RunError::NoSeedPlan(scenario.name().to_string()))?;
        let dump = self.provision(scenario.name(), plan).await?;
        let path = opload_core::seeds::dump_path(&self.dumps_dir, scenario.name());
        Ok((dump, path))
    }

    async fn provision(&self, scenario: &str, plan: SeedsPlan) -> Result<SeedDump, RunError> {
        info!(
            "Provisioning seeds for {}: {} operations",
            scenario,
            plan.operations_count()
        );

        let result = SeedsBuilder::new(self.seeding_gateway.clone())
            .build(&plan)
            .await
            .inspect_err(|e| error!("Seed build for {} failed: {}", scenario, e))?;

        let dump = SeedDump::new(scenario, plan, result);
        dump.write(&self.dumps_dir).await?;
        Ok(dump)
    }
}
