//! Scenario registration

use crate::error::{RunError, ScheduleError};
use crate::user::User;
use crate::wait::WaitTime;
use opload_core::{RunContext, SeedsPlan, SharedGateway, SharedSink};
use std::collections::BTreeMap;
use std::sync::Arc;

/// Everything a scenario needs to build one virtual user
#[derive(Clone)]
pub struct UserEnvironment {
    pub user_id: usize,
    /// Instrumented gateway for task traffic
    pub gateway: SharedGateway,
    pub context: Arc<RunContext>,
    pub sink: SharedSink,
    pub wait_time: WaitTime,
    /// Per-user task cap
    pub iterations: Option<u64>,
    /// Fixes the user's RNG for reproducible runs
    pub rng_seed: Option<u64>,
}

/// A named user behaviour plus its seed requirements
pub trait Scenario: Send + Sync {
    fn name(&self) -> &'static str;

    fn description(&self) -> &'static str;

    /// Seeds the run controller must provision before any user starts
    fn seed_plan(&self) -> Option<SeedsPlan> {
        None
    }

    fn new_user(&self, env: UserEnvironment) -> Result<Box<dyn User>, ScheduleError>;
}

/// Scenarios addressable by name
#[derive(Default, Clone)]
pub struct ScenarioRegistry {
    scenarios: BTreeMap<&'static str, Arc<dyn Scenario>>,
}

impl ScenarioRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding every built-in scenario
    pub fn with_builtin() -> Self {
        let mut registry = Self::new();
        registry.register(Arc::new(crate::scenarios::GetOperationWithSeeds));
        registry.register(Arc::new(crate::scenarios::GetOperationWithoutSeeds));
        registry
    }

    /// Add a scenario, returning any previous one with the same name
    pub fn register(&mut self, scenario: Arc<dyn Scenario>) -> Option<Arc<dyn Scenario>> {
        self.scenarios.insert(scenario.name(), scenario)
    }

    pub fn get(&self, name: &str) -> Result<Arc<dyn Scenario>, RunError> {
        self.scenarios
            .get(name)
            .cloned()
            .ok_or_else(|| RunError::UnknownScenario(name.to_string()))
    }

    /// Scenarios in name order
    pub fn list(&self) -> impl Iterator<Item = &Arc<dyn Scenario>> {
        self.scenarios.values()
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.scenarios.keys().copied().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_scenarios_are_registered() {
        let registry = ScenarioRegistry::with_builtin();
        assert_eq!(
            registry.names(),
            vec!["get_operation_with_seeds", "get_operation_without_seeds"]
        );
        assert!(registry.get("get_operation_with_seeds").unwrap().seed_plan().is_some());
        assert!(registry.get("get_operation_without_seeds").unwrap().seed_plan().is_none());
    }

    #[test]
    fn test_unknown_scenario() {
        let registry = ScenarioRegistry::with_builtin();
        let err = registry.get("nope").err().unwrap();
        assert_eq!(err.to_string(), "Unknown scenario 'nope'");
    }

    #[test]
    fn test_register_replaces_same_name() {
        let mut registry = ScenarioRegistry::with_builtin();
        let previous = registry.register(Arc::new(crate::scenarios::GetOperationWithSeeds));
        assert!(previous.is_some());
        assert_eq!(registry.list().count(), 2);
    }
}
