use opload_runtime::ScenarioRegistry;

pub fn handle_scenarios() {
    let registry = ScenarioRegistry::with_builtin();
    for scenario in registry.list() {
        let seeds = match scenario.seed_plan() {
            Some(plan) => format!("{} seed operations", plan.operations_count()),
            None => "no seeds".to_string(),
        };
        println!("{:<32} {} ({})", scenario.name(), scenario.description(), seeds);
    }
}
