use super::build_client;
use anyhow::{Context, Result};
use opload_config::OploadConfig;
use opload_runtime::{RunController, ScenarioRegistry};

pub async fn handle_seed(
    mut config: OploadConfig,
    scenario: &str,
    count: Option<usize>,
    base_url: Option<String>,
) -> Result<()> {
    if let Some(base_url) = base_url {
        config.http.base_url = base_url;
    }
    if count.is_some() {
        config.seeds.operations_count = count;
    }
    config.validate_all().context("Invalid command line overrides")?;

    let scenario = ScenarioRegistry::with_builtin().get(scenario)?;
    let controller = RunController::from_config(build_client(&config)?, &config.seeds);
    let (dump, path) = controller
        .seed_only(scenario.as_ref())
        .await
        .context("Seeding failed")?;

    println!(
        "Created {} operations for {}; dump written to {}",
        dump.result.len(),
        dump.scenario,
        path.display()
    );
    Ok(())
}
