use super::build_client;
use crate::cli::RunArgs;
use anyhow::{Context, Result};
use opload_config::OploadConfig;
use opload_http::InstrumentedGateway;
use opload_runtime::{
    reporter, LoadRunner, RunController, RunSettings, ScenarioRegistry, StatsCollector,
};
use std::sync::Arc;
use tracing::info;

/// Apply command line overrides on top of file and environment configuration
pub fn apply_overrides(config: &mut OploadConfig, args: &RunArgs) -> Result<()> {
    if let Some(users) = args.users {
        config.run.users = users;
    }
    if let Some(spawn_rate) = args.spawn_rate {
        config.run.spawn_rate = spawn_rate;
    }
    if let Some(run_time) = args.run_time {
        config.run.run_time = Some(run_time);
    }
    if let Some(iterations) = args.iterations {
        config.run.iterations = Some(iterations);
    }
    if let Some(base_url) = &args.base_url {
        config.http.base_url = base_url.clone();
    }
    if let Some(count) = args.seed_count {
        config.seeds.operations_count = Some(count);
    }
    config
        .validate_all()
        .context("Invalid command line overrides")?;
    Ok(())
}

pub async fn handle_run(mut config: OploadConfig, args: RunArgs) -> Result<()> {
    apply_overrides(&mut config, &args)?;

    let scenario = ScenarioRegistry::with_builtin().get(&args.scenario)?;
    let client = build_client(&config)?;

    info!("Target service: {}", config.http.base_url);
    let controller = RunController::from_config(Arc::clone(&client), &config.seeds);
    let context = controller
        .on_run_start(scenario.as_ref())
        .await
        .context("Run start-up failed; no load was generated")?;

    let stats = Arc::new(StatsCollector::new());
    let gateway = Arc::new(InstrumentedGateway::new(client, stats.clone()));
    let mut settings = RunSettings::from(&config.run);
    settings.rng_seed = args.rng_seed;

    let report = LoadRunner::new(scenario, context, gateway, stats, settings)
        .run()
        .await?;

    println!("{}", reporter::render_table(&report.stats));
    println!(
        "Run of {} stopped ({}) after {:.1}s: {} tasks by {} users",
        report.scenario,
        report.stop_reason,
        report.duration_secs,
        report.tasks_run(),
        report.users.len()
    );

    if let Some(path) = &args.stats_json {
        reporter::write_json(&report.stats, path)
            .await
            .context("Failed to export statistics")?;
    }
    Ok(())
}
