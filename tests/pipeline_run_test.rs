//! Sequential create/list/get scenario end to end against the fake bank

mod common;

use anyhow::Result;
use common::{capped_settings, client, init_test_tracing, instrumented, FakeBank};
use opload_core::HttpMethod;
use opload_runtime::scenarios::GetOperationWithoutSeeds;
use opload_runtime::{LoadRunner, RunController, StatsCollector, StopReason};
use std::sync::Arc;

#[tokio::test]
async fn test_pipeline_reads_back_its_own_operations() -> Result<()> {
    init_test_tracing();
    let bank = FakeBank::default();
    let base_url = bank.start().await?;
    let dumps = tempfile::tempdir()?;

    let plain = client(&base_url);
    let context = RunController::new(plain.clone(), dumps.path())
        .on_run_start(&GetOperationWithoutSeeds)
        .await?;
    assert!(context.seeds().is_none());
    assert!(bank.created_ids().is_empty());

    let stats = Arc::new(StatsCollector::new());
    let runner = LoadRunner::new(
        Arc::new(GetOperationWithoutSeeds),
        context,
        instrumented(plain, stats.clone()),
        stats,
        capped_settings(2, 6),
    );
    let report = runner.run_until(std::future::pending()).await?;

    assert_eq!(report.stop_reason, StopReason::Completed);
    assert_eq!(report.tasks_run(), 12);

    // Two full cycles per user
    let created = bank.created_ids();
    assert_eq!(created.len(), 4);
    assert_eq!(bank.list_calls(), 4);
    let mut gets = bank.get_calls();
    gets.sort_unstable();
    assert_eq!(gets, created);

    for (method, name) in [
        (HttpMethod::Post, "/api/v1/operations"),
        (HttpMethod::Get, "/api/v1/operations"),
        (HttpMethod::Get, "/api/v1/operations/{operation_id}"),
    ] {
        let entry = report.stats.entry(method, name).expect("entry");
        assert_eq!(entry.requests, 4, "{method} {name}");
        assert_eq!(entry.failures, 0);
    }
    assert!(!dumps.path().join("get_operation_without_seeds_seeds.json").exists());
    Ok(())
}

#[tokio::test]
async fn test_unreachable_service_is_recorded_not_fatal() -> Result<()> {
    init_test_tracing();
    let plain = client("http://127.0.0.1:9");
    let dumps = tempfile::tempdir()?;
    let context = RunController::new(plain.clone(), dumps.path())
        .on_run_start(&GetOperationWithoutSeeds)
        .await?;

    let stats = Arc::new(StatsCollector::new());
    let runner = LoadRunner::new(
        Arc::new(GetOperationWithoutSeeds),
        context,
        instrumented(plain, stats.clone()),
        stats,
        capped_settings(1, 3),
    );
    let report = runner.run_until(std::future::pending()).await?;

    assert_eq!(report.tasks_run(), 3);
    assert_eq!(report.users[0].tasks_failed, 2);
    // create and list fail; get has nothing stored and is skipped
    assert_eq!(report.stats.total.requests, 2);
    assert_eq!(report.stats.total.failures, 2);
    assert!(!report.stats.errors.is_empty());
    Ok(())
}
