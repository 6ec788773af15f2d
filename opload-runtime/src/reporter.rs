//! Progress logging, final table and JSON export

use crate::shutdown::StopSignal;
use crate::stats::{StatsCollector, StatsSnapshot};
use std::fmt::Write as _;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::task::JoinHandle;
use tracing::info;

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("Failed to write report {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to serialize report: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// One-line summary for periodic logging
pub fn progress_line(snapshot: &StatsSnapshot) -> String {
    let total = &snapshot.total;
    format!(
        "{:.0}s elapsed | {} requests | {} failures ({:.1}%) | {:.1} req/s | median {}ms | p95 {}ms",
        snapshot.elapsed_secs,
        total.requests,
        total.failures,
        total.failure_ratio() * 100.0,
        total.requests_per_sec,
        total.median_ms,
        total.p95_ms
    )
}

/// Log a progress line every `interval` until stopped
pub fn spawn_progress(stats: Arc<StatsCollector>, interval: Duration, stop: StopSignal) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        // First tick fires immediately
        ticker.tick().await;
        loop {
            tokio::select! {
                _ = ticker.tick() => info!("{}", progress_line(&stats.snapshot())),
                _ = stop.stopped() => break,
            }
        }
    })
}

/// Fixed-width statistics table, one row per request entry
pub fn render_table(snapshot: &StatsSnapshot) -> String {
    let mut out = String::new();
    let rule = "-".repeat(118);

    let _ = writeln!(
        out,
        "{:<6} {:<40} {:>8} {:>8} {:>8} {:>8} {:>8} {:>8} {:>8} {:>8}",
        "Type", "Name", "# reqs", "# fails", "Avg", "Min", "Max", "Med", "p95", "req/s"
    );
    let _ = writeln!(out, "{}", rule);

    for entry in snapshot.entries.iter().chain(std::iter::once(&snapshot.total)) {
        if entry.method.is_none() {
            let _ = writeln!(out, "{}", rule);
        }
        let _ = writeln!(
            out,
            "{:<6} {:<40} {:>8} {:>8} {:>8.0} {:>8} {:>8} {:>8} {:>8} {:>8.2}",
            entry.method.map(|m| m.as_str()).unwrap_or(""),
            entry.name,
            entry.requests,
            entry.failures,
            entry.avg_ms,
            entry.min_ms,
            entry.max_ms,
            entry.median_ms,
            entry.p95_ms,
            entry.requests_per_sec
        );
    }

    if !snapshot.errors.is_empty() {
        let _ = writeln!(out, "\nErrors");
        let _ = writeln!(out, "{}", rule);
        for error in &snapshot.errors {
            let _ = writeln!(
                out,
                "{:>8}  {} {}: {}",
                error.occurrences, error.method, error.name, error.error
            );
        }
    }

    if !snapshot.task_errors.is_empty() {
        let _ = writeln!(out, "\nTask errors");
        let _ = writeln!(out, "{}", rule);
        for error in &snapshot.task_errors {
            let _ = writeln!(out, "{:>8}  {}: {}", error.occurrences, error.task, error.error);
        }
    }

    out
}

/// Write a snapshot as pretty JSON
pub async fn write_json(snapshot: &StatsSnapshot, path: &Path) -> Result<(), ReportError> {
    let content = serde_json::to_string_pretty(snapshot)?;
    tokio::fs::write(path, content)
        .await
        .map_err(|source| ReportError::Io {
            path: path.display().to_string(),
            source,
        })?;
    info!("Statistics written to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use opload_core::{HttpMethod, MetricsSink, RequestEvent};
    use tempfile::TempDir;

    fn populated() -> StatsSnapshot {
        let stats = StatsCollector::new();
        stats.record_request(RequestEvent::success(
            HttpMethod::Get,
            "/api/v1/operations",
            Duration::from_millis(12),
        ));
        stats.record_request(RequestEvent::failure(
            HttpMethod::Post,
            "/api/v1/operations",
            Duration::from_millis(30),
            "Unexpected status 500 from /api/v1/operations",
        ));
        stats.record_task_error("create_operation", "Unexpected status 500 from /api/v1/operations");
        stats.snapshot()
    }

    #[test]
    fn test_table_lists_entries_and_errors() {
        let table = render_table(&populated());

        assert!(table.contains("GET"));
        assert!(table.contains("POST"));
        assert!(table.contains("Aggregated"));
        assert!(table.contains("Task errors"));
        assert!(table.contains("create_operation"));
    }

    #[test]
    fn test_progress_line_mentions_failures() {
        let line = progress_line(&populated());
        assert!(line.contains("2 requests"));
        assert!(line.contains("1 failures (50.0%)"));
    }

    #[tokio::test]
    async fn test_json_export() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("stats.json");

        write_json(&populated(), &path).await.unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value["total"]["requests"], 2);
        assert_eq!(value["entries"].as_array().unwrap().len(), 2);
        assert!(value["total"].get("method").is_none());
    }
}
