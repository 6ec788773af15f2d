//! Request statistics collector
//!
//! Response times are kept in rounded buckets rather than as raw samples,
//! so memory stays bounded over long runs while percentiles remain accurate
//! to the bucket width (1ms below 100ms, 10ms below 1s, 100ms above).

use opload_core::{HttpMethod, MetricsSink, RequestEvent};
use parking_lot::{Mutex, RwLock};
use serde::Serialize;
use std::collections::BTreeMap;
use std::time::{Duration, Instant};

/// Name of the aggregated row
pub const AGGREGATED: &str = "Aggregated";

#[derive(Debug, Clone, Default)]
struct EntryStats {
    requests: u64,
    failures: u64,
    total_ms: u64,
    min_ms: Option<u64>,
    max_ms: u64,
    /// rounded response time (ms) -> count
    buckets: BTreeMap<u64, u64>,
}

impl EntryStats {
    fn record(&mut self, response_ms: u64, success: bool) {
        self.requests += 1;
        if !success {
            self.failures += 1;
        }
        self.total_ms += response_ms;
        self.min_ms = Some(self.min_ms.map_or(response_ms, |m| m.min(response_ms)));
        self.max_ms = self.max_ms.max(response_ms);
        *self.buckets.entry(bucket(response_ms)).or_insert(0) += 1;
    }

    fn merge(&mut self, other: &EntryStats) {
        self.requests += other.requests;
        self.failures += other.failures;
        self.total_ms += other.total_ms;
        self.min_ms = match (self.min_ms, other.min_ms) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        };
        self.max_ms = self.max_ms.max(other.max_ms);
        for (bucket, count) in &other.buckets {
            *self.buckets.entry(*bucket).or_insert(0) += count;
        }
    }

    /// Smallest bucket covering `fraction` of the requests
    fn percentile(&self, fraction: f64) -> u64 {
        if self.requests == 0 {
            return 0;
        }
        let target = ((self.requests as f64) * fraction).ceil().max(1.0) as u64;
        let mut seen = 0;
        for (bucket, count) in &self.buckets {
            seen += count;
            if seen >= target {
                return *bucket;
            }
        }
        self.max_ms
    }

    fn snapshot(&self, method: Option<HttpMethod>, name: &str, elapsed: Duration) -> EntrySnapshot {
        let secs = elapsed.as_secs_f64();
        EntrySnapshot {
            method,
            name: name.to_string(),
            requests: self.requests,
            failures: self.failures,
            avg_ms: if self.requests == 0 {
                0.0
            } else {
                self.total_ms as f64 / self.requests as f64
            },
            min_ms: self.min_ms.unwrap_or(0),
            max_ms: self.max_ms,
            median_ms: self.percentile(0.50),
            p95_ms: self.percentile(0.95),
            p99_ms: self.percentile(0.99),
            requests_per_sec: if secs > 0.0 {
                self.requests as f64 / secs
            } else {
                0.0
            },
        }
    }
}

fn bucket(response_ms: u64) -> u64 {
    match response_ms {
        0..=99 => response_ms,
        100..=999 => (response_ms + 5) / 10 * 10,
        _ => (response_ms + 50) / 100 * 100,
    }
}

/// One row of the statistics table
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EntrySnapshot {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub method: Option<HttpMethod>,
    pub name: String,
    pub requests: u64,
    pub failures: u64,
    pub avg_ms: f64,
    pub min_ms: u64,
    pub max_ms: u64,
    pub median_ms: u64,
    pub p95_ms: u64,
    pub p99_ms: u64,
    pub requests_per_sec: f64,
}

impl EntrySnapshot {
    pub fn failure_ratio(&self) -> f64 {
        if self.requests == 0 {
            0.0
        } else {
            self.failures as f64 / self.requests as f64
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorSnapshot {
    pub method: HttpMethod,
    pub name: String,
    pub error: String,
    pub occurrences: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaskErrorSnapshot {
    pub task: String,
    pub error: String,
    pub occurrences: u64,
}

/// Point-in-time copy of everything collected
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatsSnapshot {
    pub elapsed_secs: f64,
    pub entries: Vec<EntrySnapshot>,
    pub total: EntrySnapshot,
    pub errors: Vec<ErrorSnapshot>,
    pub task_errors: Vec<TaskErrorSnapshot>,
}

impl StatsSnapshot {
    pub fn entry(&self, method: HttpMethod, name: &str) -> Option<&EntrySnapshot> {
        self.entries
            .iter()
            .find(|e| e.method == Some(method) && e.name == name)
    }
}

/// Thread-safe [`MetricsSink`] aggregating per `(method, route)` entries
pub struct StatsCollector {
    entries: RwLock<BTreeMap<(HttpMethod, String), EntryStats>>,
    errors: Mutex<BTreeMap<(HttpMethod, String, String), u64>>,
    task_errors: Mutex<BTreeMap<(String, String), u64>>,
    started: Mutex<Instant>,
}

impl StatsCollector {
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(BTreeMap::new()),
            errors: Mutex::new(BTreeMap::new()),
            task_errors: Mutex::new(BTreeMap::new()),
            started: Mutex::new(Instant::now()),
        }
    }

    /// Clear everything and restart the clock, e.g. once seeding is done
    pub fn reset(&self) {
        self.entries.write().clear();
        self.errors.lock().clear();
        self.task_errors.lock().clear();
        *self.started.lock() = Instant::now();
    }

    pub fn elapsed(&self) -> Duration {
        self.started.lock().elapsed()
    }

    pub fn snapshot(&self) -> StatsSnapshot {
        let elapsed = self.elapsed();
        let entries = self.entries.read();

        let mut total = EntryStats::default();
        let rows = entries
            .iter()
            .map(|((method, name), stats)| {
                total.merge(stats);
                stats.snapshot(Some(*method), name, elapsed)
            })
            .collect();

        let errors = self
            .errors
            .lock()
            .iter()
            .map(|((method, name, error), occurrences)| ErrorSnapshot {
                method: *method,
                name: name.clone(),
                error: error.clone(),
                occurrences: *occurrences,
            })
            .collect();

        let task_errors = self
            .task_errors
            .lock()
            .iter()
            .map(|((task, error), occurrences)| TaskErrorSnapshot {
                task: task.clone(),
                error: error.clone(),
                occurrences: *occurrences,
            })
            .collect();

        StatsSnapshot {
            elapsed_secs: elapsed.as_secs_f64(),
            entries: rows,
            total: total.snapshot(None, AGGREGATED, elapsed),
            errors,
            task_errors,
        }
    }
}

impl Default for StatsCollector {
    fn default() -> Self {
        Self::new()
    }
}

impl MetricsSink for StatsCollector {
    fn record_request(&self, event: RequestEvent) {
        let response_ms = event.response_time.as_millis() as u64;

        self.entries
            .write()
            .entry((event.method, event.name.clone()))
            .or_default()
            .record(response_ms, event.success);

        if let Some(error) = event.error {
            *self
                .errors
                .lock()
                .entry((event.method, event.name, error))
                .or_insert(0) += 1;
        }
    }

    fn record_task_error(&self, task: &str, error: &str) {
        *self
            .task_errors
            .lock()
            .entry((task.to_string(), error.to_string()))
            .or_insert(0) += 1;
    }
}
