//! Host runner: spawns virtual users, stops them, collects the report

use crate::error::RunError;
use crate::reporter;
use crate::scenario::{Scenario, UserEnvironment};
use crate::shutdown::{StopHandle, StopReason};
use crate::stats::{StatsCollector, StatsSnapshot};
use crate::user::UserSummary;
use crate::wait::WaitTime;
use chrono::{DateTime, Utc};
use opload_config::RunConfig;
use opload_core::{RunContext, SharedGateway};
use parking_lot::Mutex;
use serde::Serialize;
use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::task::JoinSet;
use tracing::{error, info, warn};

/// Load shape of one run
#[derive(Debug, Clone)]
pub struct RunSettings {
    pub users: usize,
    /// Users started per second
    pub spawn_rate: f64,
    pub run_time: Option<Duration>,
    pub iterations: Option<u64>,
    pub wait_time: WaitTime,
    pub report_interval: Duration,
    /// Base seed for per-user RNGs; user `n` gets `seed + n`
    pub rng_seed: Option<u64>,
}

impl RunSettings {
    fn validate(&self) -> Result<(), RunError> {
        if self.users == 0 {
            return Err(RunError::InvalidSettings("users must be at least 1".into()));
        }
        if !self.spawn_rate.is_finite() || self.spawn_rate <= 0.0 {
            return Err(RunError::InvalidSettings(format!(
                "spawn_rate must be positive, got {}",
                self.spawn_rate
            )));
        }
        if self.report_interval.is_zero() {
            return Err(RunError::InvalidSettings("report_interval must be positive".into()));
        }
        self.spawn_gap().map(|_| ())
    }

    fn spawn_gap(&self) -> Result<Duration, RunError> {
        Duration::try_from_secs_f64(1.0 / self.spawn_rate).map_err(|e| {
            RunError::InvalidSettings(format!("spawn_rate {} is too small: {}", self.spawn_rate, e))
        })
    }
}

impl Default for RunSettings {
    fn default() -> Self {
        (&RunConfig::default()).into()
    }
}

impl From<&RunConfig> for RunSettings {
    fn from(config: &RunConfig) -> Self {
        Self {
            users: config.users,
            spawn_rate: config.spawn_rate,
            run_time: config.run_time,
            iterations: config.iterations,
            wait_time: config.wait_time.into(),
            report_interval: config.report_interval,
            rng_seed: None,
        }
    }
}

/// Outcome of a finished run
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub scenario: String,
    pub started_at: DateTime<Utc>,
    pub duration_secs: f64,
    pub stop_reason: StopReason,
    pub users: Vec<UserSummary>,
    pub stats: StatsSnapshot,
}

impl RunReport {
    pub fn tasks_run(&self) -> u64 {
        self.users.iter().map(UserSummary::tasks_run).sum()
    }
}

pub struct LoadRunner {
    scenario: Arc<dyn Scenario>,
    context: Arc<RunContext>,
    gateway: SharedGateway,
    stats: Arc<StatsCollector>,
    settings: RunSettings,
}

impl LoadRunner {
    /// `gateway` should already report to `stats`
    pub fn new(
        scenario: Arc<dyn Scenario>,
        context: Arc<RunContext>,
        gateway: SharedGateway,
        stats: Arc<StatsCollector>,
        settings: RunSettings,
    ) -> Self {
        Self {
            scenario,
            context,
            gateway,
            stats,
            settings,
        }
    }

    /// Run until the run time elapses, every user finishes, or Ctrl+C
    pub async fn run(self) -> Result<RunReport, RunError> {
        self.run_until(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                warn!("Ctrl+C handler unavailable: {}", e);
                std::future::pending::<()>().await;
            }
        })
        .await
    }

    /// Like [`run`](Self::run) with a caller-supplied interrupt
    pub async fn run_until<F>(self, interrupt: F) -> Result<RunReport, RunError>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        self.settings.validate()?;
        let gap = self.settings.spawn_gap()?;

        let (handle, signal) = StopHandle::channel();
        let handle = Arc::new(handle);
        let reason: Arc<Mutex<Option<StopReason>>> = Arc::new(Mutex::new(None));

        self.stats.reset();
        let started_at = Utc::now();
        let started = Instant::now();
        info!(
            "Starting {} with {} users at {}/s",
            self.scenario.name(),
            self.settings.users,
            self.settings.spawn_rate
        );

        let watchdog = {
            let handle = Arc::clone(&handle);
            let reason = Arc::clone(&reason);
            let run_time = self.settings.run_time;
            tokio::spawn(async move {
                let deadline = async {
                    match run_time {
                        Some(run_time) => tokio::time::sleep(run_time).await,
                        None => std::future::pending::<()>().await,
                    }
                };
                let stopped_by = tokio::select! {
                    _ = deadline => StopReason::RunTimeElapsed,
                    _ = interrupt => StopReason::Interrupted,
                };
                info!("Stopping run: {}", stopped_by);
                reason.lock().get_or_insert(stopped_by);
                handle.stop();
            })
        };
        let progress = reporter::spawn_progress(
            Arc::clone(&self.stats),
            self.settings.report_interval,
            signal.clone(),
        );

        let mut users = JoinSet::new();
        for user_id in 0..self.settings.users {
            if signal.is_stopped() {
                break;
            }

            let env = UserEnvironment {
                user_id,
                gateway: Arc::clone(&self.gateway),
                context: Arc::clone(&self.context),
                sink: self.stats.clone(),
                wait_time: self.settings.wait_time,
                iterations: self.settings.iterations,
                rng_seed: self.settings.rng_seed.map(|s| s.wrapping_add(user_id as u64)),
            };
            let user = match self.scenario.new_user(env) {
                Ok(user) => user,
                Err(e) => {
                    error!("Failed to create user {}: {}", user_id, e);
                    handle.stop();
                    watchdog.abort();
                    users.shutdown().await;
                    return Err(e.into());
                }
            };
            users.spawn(user.run(signal.clone()));

            if user_id + 1 < self.settings.users && signal.sleep(gap).await {
                break;
            }
        }
        info!("{} users spawned", users.len());

        let mut summaries = Vec::with_capacity(users.len());
        while let Some(joined) = users.join_next().await {
            match joined {
                Ok(summary) => summaries.push(summary),
                Err(e) => error!("User task ended abnormally: {}", e),
            }
        }

        let stop_reason = *reason.lock().get_or_insert(StopReason::Completed);
        handle.stop();
        watchdog.abort();
        if let Err(e) = progress.await {
            warn!("Progress reporter ended abnormally: {}", e);
        }

        summaries.sort_by_key(|s| s.user_id);
        let report = RunReport {
            scenario: self.scenario.name().to_string(),
            started_at,
            duration_secs: started.elapsed().as_secs_f64(),
            stop_reason,
            users: summaries,
            stats: self.stats.snapshot(),
        };
        info!(
            "Run finished ({}): {} tasks by {} users in {:.1}s",
            report.stop_reason,
            report.tasks_run(),
            report.users.len(),
            report.duration_secs
        );
        Ok(report)
    }
}
