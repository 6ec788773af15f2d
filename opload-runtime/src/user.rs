//! Virtual users
//!
//! A virtual user owns one session state and one scheduler and loops
//! `pick -> execute -> pause` until stopped or until its iteration cap is
//! reached. Task failures are recorded and the loop continues.

use crate::error::TaskResult;
use crate::scenario::UserEnvironment;
use crate::scheduler::Scheduler;
use crate::shutdown::StopSignal;
use crate::wait::WaitTime;
use async_trait::async_trait;
use opload_core::SharedSink;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;
use tracing::{debug, warn};

/// Task name failed session starts are recorded under
pub const ON_START: &str = "on_start";

/// Per-user state with lifecycle hooks
#[async_trait]
pub trait Session: Send + 'static {
    /// Runs once before the first task. An error ends this user only.
    async fn on_session_start(&mut self) -> TaskResult {
        Ok(())
    }

    /// Runs once after the last task, including after a stop
    async fn on_session_end(&mut self) {}
}

/// What a virtual user did during the run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct UserSummary {
    pub user_id: usize,
    pub tasks_succeeded: u64,
    pub tasks_failed: u64,
    /// `false` when `on_session_start` failed and no task ran
    pub started: bool,
}

impl UserSummary {
    pub fn tasks_run(&self) -> u64 {
        self.tasks_succeeded + self.tasks_failed
    }
}

/// A spawnable actor
#[async_trait]
pub trait User: Send {
    async fn run(self: Box<Self>, stop: StopSignal) -> UserSummary;
}

/// Schedulers seed from the user seed itself; think-time draws from a
/// separate stream so pause lengths are independent of task choice.
fn think_time_seed(seed: u64) -> u64 {
    seed ^ 0x9E37_79B9_7F4A_7C15
}

pub struct VirtualUser<S: Session> {
    user_id: usize,
    session: S,
    scheduler: Box<dyn Scheduler<S>>,
    wait_time: WaitTime,
    iterations: Option<u64>,
    sink: SharedSink,
    rng: StdRng,
}

impl<S: Session> VirtualUser<S> {
    pub fn new(session: S, scheduler: Box<dyn Scheduler<S>>, env: &UserEnvironment) -> Self {
        let rng = match env.rng_seed {
            Some(seed) => StdRng::seed_from_u64(think_time_seed(seed)),
            None => StdRng::from_entropy(),
        };
        Self {
            user_id: env.user_id,
            session,
            scheduler,
            wait_time: env.wait_time,
            iterations: env.iterations,
            sink: env.sink.clone(),
            rng,
        }
    }

    fn iterations_exhausted(&self, summary: &UserSummary) -> bool {
        self.iterations
            .is_some_and(|limit| summary.tasks_run() >= limit)
    }
}

#[async_trait]
impl<S: Session> User for VirtualUser<S> {
    async fn run(mut self: Box<Self>, stop: StopSignal) -> UserSummary {
        let mut summary = UserSummary {
            user_id: self.user_id,
            ..UserSummary::default()
        };

        if let Err(e) = self.session.on_session_start().await {
            warn!("User {} failed to start: {}", self.user_id, e);
            self.sink.record_task_error(ON_START, &e.to_string());
            return summary;
        }
        summary.started = true;
        debug!(
            "User {} started with {} scheduler",
            self.user_id,
            self.scheduler.kind()
        );

        while !stop.is_stopped() && !self.iterations_exhausted(&summary) {
            let Some(task) = self.scheduler.next_task() else {
                break;
            };

            match (task.run)(&mut self.session).await {
                Ok(()) => summary.tasks_succeeded += 1,
                Err(e) => {
                    debug!("User {} task {} failed: {}", self.user_id, task.name, e);
                    self.sink.record_task_error(task.name, &e.to_string());
                    summary.tasks_failed += 1;
                }
            }

            if self.iterations_exhausted(&summary) {
                break;
            }

            let pause = self.wait_time.sample(&mut self.rng);
            if !pause.is_zero() && stop.sleep(pause).await {
                break;
            }
        }

        self.session.on_session_end().await;
        debug!(
            "User {} finished after {} tasks",
            self.user_id,
            summary.tasks_run()
        );
        summary
    }
}
