//! Load generation runtime for opload
//!
//! Virtual users pick tasks through a [`Scheduler`], pause between tasks
//! according to a [`WaitTime`] and report outcomes to a [`StatsCollector`].
//! [`RunController`] provisions seed data before the first user starts and
//! [`LoadRunner`] drives the run until it is stopped.

pub mod controller;
pub mod error;
pub mod reporter;
pub mod runner;
pub mod scenario;
pub mod scenarios;
pub mod scheduler;
pub mod shutdown;
pub mod stats;
pub mod task;
pub mod user;
pub mod wait;

// Re-export commonly used types
pub use controller::RunController;
pub use error::{RunError, ScheduleError, TaskError, TaskResult};
pub use reporter::ReportError;
pub use runner::{LoadRunner, RunReport, RunSettings};
pub use scenario::{Scenario, ScenarioRegistry, UserEnvironment};
pub use scheduler::{Scheduler, SequentialScheduler, WeightedScheduler};
pub use shutdown::{StopHandle, StopReason, StopSignal};
pub use stats::{StatsCollector, StatsSnapshot};
pub use task::Task;
pub use user::{Session, User, UserSummary, VirtualUser};
pub use wait::WaitTime;
