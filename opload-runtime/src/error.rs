//! Runtime error types

use opload_core::{DumpError, RemoteError, SeedBuildError, SeedPoolError};
use thiserror::Error;

/// Outcome of one task invocation
pub type TaskResult = Result<(), TaskError>;

/// Failure of a single task.
///
/// Recorded against the task name and never fatal to the virtual user.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TaskError {
    #[error(transparent)]
    Remote(#[from] RemoteError),

    #[error(transparent)]
    SeedPool(#[from] SeedPoolError),

    /// A task ran before its session bound the state it depends on
    #[error("Session state not initialised: {0}")]
    SessionNotStarted(&'static str),
}

/// Invalid task list handed to a scheduler
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScheduleError {
    #[error("Scheduler requires at least one task")]
    NoTasks,

    #[error("Task '{task}' has invalid weight {weight}; weights must be at least 1")]
    InvalidWeight { task: &'static str, weight: u32 },

    #[error("Failed to build weighted distribution: {0}")]
    Distribution(String),
}

/// Errors that prevent a run from starting or completing
#[derive(Error, Debug)]
pub enum RunError {
    #[error(transparent)]
    SeedBuild(#[from] SeedBuildError),

    #[error(transparent)]
    Dump(#[from] DumpError),

    #[error(transparent)]
    Schedule(#[from] ScheduleError),

    #[error("Unknown scenario '{0}'")]
    UnknownScenario(String),

    #[error("Scenario '{0}' declares no seed plan")]
    NoSeedPlan(String),

    #[error("Invalid run settings: {0}")]
    InvalidSettings(String),
}
