//! Statistics sink interface
//!
//! Every instrumented gateway call produces one [`RequestEvent`]. The sink is
//! a pass-through side channel: recording must never block on aggregation and
//! must never fail the calling action.

use crate::types::HttpMethod;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;

/// Timing and outcome of one remote call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestEvent {
    pub method: HttpMethod,
    /// Route template, e.g. `/api/v1/operations/{operation_id}`
    pub name: String,
    pub response_time: Duration,
    pub success: bool,
    /// Display form of the failure, if any
    pub error: Option<String>,
}

impl RequestEvent {
    pub fn success(method: HttpMethod, name: impl Into<String>, response_time: Duration) -> Self {
        Self {
            method,
            name: name.into(),
            response_time,
            success: true,
            error: None,
        }
    }

    pub fn failure(
        method: HttpMethod,
        name: impl Into<String>,
        response_time: Duration,
        error: impl Into<String>,
    ) -> Self {
        Self {
            method,
            name: name.into(),
            response_time,
            success: false,
            error: Some(error.into()),
        }
    }
}

/// Receiver of request and task outcomes
pub trait MetricsSink: Send + Sync {
    /// Record the outcome of one remote call
    fn record_request(&self, event: RequestEvent);

    /// Record a task that failed; remote failures are also recorded here
    /// so that per-task error counts are visible next to request stats
    fn record_task_error(&self, _task: &str, _error: &str) {}
}

/// Sink handle shared across virtual users
pub type SharedSink = Arc<dyn MetricsSink>;

/// Sink that discards everything
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopSink;

impl MetricsSink for NoopSink {
    fn record_request(&self, _event: RequestEvent) {}
}
