use crate::metrics::{MetricsSink, RequestEvent};
use parking_lot::Mutex;

/// Sink that keeps every event for later inspection
#[derive(Debug, Default)]
pub struct RecordingSink {
    requests: Mutex<Vec<RequestEvent>>,
    task_errors: Mutex<Vec<(String, String)>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn requests(&self) -> Vec<RequestEvent> {
        self.requests.lock().clone()
    }

    pub fn task_errors(&self) -> Vec<(String, String)> {
        self.task_errors.lock().clone()
    }
}

impl MetricsSink for RecordingSink {
    fn record_request(&self, event: RequestEvent) {
        self.requests.lock().push(event);
    }

    fn record_task_error(&self, task: &str, error: &str) {
        self.task_errors.lock().push((task.to_string(), error.to_string()));
    }
}
