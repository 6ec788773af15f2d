//! Task descriptors

use crate::error::TaskResult;
use futures::future::BoxFuture;
use std::fmt;

/// Entry point of a task: borrows the session state for one invocation
pub type TaskFn<S> = for<'a> fn(&'a mut S) -> BoxFuture<'a, TaskResult>;

/// A named action a virtual user can perform.
///
/// The weight only matters to the weighted scheduler; the sequential
/// scheduler runs tasks in declaration order and ignores it.
pub struct Task<S> {
    pub name: &'static str,
    pub weight: u32,
    pub run: TaskFn<S>,
}

impl<S> Task<S> {
    pub fn new(name: &'static str, run: TaskFn<S>) -> Self {
        Self {
            name,
            weight: 1,
            run,
        }
    }

    pub fn with_weight(mut self, weight: u32) -> Self {
        self.weight = weight;
        self
    }
}

// Manual impls: a fn pointer is Copy whatever `S` is
impl<S> Clone for Task<S> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<S> Copy for Task<S> {}

impl<S> fmt::Debug for Task<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Task")
            .field("name", &self.name)
            .field("weight", &self.weight)
            .finish()
    }
}
