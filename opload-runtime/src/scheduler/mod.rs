//! Per-user task selection
//!
//! A scheduler only decides which task runs next. Think-time, stop
//! handling and error accounting live in [`VirtualUser`](crate::VirtualUser).

pub mod sequential;
pub mod weighted;

pub use sequential::SequentialScheduler;
pub use weighted::WeightedScheduler;

use crate::task::Task;

pub trait Scheduler<S>: Send {
    /// Task to run next, or `None` when the schedule is exhausted
    fn next_task(&mut self) -> Option<Task<S>>;

    /// Short label used in logs
    fn kind(&self) -> &'static str;
}
