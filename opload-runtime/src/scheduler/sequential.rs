use super::Scheduler;
use crate::error::ScheduleError;
use crate::task::Task;

/// Runs tasks strictly in declaration order, wrapping around after the last.
pub struct SequentialScheduler<S> {
    tasks: Vec<Task<S>>,
    position: usize,
}

impl<S> SequentialScheduler<S> {
    pub fn new(tasks: Vec<Task<S>>) -> Result<Self, ScheduleError> {
        if tasks.is_empty() {
            return Err(ScheduleError::NoTasks);
        }
        Ok(Self { tasks, position: 0 })
    }

    /// Index of the task [`next_task`](Scheduler::next_task) will return
    pub fn position(&self) -> usize {
        self.position
    }
}

impl<S: Send> Scheduler<S> for SequentialScheduler<S> {
    fn next_task(&mut self) -> Option<Task<S>> {
        let task = self.tasks.get(self.position).copied();
        self.position = (self.position + 1) % self.tasks.len();
        task
    }

    fn kind(&self) -> &'static str {
        "sequential"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TaskResult;
    use futures::future::BoxFuture;

    struct Nothing;

    fn noop(_: &mut Nothing) -> BoxFuture<'_, TaskResult> {
        Box::pin(async { Ok(()) })
    }

    #[test]
    fn test_declaration_order_repeats() {
        let mut scheduler = SequentialScheduler::new(vec![
            Task::new("create", noop),
            Task::new("list", noop),
            Task::new("get", noop),
        ])
        .unwrap();

        let names: Vec<_> = (0..7).map(|_| scheduler.next_task().unwrap().name).collect();
        assert_eq!(names, vec!["create", "list", "get", "create", "list", "get", "create"]);
        assert_eq!(scheduler.position(), 1);
    }

    #[test]
    fn test_weights_are_ignored() {
        let mut scheduler = SequentialScheduler::new(vec![
            Task::new("a", noop).with_weight(10),
            Task::new("b", noop),
        ])
        .unwrap();

        assert_eq!(scheduler.next_task().unwrap().name, "a");
        assert_eq!(scheduler.next_task().unwrap().name, "b");
        assert_eq!(scheduler.next_task().unwrap().name, "a");
    }

    #[test]
    fn test_empty_task_list_is_rejected() {
        assert!(matches!(
            SequentialScheduler::<Nothing>::new(Vec::new()),
            Err(ScheduleError::NoTasks)
        ));
    }
}
