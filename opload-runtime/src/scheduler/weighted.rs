use super::Scheduler;
use crate::error::ScheduleError;
use crate::task::Task;
use rand::distributions::{Distribution, WeightedIndex};
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Picks each task with probability `weight / sum(weights)`, independently
/// per iteration.
pub struct WeightedScheduler<S> {
    tasks: Vec<Task<S>>,
    index: WeightedIndex<u32>,
    rng: StdRng,
}

impl<S> WeightedScheduler<S> {
    pub fn new(tasks: Vec<Task<S>>) -> Result<Self, ScheduleError> {
        Self::with_rng(tasks, StdRng::from_entropy())
    }

    /// Deterministic variant for reproducible selection sequences
    pub fn with_seed(tasks: Vec<Task<S>>, seed: u64) -> Result<Self, ScheduleError> {
        Self::with_rng(tasks, StdRng::seed_from_u64(seed))
    }

    fn with_rng(tasks: Vec<Task<S>>, rng: StdRng) -> Result<Self, ScheduleError> {
        if tasks.is_empty() {
            return Err(ScheduleError::NoTasks);
        }
        if let Some(task) = tasks.iter().find(|t| t.weight == 0) {
            return Err(ScheduleError::InvalidWeight {
                task: task.name,
                weight: task.weight,
            });
        }

        let index = WeightedIndex::new(tasks.iter().map(|t| t.weight))
            .map_err(|e| ScheduleError::Distribution(e.to_string()))?;

        Ok(Self { tasks, index, rng })
    }

    pub fn tasks(&self) -> &[Task<S>] {
        &self.tasks
    }
}

impl<S: Send> Scheduler<S> for WeightedScheduler<S> {
    fn next_task(&mut self) -> Option<Task<S>> {
        let i = self.index.sample(&mut self.rng);
        self.tasks.get(i).copied()
    }

    fn kind(&self) -> &'static str {
        "weighted"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TaskResult;
    use futures::future::BoxFuture;
    use std::collections::HashMap;

    struct Nothing;

    fn noop(_: &mut Nothing) -> BoxFuture<'_, TaskResult> {
        Box::pin(async { Ok(()) })
    }

    fn tasks(weights: &[(&'static str, u32)]) -> Vec<Task<Nothing>> {
        weights
            .iter()
            .map(|&(name, weight)| Task::new(name, noop).with_weight(weight))
            .collect()
    }

    fn frequencies(scheduler: &mut WeightedScheduler<Nothing>, n: usize) -> HashMap<&'static str, f64> {
        let mut counts: HashMap<&'static str, usize> = HashMap::new();
        for _ in 0..n {
            let task = scheduler.next_task().unwrap();
            *counts.entry(task.name).or_default() += 1;
        }
        counts
            .into_iter()
            .map(|(name, count)| (name, count as f64 / n as f64))
            .collect()
    }

    #[test]
    fn test_frequencies_converge_to_weights() {
        let mut scheduler =
            WeightedScheduler::with_seed(tasks(&[("list", 1), ("get", 3)]), 42).unwrap();

        let freq = frequencies(&mut scheduler, 10_000);

        assert!((freq["list"] - 0.25).abs() < 0.02, "list frequency {}", freq["list"]);
        assert!((freq["get"] - 0.75).abs() < 0.02, "get frequency {}", freq["get"]);
    }

    #[test]
    fn test_single_task_always_selected() {
        let mut scheduler = WeightedScheduler::with_seed(tasks(&[("only", 5)]), 1).unwrap();
        for _ in 0..100 {
            assert_eq!(scheduler.next_task().unwrap().name, "only");
        }
    }

    #[test]
    fn test_same_seed_same_sequence() {
        let mut a = WeightedScheduler::with_seed(tasks(&[("a", 2), ("b", 1), ("c", 1)]), 7).unwrap();
        let mut b = WeightedScheduler::with_seed(tasks(&[("a", 2), ("b", 1), ("c", 1)]), 7).unwrap();

        for _ in 0..200 {
            assert_eq!(a.next_task().unwrap().name, b.next_task().unwrap().name);
        }
    }

    #[test]
    fn test_zero_weight_is_rejected() {
        let err = WeightedScheduler::new(tasks(&[("list", 1), ("get", 0)])).err();
        assert_eq!(err, Some(ScheduleError::InvalidWeight { task: "get", weight: 0 }));
    }

    #[test]
    fn test_empty_task_list_is_rejected() {
        assert_eq!(
            WeightedScheduler::<Nothing>::new(Vec::new()).err(),
            Some(ScheduleError::NoTasks)
        );
    }
}
