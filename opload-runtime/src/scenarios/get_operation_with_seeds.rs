//! Read-heavy traffic against a pre-seeded pool of operations
//!
//! Each user binds to one randomly picked seed on start and then mixes
//! list and get-one calls, three gets for every list on average.

use crate::error::{ScheduleError, TaskError, TaskResult};
use crate::scenario::{Scenario, UserEnvironment};
use crate::scheduler::WeightedScheduler;
use crate::task::Task;
use crate::user::{Session, User, VirtualUser};
use async_trait::async_trait;
use futures::future::BoxFuture;
use opload_core::{RunContext, SeedOperationResult, SeedsPlan, SharedGateway};
use std::sync::Arc;
use tracing::debug;

const SEEDED_OPERATIONS: usize = 20;

pub struct GetOperationWithSeeds;

pub struct SeededSession {
    gateway: SharedGateway,
    context: Arc<RunContext>,
    seed: Option<SeedOperationResult>,
}

impl SeededSession {
    pub fn new(gateway: SharedGateway, context: Arc<RunContext>) -> Self {
        Self {
            gateway,
            context,
            seed: None,
        }
    }

    pub fn seed(&self) -> Option<SeedOperationResult> {
        self.seed
    }
}

#[async_trait]
impl Session for SeededSession {
    async fn on_session_start(&mut self) -> TaskResult {
        let seed = self.context.get_random_operation()?;
        debug!("Session bound to operation {}", seed.operation_id);
        self.seed = Some(seed);
        Ok(())
    }
}

fn get_operations(session: &mut SeededSession) -> BoxFuture<'_, TaskResult> {
    Box::pin(async move {
        session.gateway.get_operations().await?;
        Ok(())
    })
}

fn get_operation(session: &mut SeededSession) -> BoxFuture<'_, TaskResult> {
    Box::pin(async move {
        let seed = session
            .seed
            .ok_or(TaskError::SessionNotStarted("seed operation"))?;
        session.gateway.get_operation(seed.operation_id).await?;
        Ok(())
    })
}

pub fn tasks() -> Vec<Task<SeededSession>> {
    vec![
        Task::new("get_operations", get_operations).with_weight(1),
        Task::new("get_operation", get_operation).with_weight(3),
    ]
}

impl Scenario for GetOperationWithSeeds {
    fn name(&self) -> &'static str {
        "get_operation_with_seeds"
    }

    fn description(&self) -> &'static str {
        "Seeds 20 operations, then mixes list (weight 1) and get-one (weight 3) on a per-user seed"
    }

    fn seed_plan(&self) -> Option<SeedsPlan> {
        Some(SeedsPlan::with_operations(SEEDED_OPERATIONS))
    }

    fn new_user(&self, env: UserEnvironment) -> Result<Box<dyn User>, ScheduleError> {
        let scheduler = match env.rng_seed {
            Some(seed) => WeightedScheduler::with_seed(tasks(), seed)?,
            None => WeightedScheduler::new(tasks())?,
        };
        let session = SeededSession::new(env.gateway.clone(), env.context.clone());
        Ok(Box::new(VirtualUser::new(session, Box::new(scheduler), &env)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use opload_core::testing::InMemoryGateway;
    use opload_core::{OperationId, OperationKind, OperationsGateway, SeedPool, SeedPoolError};

    fn seeded_context(ids: &[i64]) -> Arc<RunContext> {
        let pool = SeedPool::new(ids.iter().map(|&id| OperationId(id).into()));
        Arc::new(RunContext::seeded("get_operation_with_seeds", pool))
    }

    #[tokio::test]
    async fn test_session_binds_one_seed_for_its_lifetime() {
        let gateway = Arc::new(InMemoryGateway::new());
        for _ in 0..3 {
            gateway.create_operation().await.unwrap();
        }
        let mut session = SeededSession::new(gateway.clone(), seeded_context(&[1, 2, 3]));

        session.on_session_start().await.unwrap();
        let bound = session.seed().unwrap();

        for _ in 0..10 {
            get_operation(&mut session).await.unwrap();
        }

        let calls = gateway.calls();
        let gets: Vec<_> = calls
            .iter()
            .filter(|(kind, _)| *kind == OperationKind::Get)
            .collect();
        assert_eq!(gets.len(), 10);
        assert!(gets.iter().all(|(_, id)| *id == Some(bound.operation_id)));
    }

    #[tokio::test]
    async fn test_start_fails_on_empty_pool() {
        let gateway = Arc::new(InMemoryGateway::new());
        let mut session = SeededSession::new(gateway, seeded_context(&[]));

        let err = session.on_session_start().await.unwrap_err();
        assert_eq!(err, TaskError::SeedPool(SeedPoolError::Empty));
    }

    #[tokio::test]
    async fn test_list_task_calls_collection() {
        let gateway = Arc::new(InMemoryGateway::new());
        let mut session = SeededSession::new(gateway.clone(), seeded_context(&[1]));

        get_operations(&mut session).await.unwrap();

        assert_eq!(gateway.calls(), vec![(OperationKind::List, None)]);
    }

    #[test]
    fn test_declared_weights_and_plan() {
        let weights: Vec<_> = tasks().iter().map(|t| (t.name, t.weight)).collect();
        assert_eq!(weights, vec![("get_operations", 1), ("get_operation", 3)]);
        assert_eq!(
            GetOperationWithSeeds.seed_plan().unwrap().operations_count(),
            20
        );
    }
}
