//! Create, list, then read back what was just created

use crate::error::{ScheduleError, TaskResult};
use crate::scenario::{Scenario, UserEnvironment};
use crate::scheduler::SequentialScheduler;
use crate::task::Task;
use crate::user::{Session, User, VirtualUser};
use futures::future::BoxFuture;
use opload_core::{Operation, SharedGateway};
use tracing::debug;

pub struct GetOperationWithoutSeeds;

/// Holds the most recently created operation
pub struct PipelineSession {
    gateway: SharedGateway,
    operation: Option<Operation>,
}

impl PipelineSession {
    pub fn new(gateway: SharedGateway) -> Self {
        Self {
            gateway,
            operation: None,
        }
    }

    pub fn operation(&self) -> Option<&Operation> {
        self.operation.as_ref()
    }
}

impl Session for PipelineSession {}

fn create_operation(session: &mut PipelineSession) -> BoxFuture<'_, TaskResult> {
    Box::pin(async move {
        // A failed create keeps the previous operation
        session.operation = Some(session.gateway.create_operation().await?);
        Ok(())
    })
}

fn get_operations(session: &mut PipelineSession) -> BoxFuture<'_, TaskResult> {
    Box::pin(async move {
        session.gateway.get_operations().await?;
        Ok(())
    })
}

fn get_operation(session: &mut PipelineSession) -> BoxFuture<'_, TaskResult> {
    Box::pin(async move {
        let Some(operation_id) = session.operation.as_ref().map(|op| op.id) else {
            // No-op: nothing created yet
            debug!("No operation to fetch, skipping get_operation");
            return Ok(());
        };
        session.gateway.get_operation(operation_id).await?;
        Ok(())
    })
}

pub fn tasks() -> Vec<Task<PipelineSession>> {
    vec![
        Task::new("create_operation", create_operation),
        Task::new("get_operations", get_operations),
        Task::new("get_operation", get_operation),
    ]
}

impl Scenario for GetOperationWithoutSeeds {
    fn name(&self) -> &'static str {
        "get_operation_without_seeds"
    }

    fn description(&self) -> &'static str {
        "Sequential create, list, get-one of the created operation; no seeding"
    }

    fn new_user(&self, env: UserEnvironment) -> Result<Box<dyn User>, ScheduleError> {
        let scheduler = SequentialScheduler::new(tasks())?;
        let session = PipelineSession::new(env.gateway.clone());
        Ok(Box::new(VirtualUser::new(session, Box::new(scheduler), &env)))
    }
}
