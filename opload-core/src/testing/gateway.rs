use crate::error::RemoteError;
use crate::gateway::{OperationKind, OperationsGateway};
use crate::routes;
use crate::types::{CreateOperationRequest, Operation, OperationId};
use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::BTreeMap;

#[derive(Debug, Default)]
struct State {
    next_id: i64,
    operations: BTreeMap<OperationId, Operation>,
    calls: Vec<(OperationKind, Option<OperationId>)>,
    fail_creates_after: Option<usize>,
    creates: usize,
}

/// Gateway backed by an in-memory map.
///
/// Ids are assigned sequentially from 1. Every call is logged so tests can
/// assert on the exact call sequence.
#[derive(Debug, Default)]
pub struct InMemoryGateway {
    state: Mutex<State>,
}

impl InMemoryGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail every create after the first `n` succeed
    pub fn failing_creates_after(n: usize) -> Self {
        let gateway = Self::default();
        gateway.state.lock().fail_creates_after = Some(n);
        gateway
    }

    /// Every call made so far, in order
    pub fn calls(&self) -> Vec<(OperationKind, Option<OperationId>)> {
        self.state.lock().calls.clone()
    }

    pub fn call_count(&self, kind: OperationKind) -> usize {
        self.state.lock().calls.iter().filter(|(k, _)| *k == kind).count()
    }

    pub fn stored_ids(&self) -> Vec<OperationId> {
        self.state.lock().operations.keys().copied().collect()
    }
}

#[async_trait]
impl OperationsGateway for InMemoryGateway {
    async fn create_operation(&self) -> Result<Operation, RemoteError> {
        let mut state = self.state.lock();
        state.calls.push((OperationKind::Create, None));

        if let Some(limit) = state.fail_creates_after {
            if state.creates >= limit {
                return Err(RemoteError::Status {
                    route: routes::OPERATIONS.to_string(),
                    status: 500,
                });
            }
        }
        state.creates += 1;
        state.next_id += 1;

        let request = CreateOperationRequest::default();
        let operation = Operation {
            id: OperationId(state.next_id),
            operation_type: Some(request.operation_type),
            status: Some(request.status),
            amount: request.amount,
            card_id: Some(request.card_id),
            category: Some(request.category),
            created_at: Some(request.created_at),
            account_id: Some(request.account_id),
        };
        state.operations.insert(operation.id, operation.clone());
        Ok(operation)
    }

    async fn get_operation(&self, operation_id: OperationId) -> Result<Operation, RemoteError> {
        let mut state = self.state.lock();
        state.calls.push((OperationKind::Get, Some(operation_id)));

        state
            .operations
            .get(&operation_id)
            .cloned()
            .ok_or_else(|| RemoteError::Status {
                route: routes::OPERATION.to_string(),
                status: 404,
            })
    }

    async fn get_operations(&self) -> Result<Vec<Operation>, RemoteError> {
        let mut state = self.state.lock();
        state.calls.push((OperationKind::List, None));
        Ok(state.operations.values().cloned().collect())
    }
}
