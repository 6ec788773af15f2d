//! Remote operations gateway contract
//!
//! The gateway is the only I/O boundary the schedulers and the seed builder
//! talk to. Implementations must be cheap to share: one instance is handed to
//! every virtual user of a run.

use crate::error::RemoteError;
use crate::routes;
use crate::types::{HttpMethod, Operation, OperationId};
use async_trait::async_trait;
use std::sync::Arc;

/// The three remote actions against the operations resource
#[async_trait]
pub trait OperationsGateway: Send + Sync {
    /// Create an operation with a default payload and return it
    async fn create_operation(&self) -> Result<Operation, RemoteError>;

    /// Fetch a single operation by identifier
    async fn get_operation(&self, operation_id: OperationId) -> Result<Operation, RemoteError>;

    /// Fetch the full operations collection
    async fn get_operations(&self) -> Result<Vec<Operation>, RemoteError>;
}

/// Gateway handle shared across virtual users
pub type SharedGateway = Arc<dyn OperationsGateway>;

/// Identifies a gateway call for instrumentation purposes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperationKind {
    Create,
    Get,
    List,
}

impl OperationKind {
    pub fn method(&self) -> HttpMethod {
        match self {
            OperationKind::Create => HttpMethod::Post,
            OperationKind::Get | OperationKind::List => HttpMethod::Get,
        }
    }

    /// Route template reported to the statistics sink.
    ///
    /// Never contains a concrete identifier so that every get-one call
    /// aggregates under the same entry.
    pub fn route(&self) -> &'static str {
        match self {
            OperationKind::Create | OperationKind::List => routes::OPERATIONS,
            OperationKind::Get => routes::OPERATION,
        }
    }
}
