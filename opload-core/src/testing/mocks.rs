//! Mock gateway using the mockall framework

use crate::error::RemoteError;
use crate::gateway::OperationsGateway;
use crate::types::{Operation, OperationId};
use async_trait::async_trait;
use mockall::mock;

mock! {
    pub Gateway {}

    #[async_trait]
    impl OperationsGateway for Gateway {
        async fn create_operation(&self) -> Result<Operation, RemoteError>;
        async fn get_operation(&self, operation_id: OperationId) -> Result<Operation, RemoteError>;
        async fn get_operations(&self) -> Result<Vec<Operation>, RemoteError>;
    }
}
