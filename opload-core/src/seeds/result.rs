use crate::types::OperationId;
use serde::{Deserialize, Serialize};

/// Reference to one pre-created operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SeedOperationResult {
    pub operation_id: OperationId,
}

impl From<OperationId> for SeedOperationResult {
    fn from(operation_id: OperationId) -> Self {
        Self { operation_id }
    }
}

/// Outcome of executing a [`SeedsPlan`](super::SeedsPlan), in creation order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedsResult {
    #[serde(default)]
    pub operations: Vec<SeedOperationResult>,
}

impl SeedsResult {
    pub fn len(&self) -> usize {
        self.operations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    pub fn operation_ids(&self) -> impl Iterator<Item = OperationId> + '_ {
        self.operations.iter().map(|op| op.operation_id)
    }
}
