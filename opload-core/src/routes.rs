//! API routes of the operations resource

use crate::types::OperationId;

/// Collection route, used for create and list
pub const OPERATIONS: &str = "/api/v1/operations";

/// Item route template, used as the statistics name for every get-one call
pub const OPERATION: &str = "/api/v1/operations/{operation_id}";

/// Concrete path of one operation
pub fn operation_path(operation_id: OperationId) -> String {
    format!("{}/{}", OPERATIONS, operation_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operation_path_uses_collection_prefix() {
        assert_eq!(operation_path(OperationId(42)), "/api/v1/operations/42");
    }

    #[test]
    fn test_item_template_is_identifier_independent() {
        assert_eq!(OPERATION, format!("{}/{{operation_id}}", OPERATIONS));
    }
}
