//! Built-in scenarios against the operations service

pub mod get_operation_with_seeds;
pub mod get_operation_without_seeds;

pub use get_operation_with_seeds::GetOperationWithSeeds;
pub use get_operation_without_seeds::GetOperationWithoutSeeds;
