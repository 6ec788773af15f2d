//! Core domain models and types for opload
//!
//! This crate contains the contract of the remote operations gateway, the
//! seed provisioning pipeline (plan, builder, pool, dumps) and the run
//! context shared by every virtual user. It has no transport dependencies;
//! the reqwest implementation lives in `opload-http`.

pub mod context;
pub mod error;
pub mod gateway;
pub mod metrics;
pub mod routes;
pub mod seeds;
pub mod types;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

// Re-export commonly used types at the crate root
pub use context::RunContext;
pub use error::{DumpError, RemoteError, SeedBuildError, SeedPoolError};
pub use gateway::{OperationKind, OperationsGateway, SharedGateway};
pub use metrics::{MetricsSink, NoopSink, RequestEvent, SharedSink};
pub use seeds::{
    SeedDump, SeedOperationResult, SeedOperationsPlan, SeedPool, SeedsBuilder, SeedsPlan,
    SeedsResult,
};
pub use types::{CreateOperationRequest, HttpMethod, Operation, OperationId};
