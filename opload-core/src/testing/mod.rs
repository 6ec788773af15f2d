//! Testing utilities for opload-core
//!
//! Enabled with the `testing` feature so downstream crates can drive
//! schedulers and the run controller without a network.
//!
//! - [`mocks::MockGateway`] - mockall expectation-based gateway
//! - [`InMemoryGateway`] - stateful fake that assigns sequential ids
//! - [`RecordingSink`] - metrics sink that keeps every event

pub mod gateway;
pub mod mocks;
pub mod sink;

pub use gateway::InMemoryGateway;
pub use mocks::MockGateway;
pub use sink::RecordingSink;
