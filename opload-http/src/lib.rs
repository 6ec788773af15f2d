//! HTTP gateway for opload
//!
//! [`OperationsClient`] talks to the operations service with reqwest and
//! carries no instrumentation. [`InstrumentedGateway`] wraps any gateway and
//! reports one request event per call to a metrics sink.

pub mod client;
pub mod config;
pub mod errors;
pub mod instrumented;

// Re-export main types for convenience
pub use client::OperationsClient;
pub use config::ClientConfig;
pub use errors::HttpError;
pub use instrumented::InstrumentedGateway;
