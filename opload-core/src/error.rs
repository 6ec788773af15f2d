//! Core error types for opload

use std::time::Duration;
use thiserror::Error;

/// Failure of a single remote operation.
///
/// Any non-success status, transport problem, timeout or undecodable body
/// reported by an [`OperationsGateway`](crate::OperationsGateway).
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RemoteError {
    /// Connection, DNS or protocol level failure
    #[error("Transport error on {route}: {message}")]
    Transport { route: String, message: String },

    /// The per-call timeout elapsed before a response arrived
    #[error("Request to {route} timed out after {timeout:?}")]
    Timeout { route: String, timeout: Duration },

    /// The server answered with a non-success status code
    #[error("Unexpected status {status} from {route}")]
    Status { route: String, status: u16 },

    /// The response body could not be decoded into the expected schema
    #[error("Invalid payload from {route}: {message}")]
    InvalidPayload { route: String, message: String },
}

impl RemoteError {
    /// Route template the failing call was issued against
    pub fn route(&self) -> &str {
        match self {
            RemoteError::Transport { route, .. }
            | RemoteError::Timeout { route, .. }
            | RemoteError::Status { route, .. }
            | RemoteError::InvalidPayload { route, .. } => route,
        }
    }

    /// Whether the failure was a timeout
    pub fn is_timeout(&self) -> bool {
        matches!(self, RemoteError::Timeout { .. })
    }
}

/// Errors raised by seed pool consumption
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum SeedPoolError {
    #[error("Seed pool is empty")]
    Empty,

    #[error("Run context has no seed pool; the scenario declares no seed plan")]
    NotSeeded,
}

/// Seed construction failed before the pool was complete.
///
/// Carries how far the build got so the startup error can say so.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Seed build failed after creating {created} of {requested} operations: {source}")]
pub struct SeedBuildError {
    pub created: usize,
    pub requested: usize,
    #[source]
    pub source: RemoteError,
}

/// Errors persisting or reading a seed dump
#[derive(Debug, Error)]
pub enum DumpError {
    #[error("Failed to access seed dump {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to serialize seed dump: {0}")]
    Serialization(#[from] serde_json::Error),
}
