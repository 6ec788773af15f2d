//! HTTP error types

/// Errors building an [`OperationsClient`](crate::OperationsClient)
#[derive(Debug, thiserror::Error)]
pub enum HttpError {
    #[error("Failed to build HTTP client: {0}")]
    ClientBuild(#[from] reqwest::Error),

    #[error("Invalid base URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },
}
