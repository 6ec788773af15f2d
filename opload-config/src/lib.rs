//! Domain-driven configuration management for opload
//!
//! Configuration is split by functional domain (http, logging, run, seeds),
//! each with its own defaults and validation. Values come from an optional
//! YAML file and are then overridden by `OPLOAD_*` environment variables.

pub mod error;
pub mod loader;
pub mod validation;

// Domain-specific configuration modules
pub mod domains;

// Re-export main types
pub use error::{ConfigError, ConfigResult};
pub use loader::ConfigLoader;
pub use validation::Validatable;

// Re-export domain configurations
pub use domains::{
    http::{ConnectionPoolConfig, HttpConfig},
    logging::{LogFormat, LogLevel, LoggingConfig},
    run::{RunConfig, WaitTimeConfig},
    seeds::SeedsConfig,
    OploadConfig,
};

// Re-export utilities
pub use domains::utils::{parse_duration, serde_duration};
