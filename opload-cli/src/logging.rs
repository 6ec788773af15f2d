//! Tracing subscriber setup for the binary

use opload_config::{LogFormat, LoggingConfig};
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// HTTP stack targets capped at `warn` whatever the requested level
const NOISY_TARGETS: &[&str] = &["hyper=warn", "hyper_util=warn", "reqwest=warn", "rustls=warn"];

/// Initialize tracing, with `--log-level` taking precedence over `RUST_LOG`
/// and `RUST_LOG` over the configured level.
///
/// Logs go to stderr so stdout carries only the report.
pub fn init_tracing(config: &LoggingConfig, log_level: Option<&str>) {
    let directive = match log_level {
        Some(level) => level.to_string(),
        None => std::env::var(EnvFilter::DEFAULT_ENV)
            .unwrap_or_else(|_| config.level.as_str().to_string()),
    };

    let builder = tracing_subscriber::fmt()
        .with_env_filter(build_filter(&directive))
        .with_writer(std::io::stderr);
    let result = match config.format {
        LogFormat::Json => builder.json().try_init(),
        LogFormat::Compact => builder.compact().try_init(),
        LogFormat::Pretty => builder.pretty().try_init(),
        LogFormat::Text => builder.try_init(),
    };

    match result {
        Ok(()) => debug!("Tracing initialized at '{}'", directive),
        Err(e) => debug!("Tracing already initialized: {}", e),
    }
}

fn build_filter(directive: &str) -> EnvFilter {
    let mut filter = EnvFilter::try_new(directive).unwrap_or_else(|_| {
        eprintln!("Invalid log level '{}', falling back to 'info'", directive);
        EnvFilter::new("info")
    });
    for target in NOISY_TARGETS {
        if let Ok(noisy) = target.parse() {
            filter = filter.add_directive(noisy);
        }
    }
    filter
}
