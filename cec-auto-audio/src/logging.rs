//! Logging setup
//!
//! State-machine narration is logged at info. Raw `cec-client` traffic is
//! passed through at debug under the `cec_traffic` target, so
//! `--log-level info,cec_traffic=debug` shows both.

use tracing_subscriber::{fmt, EnvFilter, Layer, Registry};

/// Logging mode for different use cases
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum LoggingMode {
    /// No output
    Silent,
    /// Compact stderr output, info by default
    Development,
    /// Verbose diagnostics with source locations, debug by default
    Debug,
}

/// Logging configuration error
#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    #[error("Failed to initialize tracing subscriber: {0}")]
    TracingInit(String),

    #[error("Invalid log filter {filter:?}: {reason}")]
    InvalidFilter { filter: String, reason: String },
}

impl LoggingMode {
    /// Filter used when neither an explicit level nor `RUST_LOG` is given
    fn default_level(self) -> Option<&'static str> {
        match self {
            LoggingMode::Silent => None,
            LoggingMode::Development => Some("info"),
            LoggingMode::Debug => Some("debug"),
        }
    }
}

/// Initialize logging with the specified mode.
///
/// `level` is an `EnvFilter` directive such as `info` or
/// `debug,cec_traffic=trace`. Without one, `RUST_LOG` is consulted, then the
/// mode's default level.
pub fn init_logging(mode: LoggingMode, level: Option<&str>) -> Result<(), LoggingError> {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let Some(default_level) = mode.default_level() else {
        return Ok(());
    };
    let filter = create_env_filter(level, default_level)?;

    Registry::default()
        .with(output_layer(mode == LoggingMode::Debug))
        .with(filter)
        .try_init()
        .map_err(|e| LoggingError::TracingInit(e.to_string()))
}

/// Compact one-line output, or multi-line with thread ids and source locations
fn output_layer(verbose: bool) -> Box<dyn Layer<Registry> + Send + Sync> {
    let layer = fmt::layer()
        .with_thread_ids(verbose)
        .with_file(verbose)
        .with_line_number(verbose);

    if verbose {
        layer.pretty().boxed()
    } else {
        layer.with_target(false).compact().boxed()
    }
}

/// Create an environment filter: explicit level, then RUST_LOG, then default
fn create_env_filter(level: Option<&str>, default_level: &str) -> Result<EnvFilter, LoggingError> {
    let directive = match level {
        Some(level) => level.to_string(),
        None => std::env::var("RUST_LOG").unwrap_or_else(|_| default_level.to_string()),
    };

    EnvFilter::try_new(&directive).map_err(|e| LoggingError::InvalidFilter {
        filter: directive.clone(),
        reason: e.to_string(),
    })
}
