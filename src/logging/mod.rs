//! Logging System for desktop-attach
//!
//! Structured `tracing` output to stderr with configurable verbosity.
//! Logging is off unless requested, so a default run prints nothing beyond
//! the command line diagnostics.

mod config;


pub use self::config::{LogFormat, LogLevel, LoggingConfig};

use thiserror::Error;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// Logging system errors
#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("Failed to initialize logging: {0}")]
    InitializationError(String),
}

/// Result type for logging operations
pub type LoggingResult<T> = Result<T, LoggingError>;

/// Global `tracing` subscriber setup
pub struct LoggingSystem;

impl LoggingSystem {
    /// Install the global subscriber for the given configuration
    pub fn init(config: &LoggingConfig) -> LoggingResult<()> {
        let env_filter = Self::build_env_filter(config);
        let fmt_layer = Self::create_stderr_layer(config);

        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .try_init()
            .map_err(|e| LoggingError::InitializationError(e.to_string()))
    }

    /// Build environment filter from configuration
    pub(crate) fn build_env_filter(config: &LoggingConfig) -> EnvFilter {
        let mut filter = EnvFilter::new(config.level.to_string());

        // Malformed module names are skipped rather than failing startup
        for (module, level) in &config.module_levels {
            if let Ok(directive) = format!("{}={}", module, level).parse() {
                filter = filter.add_directive(directive);
            }
        }

        filter
    }

    fn create_stderr_layer<S>(config: &LoggingConfig) -> Box<dyn Layer<S> + Send + Sync>
    where
        S: tracing::Subscriber + for<'a> tracing_subscriber::registry::LookupSpan<'a>,
    {
        let layer = fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(config.include_target)
            .with_file(config.include_file_info)
            .with_line_number(config.include_file_info);

        if config.format == LogFormat::Json {
            layer.json().boxed()
        } else {
            layer.boxed()
        }
    }
}
