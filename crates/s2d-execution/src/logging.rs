//! Tracing subscriber setup shared by the binaries.

use s2d_core::config::LoggingConfig;
use s2d_core::{Result, S2dError};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// File name prefix of the daily-rotated log files.
pub const LOG_FILE_PREFIX: &str = "symptom2disease.log";

/// Picks the filter directive: `RUST_LOG` wins over the configured level.
fn filter_directive(config: &LoggingConfig, env: Option<String>) -> String {
    env.filter(|value| !value.trim().is_empty())
        .unwrap_or_else(|| config.level.clone())
}

/// Installs the global subscriber.
///
/// Console output goes to stderr so it never mixes with command output. The
/// returned guard flushes the file writer and must be held until exit.
pub fn init_logging(config: &LoggingConfig) -> Result<Option<WorkerGuard>> {
    let directive = filter_directive(config, std::env::var(EnvFilter::DEFAULT_ENV).ok());
    let filter = EnvFilter::try_new(&directive)
        .map_err(|e| S2dError::config(format!("Invalid log filter '{directive}': {e}")))?;

    let (json_layer, text_layer) = if config.json {
        (Some(fmt::layer().json().with_writer(std::io::stderr)), None)
    } else {
        (
            None,
            Some(
                fmt::layer()
                    .compact()
                    .with_target(false)
                    .with_writer(std::io::stderr),
            ),
        )
    };

    let (file_layer, guard) = match &config.log_dir {
        Some(dir) => {
            std::fs::create_dir_all(dir)?;
            let appender = tracing_appender::rolling::daily(dir, LOG_FILE_PREFIX);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            (
                Some(fmt::layer().with_ansi(false).with_writer(writer)),
                Some(guard),
            )
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(json_layer)
        .with(text_layer)
        .with(file_layer)
        .try_init()
        .map_err(|e| S2dError::internal(format!("Failed to install logger: {e}")))?;

    tracing::debug!(filter = %directive, "Logging initialized");
    Ok(guard)
}
