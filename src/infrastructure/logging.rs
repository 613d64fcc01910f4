//! Logging system configuration and initialization
//!
//! This module provides the logging setup with:
//! - Console output (human-readable or JSON)
//! - Optional file logging with daily rotation
//! - Configuration file based log level control, overridable with `RUST_LOG`

use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::{Context, Result, anyhow};
use lazy_static::lazy_static;
use tracing_appender::{non_blocking, rolling};
use tracing_subscriber::{
    EnvFilter, Layer, Registry,
    fmt::{self, time::ChronoUtc},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

pub use crate::infrastructure::config::LoggingConfig;

// Keeps the non-blocking file writer alive for the life of the process
lazy_static! {
    static ref LOG_GUARDS: Mutex<Vec<tracing_appender::non_blocking::WorkerGuard>> =
        Mutex::new(Vec::new());
}

/// Dependencies that are noisy below `trace`
const QUIET_TARGETS: &[&str] = &["reqwest=info", "hyper=warn", "hyper_util=warn", "h2=warn"];

/// Get the log directory relative to the executable location
pub fn get_log_directory() -> PathBuf {
    let exe_dir = std::env::current_exe()
        .ok()
        .and_then(|p| p.parent().map(|p| p.to_path_buf()))
        .unwrap_or_else(|| std::env::current_dir().unwrap_or_default());

    exe_dir.join("logs")
}

/// Build the level filter: `RUST_LOG` wins, otherwise the configured level
/// with HTTP internals quieted unless tracing was requested.
pub fn build_env_filter(config: &LoggingConfig) -> Result<EnvFilter> {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return Ok(filter);
    }

    let mut filter = EnvFilter::try_new(&config.level)
        .with_context(|| format!("Invalid log level: {}", config.level))?;

    if !config.level.to_lowercase().contains("trace") {
        for directive in QUIET_TARGETS {
            filter = filter.add_directive(
                directive
                    .parse()
                    .map_err(|e| anyhow!("Invalid log directive {directive}: {e}"))?,
            );
        }
    }

    Ok(filter)
}

/// Initialize logging with custom configuration
///
/// # Environment Variable Override
/// ```bash
/// RUST_LOG="debug,reqwest=debug" bandcamp-scraper someband
/// ```
pub fn init_logging_with_config(config: &LoggingConfig) -> Result<()> {
    let env_filter = build_env_filter(config)?;

    let mut layers: Vec<Box<dyn Layer<Registry> + Send + Sync>> = Vec::new();

    if config.console_output {
        let console = fmt::layer()
            .with_writer(std::io::stderr)
            .with_timer(ChronoUtc::rfc_3339())
            .with_target(true);
        if config.json_format {
            layers.push(console.json().boxed());
        } else {
            layers.push(console.boxed());
        }
    }

    if config.file_output {
        let log_dir = config.log_dir.clone().unwrap_or_else(get_log_directory);
        std::fs::create_dir_all(&log_dir)
            .map_err(|e| anyhow!("Failed to create log directory {:?}: {}", log_dir, e))?;

        let appender = rolling::daily(&log_dir, &config.file_name);
        let (writer, guard) = non_blocking(appender);
        LOG_GUARDS
            .lock()
            .map_err(|_| anyhow!("Log guard storage poisoned"))?
            .push(guard);

        let file = fmt::layer()
            .with_writer(writer)
            .with_ansi(false)
            .with_timer(ChronoUtc::rfc_3339());
        if config.json_format {
            layers.push(file.json().boxed());
        } else {
            layers.push(file.boxed());
        }
    }

    Registry::default()
        .with(layers)
        .with(env_filter)
        .try_init()
        .map_err(|e| anyhow!("Failed to initialize logging: {}", e))?;

    tracing::debug!(
        "Logging initialized (level: {}, console: {}, file: {})",
        config.level,
        config.console_output,
        config.file_output
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_from_config_level() {
        let config = LoggingConfig {
            level: "debug".to_string(),
            ..LoggingConfig::default()
        };
        assert!(build_env_filter(&config).is_ok());
    }

    #[test]
    fn test_trace_level_keeps_dependency_logs() {
        let config = LoggingConfig {
            level: "trace".to_string(),
            ..LoggingConfig::default()
        };
        assert!(build_env_filter(&config).is_ok());
    }
}
