//! Logging system configuration and initialization
//!
//! Sets up a `tracing` subscriber from an explicit `LoggingConfig`:
//! - Console output on stderr, so stdout stays free for command output
//! - Optional file output, plain or JSON
//! - Local-time timestamps
//! - `RUST_LOG` overrides the configured level
//!
//! Library code only emits `tracing` events. The binary owns the returned
//! `LoggingHandle` for as long as logs should reach the file.

use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{anyhow, Context, Result};
use chrono::Local;
use tracing::info;
use tracing::level_filters::LevelFilter;
use tracing_appender::{non_blocking, non_blocking::WorkerGuard, rolling};
use tracing_subscriber::{
    fmt::{self, time::FormatTime},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter, Layer, Registry,
};

pub use crate::infrastructure::config::LoggingConfig;

/// Dependencies whose debug output drowns our own
const NOISY_TARGETS: &[(&str, &str)] = &[
    ("reqwest", "info"),
    ("hyper", "warn"),
    ("hyper_util", "warn"),
    ("h2", "warn"),
    ("html5ever", "warn"),
    ("selectors", "warn"),
];

/// Local time with milliseconds
struct LocalTimeFormatter;

impl FormatTime for LocalTimeFormatter {
    fn format_time(&self, w: &mut fmt::format::Writer<'_>) -> std::fmt::Result {
        write!(w, "{}", Local::now().format("%Y-%m-%d %H:%M:%S%.3f"))
    }
}

/// Keeps the file writer alive; drop it to flush and stop file logging
#[must_use = "dropping the handle stops file logging"]
pub struct LoggingHandle {
    _guard: Option<WorkerGuard>,
}

/// Get the log directory relative to the executable location
pub fn get_log_directory() -> PathBuf {
    let exe_dir = std::env::current_exe()
        .ok()
        .and_then(|p| p.parent().map(std::path::Path::to_path_buf))
        .unwrap_or_else(|| std::env::current_dir().unwrap_or_default());

    exe_dir.join("logs")
}

/// Build the level filter: `RUST_LOG` wins, otherwise the configured level
/// with noisy dependencies capped unless tracing everything
pub fn build_env_filter(level: &str) -> Result<EnvFilter> {
    validate_level(level)?;

    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return Ok(filter);
    }

    let mut filter =
        EnvFilter::try_new(level).with_context(|| format!("Invalid log level: {level}"))?;

    if !level.to_lowercase().contains("trace") {
        for (target, cap) in NOISY_TARGETS {
            filter = filter.add_directive(format!("{target}={cap}").parse()?);
        }
    }

    Ok(filter)
}

/// A bare word must be a level name; `EnvFilter` would take it as a target
fn validate_level(level: &str) -> Result<()> {
    let is_directive = level.contains(['=', ',', '[']);
    if !is_directive && LevelFilter::from_str(level.trim()).is_err() {
        return Err(anyhow!(
            "Invalid log level: {level} (expected off, error, warn, info, debug or trace)"
        ));
    }
    Ok(())
}

/// Initialize logging with the given configuration
pub fn init_logging(config: &LoggingConfig) -> Result<LoggingHandle> {
    if !config.console_output && !config.file_output {
        return Err(anyhow!("No logging output configured"));
    }

    let env_filter = build_env_filter(&config.level)?;

    let console_layer = config.console_output.then(|| {
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_timer(LocalTimeFormatter)
            .with_target(false)
    });

    let mut guard = None;
    let mut log_file = None;
    let file_layer = if config.file_output {
        let log_dir = config.log_dir.clone().unwrap_or_else(get_log_directory);
        std::fs::create_dir_all(&log_dir)
            .with_context(|| format!("Failed to create log directory {}", log_dir.display()))?;

        let (writer, file_guard) = non_blocking(rolling::never(&log_dir, &config.file_name));
        guard = Some(file_guard);
        log_file = Some(log_dir.join(&config.file_name));

        let layer = fmt::layer()
            .with_writer(writer)
            .with_timer(LocalTimeFormatter)
            .with_ansi(false);

        Some(if config.json_format {
            layer
                .json()
                .with_target(true)
                .with_file(true)
                .with_line_number(true)
                .boxed()
        } else {
            layer.with_target(false).boxed()
        })
    } else {
        None
    };

    Registry::default()
        .with(env_filter)
        .with(console_layer)
        .with(file_layer)
        .try_init()
        .context("A global logger is already installed")?;

    info!("Logging initialized (level: {})", config.level);
    if let Some(path) = &log_file {
        info!("Log file: {}", path.display());
    }

    Ok(LoggingHandle { _guard: guard })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_logging_config_default() {
        let config = LoggingConfig::default();
        assert_eq!(config.level, "info");
        assert!(config.console_output);
        assert!(!config.file_output);
    }

    #[test]
    fn test_log_directory() {
        assert!(get_log_directory().ends_with("logs"));
    }

    #[test]
    fn test_filter_accepts_levels_and_directives() {
        for level in ["error", "warn", "info", "debug", "trace", "job_harvest_lib=debug,info"] {
            assert!(build_env_filter(level).is_ok(), "{level} should parse");
        }
    }

    #[test]
    fn test_mistyped_level_is_rejected() {
        for level in ["verbose", "inf", "loud"] {
            let err = build_env_filter(level).unwrap_err();
            assert!(err.to_string().contains(level));
        }
    }

    #[test]
    fn test_level_names_ignore_case() {
        for level in ["INFO", "Debug", "off"] {
            assert!(build_env_filter(level).is_ok(), "{level} should parse");
        }
    }

    #[test]
    fn test_no_output_is_rejected() {
        let config = LoggingConfig {
            console_output: false,
            file_output: false,
            ..Default::default()
        };
        assert!(init_logging(&config).is_err());
    }
}
