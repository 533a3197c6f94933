//! Configuration infrastructure
//!
//! Configuration is layered, lowest precedence first:
//! 1. Built-in defaults (`defaults` module)
//! 2. TOML config file (explicit path, or the user config directory)
//! 3. `JOB_HARVEST__<SECTION>__<KEY>` environment variables
//!
//! Command line flags are applied on top by the caller.

use std::path::PathBuf;

use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::infrastructure::http_client::HttpClientConfig;
use crate::infrastructure::parsing::ExtractionConfig;

/// Complete application configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Input locations and output file
    pub paths: PathsConfig,

    pub http: HttpClientConfig,

    /// Selectors and record policy
    pub extraction: ExtractionConfig,

    pub logging: LoggingConfig,
}

/// Where records come from and where they go
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    /// Root of the local HTML tree
    pub jobs_dir: PathBuf,

    /// Remote listing page
    pub base_url: String,

    /// Parquet file written by a harvest and read by `show`
    pub output_file: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            jobs_dir: PathBuf::from(defaults::JOBS_DIR),
            base_url: defaults::BASE_URL.to_string(),
            output_file: PathBuf::from(defaults::OUTPUT_FILE),
        }
    }
}

/// Logging configuration settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level: "error", "warn", "info", "debug", "trace"
    pub level: String,

    /// Enable JSON formatted logs in the log file
    pub json_format: bool,

    /// Log to stderr
    pub console_output: bool,

    /// Log to `log_dir/file_name`
    pub file_output: bool,

    /// Defaults to `logs/` next to the executable
    pub log_dir: Option<PathBuf>,

    pub file_name: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: defaults::LOG_LEVEL.to_string(),
            json_format: defaults::LOG_JSON_FORMAT,
            console_output: defaults::LOG_CONSOLE_OUTPUT,
            file_output: defaults::LOG_FILE_OUTPUT,
            log_dir: None,
            file_name: defaults::LOG_FILE_NAME.to_string(),
        }
    }
}

/// Loads `AppConfig` from its layered sources
pub struct ConfigManager {
    config_path: Option<PathBuf>,
    required: bool,
}

impl ConfigManager {
    /// Get the application configuration directory
    pub fn get_config_dir() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Failed to get user config directory")?
            .join(defaults::APP_NAME);

        Ok(config_dir)
    }

    /// Use the config file in the user config directory, if there is one
    pub fn new() -> Self {
        let config_path = Self::get_config_dir()
            .ok()
            .map(|dir| dir.join(defaults::CONFIG_FILE_NAME));

        Self {
            config_path,
            required: false,
        }
    }

    /// Use an explicit config file, which must exist
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: Some(path.into()),
            required: true,
        }
    }

    /// Defaults and environment only
    pub const fn without_file() -> Self {
        Self {
            config_path: None,
            required: false,
        }
    }

    /// Load configuration from the file (if any) and the process environment
    pub fn load_config(&self) -> Result<AppConfig> {
        self.load_with_env(None)
    }

    /// Load configuration, reading environment variables from `env` instead
    /// of the process environment when given
    pub fn load_with_env(&self, env: Option<config::Map<String, String>>) -> Result<AppConfig> {
        let mut builder = Config::builder();

        if let Some(path) = &self.config_path {
            debug!("Reading configuration from {:?}", path);
            builder = builder.add_source(File::from(path.as_path()).required(self.required));
        }

        builder = builder.add_source(
            Environment::with_prefix(defaults::ENV_PREFIX)
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true)
                .source(env),
        );

        let config = builder
            .build()
            .with_context(|| match &self.config_path {
                Some(path) => format!("Failed to load configuration from {}", path.display()),
                None => "Failed to load configuration".to_string(),
            })?;

        config
            .try_deserialize()
            .context("Invalid configuration values")
    }
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}

/// Built-in defaults
pub mod defaults {
    pub const APP_NAME: &str = "job-harvest";

    pub const CONFIG_FILE_NAME: &str = "config.toml";

    /// Prefix of configuration environment variables
    pub const ENV_PREFIX: &str = "JOB_HARVEST";

    /// Local directory scanned by `files`
    pub const JOBS_DIR: &str = "jobs";

    /// Listing page crawled by `remote`
    pub const BASE_URL: &str = "https://realpython.github.io/fake-jobs/";

    pub const OUTPUT_FILE: &str = "result.parquet";

    pub const USER_AGENT: &str = concat!("job-harvest/", env!("CARGO_PKG_VERSION"));

    pub const REQUEST_TIMEOUT_SECONDS: u64 = 30;

    pub const LOG_LEVEL: &str = "info";

    pub const LOG_JSON_FORMAT: bool = false;

    pub const LOG_CONSOLE_OUTPUT: bool = true;

    pub const LOG_FILE_OUTPUT: bool = false;

    pub const LOG_FILE_NAME: &str = "job-harvest.log";
}
