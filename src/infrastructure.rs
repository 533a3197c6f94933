//! Infrastructure layer for parsing, fetching, storage and process setup
//!
//! Implements the domain traits: HTML extraction on `scraper`, page fetching
//! on `reqwest`, record storage in Parquet, plus configuration and logging.

pub mod config;
pub mod directory_collector;
pub mod http_client;
pub mod logging;
pub mod parquet_store;
pub mod parsing;
pub mod parsing_error;
pub mod remote_collector;

// Re-export commonly used items
pub use config::{AppConfig, ConfigManager, LoggingConfig, PathsConfig};
pub use directory_collector::DirectoryCollector;
pub use http_client::{HttpClient, HttpClientConfig};
pub use logging::{get_log_directory, init_logging, LoggingHandle};
pub use parquet_store::{ParquetJobStore, StorageError};
pub use parsing::{ExtractionConfig, JobCardParser, JobListingParser, ParsingError, ParsingResult};
pub use remote_collector::{PageHarvest, RemoteCollector};
