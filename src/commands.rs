//! Command-line interface
//!
//! `files` and `remote` harvest records into the output file, `show` prints
//! what a previous run stored. Flags override the loaded configuration.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::info;

use crate::application::{HarvestSummary, HarvestUseCases};
use crate::domain::services::JobCollector;
use crate::infrastructure::config::{AppConfig, ConfigManager};
use crate::infrastructure::directory_collector::DirectoryCollector;
use crate::infrastructure::http_client::HttpClient;
use crate::infrastructure::parquet_store::ParquetJobStore;
use crate::infrastructure::parsing::{JobCardParser, JobListingParser};
use crate::infrastructure::remote_collector::RemoteCollector;

#[derive(Parser, Debug)]
#[command(name = "job-harvest", version, about = "Harvest job listings into a Parquet file")]
pub struct Cli {
    /// Configuration file (TOML)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Log level or filter directive, e.g. `debug`
    #[arg(long, global = true, value_name = "LEVEL")]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: HarvestCommand,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum HarvestCommand {
    /// Extract records from every .html file under a directory
    Files {
        #[arg(long, value_name = "DIR")]
        dir: Option<PathBuf>,

        #[arg(long, value_name = "FILE")]
        out: Option<PathBuf>,
    },

    /// Crawl a listing page and its job detail pages
    Remote {
        #[arg(long, value_name = "URL")]
        url: Option<String>,

        #[arg(long, value_name = "FILE")]
        out: Option<PathBuf>,
    },

    /// Print the stored table
    Show {
        #[arg(long, value_name = "FILE")]
        file: Option<PathBuf>,
    },
}

impl Cli {
    /// Load configuration from file and environment, then apply flags
    pub fn load_config(&self) -> Result<AppConfig> {
        let manager = match &self.config {
            Some(path) => ConfigManager::with_path(path),
            None => ConfigManager::new(),
        };

        let mut config = manager.load_config()?;
        self.apply_overrides(&mut config);
        Ok(config)
    }

    pub fn apply_overrides(&self, config: &mut AppConfig) {
        if let Some(level) = &self.log_level {
            config.logging.level = level.clone();
        }

        match &self.command {
            HarvestCommand::Files { dir, out } => {
                if let Some(dir) = dir {
                    config.paths.jobs_dir = dir.clone();
                }
                if let Some(out) = out {
                    config.paths.output_file = out.clone();
                }
            }
            HarvestCommand::Remote { url, out } => {
                if let Some(url) = url {
                    config.paths.base_url = url.clone();
                }
                if let Some(out) = out {
                    config.paths.output_file = out.clone();
                }
            }
            HarvestCommand::Show { file } => {
                if let Some(file) = file {
                    config.paths.output_file = file.clone();
                }
            }
        }
    }
}

/// Build the collector a harvest command asks for; `None` for `show`
pub fn build_collector(
    command: &HarvestCommand,
    config: &AppConfig,
) -> Result<Option<Box<dyn JobCollector>>> {
    let collector: Box<dyn JobCollector> = match command {
        HarvestCommand::Files { .. } => {
            let extractor = Arc::new(JobListingParser::with_config(&config.extraction)?);
            Box::new(DirectoryCollector::new(&config.paths.jobs_dir, extractor))
        }
        HarvestCommand::Remote { .. } => {
            let extractor = Arc::new(JobListingParser::with_config(&config.extraction)?);
            let card_parser = JobCardParser::with_config(&config.extraction.cards)?;
            let fetcher = Arc::new(HttpClient::new(config.http.clone())?);
            Box::new(RemoteCollector::new(
                config.paths.base_url.as_str(),
                fetcher,
                card_parser,
                extractor,
            ))
        }
        HarvestCommand::Show { .. } => return Ok(None),
    };

    Ok(Some(collector))
}

/// Run one harvest into `config.paths.output_file`
pub async fn harvest(collector: &dyn JobCollector, config: &AppConfig) -> Result<HarvestSummary> {
    let store = Arc::new(ParquetJobStore::new(&config.paths.output_file));
    let summary = HarvestUseCases::new(store).run(collector).await?;

    info!(
        "Wrote {} records to {}",
        summary.records_written,
        summary.output_path.display()
    );
    Ok(summary)
}

/// Execute `command` against an already resolved configuration
pub async fn run(command: &HarvestCommand, config: &AppConfig) -> Result<()> {
    match build_collector(command, config)? {
        Some(collector) => {
            harvest(collector.as_ref(), config).await?;
        }
        None => {
            let table = ParquetJobStore::new(&config.paths.output_file).render_table()?;
            println!("{table}");
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_files_command() {
        let cli = Cli::try_parse_from(["job-harvest", "files", "--dir", "pages", "--out", "o.parquet"])
            .unwrap();
        assert_eq!(
            cli.command,
            HarvestCommand::Files {
                dir: Some(PathBuf::from("pages")),
                out: Some(PathBuf::from("o.parquet")),
            }
        );
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["job-harvest", "show", "--log-level", "debug"]).unwrap();
        assert_eq!(cli.log_level.as_deref(), Some("debug"));
        assert_eq!(cli.command, HarvestCommand::Show { file: None });
    }

    #[test]
    fn test_subcommand_is_required() {
        assert!(Cli::try_parse_from(["job-harvest"]).is_err());
    }

    #[test]
    fn test_flags_override_config() {
        let cli = Cli::try_parse_from([
            "job-harvest",
            "--log-level",
            "warn",
            "remote",
            "--url",
            "http://localhost:8080/",
            "--out",
            "remote.parquet",
        ])
        .unwrap();

        let mut config = AppConfig::default();
        cli.apply_overrides(&mut config);

        assert_eq!(config.logging.level, "warn");
        assert_eq!(config.paths.base_url, "http://localhost:8080/");
        assert_eq!(config.paths.output_file, PathBuf::from("remote.parquet"));
        assert_eq!(config.paths.jobs_dir, AppConfig::default().paths.jobs_dir);
    }

    #[test]
    fn test_missing_flags_keep_config() {
        let cli = Cli::try_parse_from(["job-harvest", "files"]).unwrap();
        let mut config = AppConfig::default();
        cli.apply_overrides(&mut config);
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_show_builds_no_collector() {
        let command = HarvestCommand::Show { file: None };
        assert!(build_collector(&command, &AppConfig::default()).unwrap().is_none());
    }

    #[tokio::test]
    async fn test_files_command_writes_output() {
        let dir = tempfile::tempdir().unwrap();
        let jobs = dir.path().join("jobs");
        std::fs::create_dir(&jobs).unwrap();
        std::fs::write(
            jobs.join("one.html"),
            r#"<div class="box"><h1 class="title">Engineer</h1></div>"#,
        )
        .unwrap();

        let mut config = AppConfig::default();
        config.paths.jobs_dir = jobs;
        config.paths.output_file = dir.path().join("out.parquet");

        let command = HarvestCommand::Files { dir: None, out: None };
        run(&command, &config).await.unwrap();

        let records = ParquetJobStore::new(&config.paths.output_file).read_records().unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].title(), Some("Engineer"));
    }

    #[tokio::test]
    async fn test_missing_jobs_dir_fails_without_output() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = AppConfig::default();
        config.paths.jobs_dir = dir.path().join("absent");
        config.paths.output_file = dir.path().join("out.parquet");

        let command = HarvestCommand::Files { dir: None, out: None };
        assert!(run(&command, &config).await.is_err());
        assert!(!config.paths.output_file.exists());
    }
}
