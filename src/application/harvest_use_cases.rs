//! Harvest use case
//!
//! Collect every record first, then write them in one go. Nothing reaches the
//! output file when collection fails.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;

use crate::domain::repositories::JobRecordRepository;
use crate::domain::services::JobCollector;

/// What a finished run produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HarvestSummary {
    pub records_written: usize,
    pub output_path: PathBuf,
}

pub struct HarvestUseCases {
    repository: Arc<dyn JobRecordRepository>,
}

impl HarvestUseCases {
    pub fn new(repository: Arc<dyn JobRecordRepository>) -> Self {
        Self { repository }
    }

    /// Collect from `collector` and replace the stored records with the result
    pub async fn run(&self, collector: &dyn JobCollector) -> Result<HarvestSummary> {
        let records = collector.collect().await?;
        info!("Number of records: {}", records.len());

        let output_path = self.repository.location().to_path_buf();
        self.repository
            .save_all(&records)
            .await
            .with_context(|| format!("Failed to write {}", output_path.display()))?;

        Ok(HarvestSummary {
            records_written: records.len(),
            output_path,
        })
    }
}
