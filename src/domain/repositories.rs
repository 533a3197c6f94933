//! Repository interfaces for harvested job records

use anyhow::Result;
use async_trait::async_trait;
use std::path::Path;

use crate::domain::job_record::JobRecord;

#[async_trait]
pub trait JobRecordRepository: Send + Sync {
    /// Replace the stored records with `records`
    async fn save_all(&self, records: &[JobRecord]) -> Result<()>;

    async fn load_all(&self) -> Result<Vec<JobRecord>>;

    /// Where the records live, for reporting
    fn location(&self) -> &Path;
}
