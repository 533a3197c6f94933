//! Domain services
//!
//! Seams between the collectors, the shared extractor and the network.

use anyhow::Result;
use async_trait::async_trait;

use crate::domain::job_record::JobRecord;

/// Turns one HTML document into validated records.
///
/// `source` identifies the document (file path or URL) in log output.
pub trait RecordExtractor: Send + Sync {
    fn extract_records(&self, html: &str, source: &str) -> Vec<JobRecord>;
}

/// Fetches a page body as text
#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch_text(&self, url: &str) -> Result<String>;
}

/// Produces the flat record sequence handed to storage
#[async_trait]
pub trait JobCollector: Send + Sync {
    async fn collect(&self) -> Result<Vec<JobRecord>>;
}
