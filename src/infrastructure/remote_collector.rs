//! Remote collector
//!
//! Fetches a listing page, discovers detail-page URLs from its cards and
//! extracts every detail page, one request at a time. A failed listing page
//! aborts the run; a failed detail page only loses that page.

use std::sync::Arc;

use anyhow::{Context, Result};
use async_trait::async_trait;
use scraper::Html;
use tracing::{debug, error, info};

use crate::domain::job_record::JobRecord;
use crate::domain::services::{JobCollector, PageFetcher, RecordExtractor};
use crate::infrastructure::parsing::{ContextualParser, JobCardParser, ListingPageContext};

/// Outcome of one detail page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageHarvest {
    pub url: String,

    /// Empty when the page failed or held no valid listing
    pub records: Vec<JobRecord>,

    /// Why the page contributed nothing, if it failed
    pub error: Option<String>,
}

impl PageHarvest {
    pub const fn is_failed(&self) -> bool {
        self.error.is_some()
    }
}

pub struct RemoteCollector {
    base_url: String,
    fetcher: Arc<dyn PageFetcher>,
    card_parser: JobCardParser,
    extractor: Arc<dyn RecordExtractor>,
}

impl RemoteCollector {
    pub fn new(
        base_url: impl Into<String>,
        fetcher: Arc<dyn PageFetcher>,
        card_parser: JobCardParser,
        extractor: Arc<dyn RecordExtractor>,
    ) -> Self {
        Self {
            base_url: base_url.into(),
            fetcher,
            card_parser,
            extractor,
        }
    }

    /// Fetch the listing page and return its detail URLs in card order
    pub async fn discover_job_urls(&self) -> Result<Vec<String>> {
        let body = match self.fetcher.fetch_text(&self.base_url).await {
            Ok(body) => body,
            Err(e) => {
                error!("Failed to fetch listing page: {}, Error: {:#}", self.base_url, e);
                return Err(e.context(format!("Failed to fetch listing page: {}", self.base_url)));
            }
        };

        let document = Html::parse_document(&body);
        let urls = self
            .card_parser
            .parse_with_context(&document, &ListingPageContext::new(self.base_url.as_str()))
            .with_context(|| format!("Failed to parse listing page: {}", self.base_url))?;

        info!("Total job URLs found: {}", urls.len());
        Ok(urls)
    }

    async fn harvest_page(&self, url: String) -> PageHarvest {
        match self.fetcher.fetch_text(&url).await {
            Ok(body) => {
                let records = self.extractor.extract_records(&body, &url);
                debug!("{} records from {}", records.len(), url);
                PageHarvest {
                    url,
                    records,
                    error: None,
                }
            }
            Err(e) => {
                error!("Failed to fetch page: {}, Error: {:#}", url, e);
                PageHarvest {
                    url,
                    records: Vec::new(),
                    error: Some(format!("{e:#}")),
                }
            }
        }
    }

    /// One entry per discovered URL, in discovery order.
    ///
    /// Pages are fetched strictly one after another.
    pub async fn collect_pages(&self) -> Result<Vec<PageHarvest>> {
        let urls = self.discover_job_urls().await?;

        let mut pages = Vec::with_capacity(urls.len());
        for url in urls {
            pages.push(self.harvest_page(url).await);
        }

        let failed = pages.iter().filter(|p| p.is_failed()).count();
        if failed > 0 {
            info!("{} of {} job pages failed", failed, pages.len());
        }
        Ok(pages)
    }
}

#[async_trait]
impl JobCollector for RemoteCollector {
    async fn collect(&self) -> Result<Vec<JobRecord>> {
        let records: Vec<JobRecord> = self
            .collect_pages()
            .await?
            .into_iter()
            .flat_map(|page| page.records)
            .collect();

        info!("Collected {} records from {}", records.len(), self.base_url);
        Ok(records)
    }
}
