//! Job listing parser
//!
//! Extracts title, company, description, location and posting date from
//! every listing container of a job page, then validates each record.
//! Both the directory and the remote collectors go through this parser.

use scraper::{ElementRef, Html, Selector};
use tracing::{debug, error, warn};

use super::config::{ExtractionConfig, ListingSelectors};
use super::context::SourceContext;
use super::{compile_selector, stripped_text, ContextualParser, ParsingResult};
use crate::domain::job_record::{JobRecord, RawJobFields};
use crate::domain::services::RecordExtractor;

/// Parser for job listing containers
pub struct JobListingParser {
    container_selector: Selector,
    title_selector: Selector,
    company_selector: Selector,
    content_selector: Selector,
    paragraph_selector: Selector,
    selectors: ListingSelectors,
    keep_empty_records: bool,
}

impl JobListingParser {
    /// Create a parser with the default selectors
    pub fn new() -> ParsingResult<Self> {
        Self::with_config(&ExtractionConfig::default())
    }

    /// Create a parser from configuration
    pub fn with_config(config: &ExtractionConfig) -> ParsingResult<Self> {
        let selectors = &config.listing;
        Ok(Self {
            container_selector: compile_selector(&selectors.container)?,
            title_selector: compile_selector(&selectors.title)?,
            company_selector: compile_selector(&selectors.company)?,
            content_selector: compile_selector(&selectors.content)?,
            paragraph_selector: compile_selector(&selectors.paragraph)?,
            selectors: selectors.clone(),
            keep_empty_records: config.keep_empty_records,
        })
    }

    /// Raw field mappings, one per listing container, in document order
    pub fn extract_raw(&self, html: &Html) -> Vec<RawJobFields> {
        html.select(&self.container_selector)
            .map(|container| self.extract_fields(&container))
            .collect()
    }

    fn extract_fields(&self, container: &ElementRef) -> RawJobFields {
        let mut fields = RawJobFields {
            title: first_text(container, &self.title_selector),
            company: first_text(container, &self.company_selector),
            ..Default::default()
        };

        let Some(block) = container.select(&self.content_selector).next() else {
            return fields;
        };

        let paragraphs: Vec<ElementRef> = block.select(&self.paragraph_selector).collect();
        if paragraphs.is_empty() {
            return fields;
        }

        // Paragraphs without an id are description text; tagged ones are metadata
        let description: Vec<String> = paragraphs
            .iter()
            .filter(|p| p.value().attr("id").is_none_or(str::is_empty))
            .map(stripped_text)
            .collect();
        fields.content = Some(description.join(" "));

        for paragraph in &paragraphs {
            match paragraph.value().attr("id") {
                Some(id) if id == self.selectors.location_id => {
                    fields.location = Some(strip_label(
                        &stripped_text(paragraph),
                        &self.selectors.location_prefix,
                    ));
                }
                Some(id) if id == self.selectors.date_id => {
                    fields.date = Some(strip_label(
                        &stripped_text(paragraph),
                        &self.selectors.date_prefix,
                    ));
                }
                _ => {}
            }
        }

        fields
    }

    fn validate(&self, raw: RawJobFields) -> Result<JobRecord, crate::domain::ValidationError> {
        if self.keep_empty_records {
            JobRecord::validate_allow_empty(raw)
        } else {
            JobRecord::validate(raw)
        }
    }
}

impl ContextualParser for JobListingParser {
    type Output = Vec<JobRecord>;
    type Context = SourceContext;

    fn parse_with_context(&self, html: &Html, context: &Self::Context) -> ParsingResult<Self::Output> {
        let raw_records = self.extract_raw(html);
        let found = raw_records.len();

        let mut records = Vec::with_capacity(found);
        for (index, raw) in raw_records.into_iter().enumerate() {
            match self.validate(raw) {
                Ok(record) => records.push(record),
                Err(e) => {
                    warn!(
                        "Validation error in {} (listing #{}): {}",
                        context.source, index, e
                    );
                }
            }
        }

        debug!(
            "Extracted {} of {} listings from {}",
            records.len(),
            found,
            context.source
        );
        Ok(records)
    }
}

impl RecordExtractor for JobListingParser {
    fn extract_records(&self, html: &str, source: &str) -> Vec<JobRecord> {
        let document = Html::parse_document(html);
        match self.parse_with_context(&document, &SourceContext::new(source)) {
            Ok(records) => records,
            Err(e) => {
                error!("Failed to parse {}: {}", source, e);
                Vec::new()
            }
        }
    }
}

fn first_text(element: &ElementRef, selector: &Selector) -> Option<String> {
    element.select(selector).next().map(|e| stripped_text(&e))
}

/// Remove `prefix` once from the start of `text`, then trim
fn strip_label(text: &str, prefix: &str) -> String {
    text.strip_prefix(prefix).unwrap_or(text).trim().to_string()
}
