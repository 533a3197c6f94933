//! HTML parsing infrastructure
//!
//! Trait-based parsers built on `scraper`: one for job listing containers,
//! one for the card grid of a remote listing page.

pub mod config;
pub mod context;
pub mod error;
pub mod job_card_parser;
pub mod job_listing_parser;

// Re-export public types
pub use config::{CardSelectors, ExtractionConfig, ListingSelectors};
pub use context::{ListingPageContext, SourceContext};
pub use error::{ParsingError, ParsingResult};
pub use job_card_parser::JobCardParser;
pub use job_listing_parser::JobListingParser;

use scraper::{ElementRef, Html, Selector};

/// Parser trait with context support
pub trait ContextualParser {
    type Output;
    type Context;

    /// Parse HTML with contextual information
    fn parse_with_context(&self, html: &Html, context: &Self::Context) -> ParsingResult<Self::Output>;
}

/// Compile one selector string, reporting which one failed
pub(crate) fn compile_selector(selector: &str) -> ParsingResult<Selector> {
    Selector::parse(selector).map_err(|e| ParsingError::invalid_selector(selector, e))
}

/// Text of an element with every text node trimmed, blanks dropped and the
/// rest concatenated without separator
pub(crate) fn stripped_text(element: &ElementRef) -> String {
    element
        .text()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .collect()
}
