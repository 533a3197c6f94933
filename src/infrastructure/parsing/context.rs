//! Parsing context for HTML extraction
//!
//! Carries what a parser needs to know about the document it is reading.

/// Context for a job page (local file or remote detail page)
#[derive(Debug, Clone)]
pub struct SourceContext {
    /// File path or URL, used in log output
    pub source: String,
}

impl SourceContext {
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
        }
    }
}

/// Context for the remote listing page
#[derive(Debug, Clone)]
pub struct ListingPageContext {
    /// Base URL for resolving relative links
    pub base_url: String,
}

impl ListingPageContext {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }
}
