//! Parsing configuration for HTML extraction
//!
//! Centralized configuration for CSS selectors and parsing behavior.

use serde::{Deserialize, Serialize};

/// Main extraction configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Selectors for listing containers on job pages
    pub listing: ListingSelectors,

    /// Selectors for cards on the remote listing page
    pub cards: CardSelectors,

    /// Retain containers that produced no field at all as all-null records
    pub keep_empty_records: bool,
}

/// CSS selectors and markers for job listing containers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ListingSelectors {
    /// One job posting per matched element
    pub container: String,

    pub title: String,
    pub company: String,

    /// Block holding description, location and date paragraphs
    pub content: String,
    pub paragraph: String,

    /// `id` attribute marking the location paragraph
    pub location_id: String,
    pub location_prefix: String,

    /// `id` attribute marking the posting date paragraph
    pub date_id: String,
    pub date_prefix: String,
}

impl Default for ListingSelectors {
    fn default() -> Self {
        Self {
            container: "div.box".to_string(),
            title: "h1.title".to_string(),
            company: "h2.company".to_string(),
            content: "div.content".to_string(),
            paragraph: "p".to_string(),
            location_id: "location".to_string(),
            location_prefix: "Location:".to_string(),
            date_id: "date".to_string(),
            date_prefix: "Posted:".to_string(),
        }
    }
}

/// CSS selectors for the card grid on a listing page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CardSelectors {
    pub card: String,

    /// Candidate anchors inside a card
    pub apply_link: String,

    /// Visible label an anchor must carry to count as the detail link
    pub apply_label: String,
}

impl Default for CardSelectors {
    fn default() -> Self {
        Self {
            card: "div.card".to_string(),
            apply_link: "a.card-footer-item".to_string(),
            apply_label: "Apply".to_string(),
        }
    }
}
