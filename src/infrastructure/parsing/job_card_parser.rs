//! Job card parser for remote listing pages
//!
//! Finds the detail-page link of every card: the anchor whose text is exactly
//! `Apply` and that carries an `href`.

use scraper::{Html, Selector};
use tracing::{debug, warn};
use url::Url;

use super::config::{CardSelectors, ExtractionConfig};
use super::context::ListingPageContext;
use super::{compile_selector, ContextualParser, ParsingError, ParsingResult};

/// Parser for detail-page URLs on a listing page
pub struct JobCardParser {
    card_selector: Selector,
    link_selector: Selector,
    apply_label: String,
}

impl JobCardParser {
    pub fn new() -> ParsingResult<Self> {
        Self::with_config(&ExtractionConfig::default().cards)
    }

    pub fn with_config(selectors: &CardSelectors) -> ParsingResult<Self> {
        if selectors.apply_label.trim().is_empty() {
            return Err(ParsingError::configuration(
                "cards.apply_label",
                "label must not be empty",
            ));
        }

        Ok(Self {
            card_selector: compile_selector(&selectors.card)?,
            link_selector: compile_selector(&selectors.apply_link)?,
            apply_label: selectors.apply_label.clone(),
        })
    }

    /// Resolve an href against the listing page URL
    fn resolve_url(href: &str, base_url: &str) -> ParsingResult<String> {
        let base = Url::parse(base_url).map_err(|e| ParsingError::UrlResolutionFailed {
            url: base_url.to_string(),
            reason: format!("Invalid base URL: {e}"),
            base_url: None,
        })?;

        base.join(href)
            .map(|u| u.to_string())
            .map_err(|e| ParsingError::UrlResolutionFailed {
                url: href.to_string(),
                reason: format!("Failed to join URL: {e}"),
                base_url: Some(base_url.to_string()),
            })
    }
}

impl ContextualParser for JobCardParser {
    type Output = Vec<String>;
    type Context = ListingPageContext;

    /// Detail URLs in card order. Cards without an `Apply` link are skipped.
    fn parse_with_context(&self, html: &Html, context: &Self::Context) -> ParsingResult<Self::Output> {
        let mut urls = Vec::new();
        let mut cards = 0usize;

        for card in html.select(&self.card_selector) {
            cards += 1;

            let href = card
                .select(&self.link_selector)
                .filter(|a| a.text().collect::<String>() == self.apply_label)
                .find_map(|a| a.value().attr("href"));

            let Some(href) = href else {
                continue;
            };

            match Self::resolve_url(href, &context.base_url) {
                Ok(url) => urls.push(url),
                Err(e) => warn!("Skipping card link on {}: {}", context.base_url, e),
            }
        }

        debug!("Found {} detail links in {} cards", urls.len(), cards);
        Ok(urls)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "https://example.com/fake-jobs/";

    fn parse(html: &str) -> Vec<String> {
        JobCardParser::new()
            .unwrap()
            .parse_with_context(&Html::parse_document(html), &ListingPageContext::new(BASE))
            .unwrap()
    }

    #[test]
    fn test_apply_links_in_document_order() {
        let html = r#"
            <div class="card">
              <footer class="card-footer">
                <a href="https://www.realpython.com" class="card-footer-item">Learn</a>
                <a href="https://example.com/fake-jobs/jobs/a-0.html" class="card-footer-item">Apply</a>
              </footer>
            </div>
            <div class="card">
              <footer class="card-footer">
                <a href="https://example.com/fake-jobs/jobs/b-1.html" class="card-footer-item">Apply</a>
              </footer>
            </div>
        "#;
        assert_eq!(
            parse(html),
            [
                "https://example.com/fake-jobs/jobs/a-0.html",
                "https://example.com/fake-jobs/jobs/b-1.html",
            ]
        );
    }

    #[test]
    fn test_cards_without_usable_apply_link_are_skipped() {
        let html = r#"
            <div class="card"><a class="card-footer-item">Apply</a></div>
            <div class="card"><a href="/x.html" class="card-footer-item">Apply now</a></div>
            <div class="card"><a href="/y.html">Apply</a></div>
            <div class="box"><a href="/z.html" class="card-footer-item">Apply</a></div>
        "#;
        assert!(parse(html).is_empty());
    }

    #[test]
    fn test_relative_links_resolve_against_base() {
        let html = r#"
            <div class="card"><a href="jobs/c-2.html" class="card-footer-item">Apply</a></div>
            <div class="card"><a href="/other/d-3.html" class="card-footer-item">Apply</a></div>
        "#;
        assert_eq!(
            parse(html),
            [
                "https://example.com/fake-jobs/jobs/c-2.html",
                "https://example.com/other/d-3.html",
            ]
        );
    }

    #[test]
    fn test_label_must_match_exactly() {
        let html = r#"
            <div class="card"><a href="/padded.html" class="card-footer-item"> Apply </a></div>
            <div class="card"><a href="/lower.html" class="card-footer-item">apply</a></div>
            <div class="card"><a href="/exact.html" class="card-footer-item">Apply</a></div>
        "#;
        assert_eq!(parse(html), ["https://example.com/exact.html"]);
    }

    #[test]
    fn test_duplicate_links_are_preserved() {
        let card = r#"<div class="card"><a href="/same.html" class="card-footer-item">Apply</a></div>"#;
        let html = format!("{card}{card}");
        assert_eq!(parse(&html).len(), 2);
    }

    #[test]
    fn test_empty_label_is_rejected() {
        let selectors = CardSelectors {
            apply_label: " ".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            JobCardParser::with_config(&selectors),
            Err(ParsingError::ConfigurationError { .. })
        ));
    }

    #[test]
    fn test_invalid_base_url_skips_links() {
        let html = r#"<div class="card"><a href="/x.html" class="card-footer-item">Apply</a></div>"#;
        let urls = JobCardParser::new()
            .unwrap()
            .parse_with_context(&Html::parse_document(html), &ListingPageContext::new("not a url"))
            .unwrap();
        assert!(urls.is_empty());
    }
}
