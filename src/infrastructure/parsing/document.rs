//! Parsed storefront document
//!
//! Wraps `scraper::Html` with the few lookups the readers need: first match,
//! all matches, attribute read and trimmed text. Selector strings come from
//! configuration, so an unparsable selector is treated as "no match" and
//! logged rather than failing the read.

use scraper::{ElementRef, Html, Selector};
use tracing::warn;

/// Immutable parsed HTML tree for one fetched page
pub struct PageDocument {
    html: Html,
}

impl PageDocument {
    pub fn parse(body: &str) -> Self {
        Self {
            html: Html::parse_document(body),
        }
    }

    fn compile(selector: &str) -> Option<Selector> {
        match Selector::parse(selector) {
            Ok(compiled) => Some(compiled),
            Err(e) => {
                warn!("Failed to compile selector '{}': {}", selector, e);
                None
            }
        }
    }

    /// All elements matching `selector`, in document order
    pub fn select_all(&self, selector: &str) -> Vec<ElementRef<'_>> {
        Self::compile(selector)
            .map(|compiled| self.html.select(&compiled).collect())
            .unwrap_or_default()
    }

    /// First element matching `selector`
    pub fn select_first(&self, selector: &str) -> Option<ElementRef<'_>> {
        let compiled = Self::compile(selector)?;
        self.html.select(&compiled).next()
    }

    /// Attribute of the first element matching `selector`
    pub fn attr(&self, selector: &str, attribute: &str) -> Option<String> {
        self.select_first(selector)?
            .value()
            .attr(attribute)
            .map(str::to_string)
    }

    /// Trimmed text content of an element
    pub fn trimmed_text(element: &ElementRef<'_>) -> String {
        element.text().collect::<String>().trim().to_string()
    }
}
