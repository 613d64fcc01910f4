//! Locating the inline script that carries a named global
//!
//! This is a plain substring search over each script's trimmed text. Marker
//! tokens are bare identifiers like `BandData`, which do not collide with
//! ordinary page code.

use tracing::trace;

use super::document::PageDocument;

/// Text of the first element matching `tag_selector` whose trimmed content
/// contains `marker`, or an empty string when none does.
pub fn find_fragment(document: &PageDocument, tag_selector: &str, marker: &str) -> String {
    let fragment = document
        .select_all(tag_selector)
        .iter()
        .map(PageDocument::trimmed_text)
        .find(|text| text.contains(marker));

    match fragment {
        Some(text) => {
            trace!("Found '{}' fragment ({} chars)", marker, text.len());
            text
        }
        None => {
            trace!("No '{}' fragment on page", marker);
            String::new()
        }
    }
}
