//! Page data blob reader
//!
//! Most storefront layouts carry a JSON blob on a metadata node. Besides
//! auxiliary fields it may hold `buyfulldisco`, whose presence tells us the
//! page lists the full discography, and whose `tralbums` list is the
//! fallback source of album records.

use serde_json::Value;
use tracing::{debug, warn};

use super::document::PageDocument;
use crate::domain::AlbumRecord;
use crate::domain::json_path::{is_present_and_truthy, lookup};
use crate::infrastructure::config::PageSelectors;
use crate::infrastructure::parsing_error::{ExtractionError, ExtractionResult};

/// Field on the blob marking a page that lists the full catalog
pub const FULL_CATALOG_MARKER: &str = "buyfulldisco";
const TRALBUMS_PATH: [&str; 2] = [FULL_CATALOG_MARKER, "tralbums"];

/// Parse the page data blob.
pub fn read_page_data(document: &PageDocument, selectors: &PageSelectors) -> ExtractionResult<Value> {
    let node = document
        .select_first(&selectors.page_data_node)
        .ok_or_else(|| ExtractionError::not_a_bandcamp_page(&selectors.page_data_node))?;

    let raw = node
        .value()
        .attr(&selectors.page_data_attribute)
        .ok_or_else(|| {
            ExtractionError::malformed_page_data(format!(
                "attribute '{}' missing",
                selectors.page_data_attribute
            ))
        })?;

    serde_json::from_str(raw).map_err(ExtractionError::malformed_page_data)
}

/// Whether the blob marks this page as carrying the full catalog
pub fn has_full_catalog(page_data: &Value) -> bool {
    is_present_and_truthy(page_data.get(FULL_CATALOG_MARKER))
}

/// Album records listed under `buyfulldisco.tralbums`.
///
/// Missing or non-array lists give an empty vector; entries that are not
/// objects are skipped.
pub fn tralbums(page_data: &Value) -> Vec<AlbumRecord> {
    let Some(entries) = lookup(page_data, &TRALBUMS_PATH).and_then(Value::as_array) else {
        debug!("Page data has no tralbums list");
        return Vec::new();
    };

    entries
        .iter()
        .filter_map(|entry| {
            if !entry.is_object() {
                warn!("Skipping non-object tralbums entry");
                return None;
            }
            serde_json::from_value::<AlbumRecord>(entry.clone())
                .map_err(|e| warn!("Skipping unreadable tralbums entry: {}", e))
                .ok()
        })
        .collect()
}
