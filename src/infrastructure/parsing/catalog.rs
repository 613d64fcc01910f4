//! Catalog grid reader
//!
//! The primary album listing lives as a JSON array in an attribute of the
//! catalog grid node. Records carry art ids but no art URLs; those are
//! added by the normalizer.

use serde_json::Value;
use tracing::debug;

use super::album_normalizer::decorate;
use super::document::PageDocument;
use crate::domain::AlbumRecord;
use crate::infrastructure::config::PageSelectors;
use crate::infrastructure::parsing_error::{ExtractionError, ExtractionResult};

/// Read and decorate the albums listed on the catalog grid node.
pub fn read_albums(
    document: &PageDocument,
    base_url: &str,
    selectors: &PageSelectors,
) -> ExtractionResult<Vec<AlbumRecord>> {
    let node = document
        .select_first(&selectors.catalog_node)
        .ok_or_else(|| ExtractionError::not_a_bandcamp_page(&selectors.catalog_node))?;

    let raw = node.value().attr(&selectors.catalog_attribute).ok_or_else(|| {
        ExtractionError::malformed_catalog(format!(
            "attribute '{}' missing",
            selectors.catalog_attribute
        ))
    })?;

    let albums = parse_album_list(raw)?;
    if albums.is_empty() {
        debug!("Catalog node lists no albums");
        return Ok(albums);
    }

    debug!("Catalog node lists {} albums", albums.len());
    Ok(decorate(albums, base_url, document, selectors))
}

/// Parse the attribute payload: a JSON array of album objects.
fn parse_album_list(raw: &str) -> ExtractionResult<Vec<AlbumRecord>> {
    let value: Value = serde_json::from_str(raw).map_err(ExtractionError::malformed_catalog)?;

    let Value::Array(entries) = value else {
        return Err(ExtractionError::malformed_catalog("expected a JSON array"));
    };

    entries
        .into_iter()
        .enumerate()
        .map(|(index, entry)| {
            if !entry.is_object() {
                return Err(ExtractionError::malformed_catalog(format!(
                    "entry {index} is not an object"
                )));
            }
            serde_json::from_value(entry)
                .map_err(|e| ExtractionError::malformed_catalog(format!("entry {index}: {e}")))
        })
        .collect()
}
