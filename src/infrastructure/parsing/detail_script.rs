//! Band and album detail readers built on script evaluation
//!
//! Band pages assign `BandData`, album pages assign `TralbumData`. The
//! fragment is located by marker, evaluated with the framework mocks and the
//! named global read back. A page whose scripts never reach the assignment
//! yields `{}`; only a script that fails to run is an error.

use serde_json::{Value, json};
use tracing::debug;

use super::document::PageDocument;
use super::sandbox::{SandboxGlobals, evaluate};
use super::script_locator::find_fragment;
use crate::domain::{BandInfo, ExtendedAlbumInfo};
use crate::infrastructure::config::PageSelectors;
use crate::infrastructure::parsing_error::ExtractionResult;

pub const BAND_DATA_MARKER: &str = "BandData";
pub const ALBUM_DATA_MARKER: &str = "TralbumData";

/// Evaluate the script mentioning `marker` and return the global of the same
/// name, or `{}` when it was never assigned.
pub fn read_script_global(
    document: &PageDocument,
    marker: &str,
    selectors: &PageSelectors,
) -> ExtractionResult<Value> {
    let fragment = find_fragment(document, &selectors.script_tag, marker);
    let result = evaluate(&fragment, &SandboxGlobals::framework_mocks())?;

    match result.global(marker) {
        Some(value) => Ok(value.clone()),
        None => {
            debug!("Script global '{}' was never assigned", marker);
            Ok(json!({}))
        }
    }
}

/// Band information from `BandData` plus the page's Open Graph tags.
pub fn read_band_info(document: &PageDocument, selectors: &PageSelectors) -> ExtractionResult<BandInfo> {
    let band_data = read_script_global(document, BAND_DATA_MARKER, selectors)?;
    let description = document.attr(&selectors.og_description, "content");
    let image = document.attr(&selectors.og_image, "content");

    Ok(BandInfo::new(band_data, description, image))
}

/// Extended album information from `TralbumData`.
pub fn read_extended_info(
    document: &PageDocument,
    selectors: &PageSelectors,
) -> ExtractionResult<ExtendedAlbumInfo> {
    let detail = read_script_global(document, ALBUM_DATA_MARKER, selectors)?;
    Ok(ExtendedAlbumInfo::from_detail_object(detail))
}
