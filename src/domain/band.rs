//! Band metadata scraped from a storefront page

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Band information: the raw `BandData` global plus convenience projections.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BandInfo {
    #[serde(rename = "bandData")]
    pub band_data: Value,
    pub name: Option<String>,
    pub description: Option<String>,
    pub image: Option<String>,
}

impl BandInfo {
    pub fn new(band_data: Value, description: Option<String>, image: Option<String>) -> Self {
        let name = band_data
            .get("name")
            .and_then(Value::as_str)
            .map(str::to_string);

        Self {
            band_data,
            name,
            description,
            image,
        }
    }
}
