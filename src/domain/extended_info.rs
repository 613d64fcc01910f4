//! Per-album detail data pulled from an album page

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Key holding the album's own record inside `TralbumData`
pub const BASE_INFO_KEY: &str = "current";
/// Key holding the track list inside `TralbumData`
pub const TRACKS_KEY: &str = "trackinfo";

/// Partition of an album detail object.
///
/// `other_info` is built by exclusion so fields Bandcamp adds later still
/// surface there.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExtendedAlbumInfo {
    #[serde(rename = "baseInfo")]
    pub base_info: Value,
    pub tracks: Value,
    #[serde(rename = "otherInfo")]
    pub other_info: Map<String, Value>,
}

impl ExtendedAlbumInfo {
    pub fn from_detail_object(detail: Value) -> Self {
        let mut other_info = match detail {
            Value::Object(map) => map,
            _ => Map::new(),
        };
        let base_info = other_info.remove(BASE_INFO_KEY).unwrap_or(Value::Null);
        let tracks = other_info.remove(TRACKS_KEY).unwrap_or(Value::Null);

        Self {
            base_info,
            tracks,
            other_info,
        }
    }

    pub fn track_count(&self) -> usize {
        self.tracks.as_array().map_or(0, Vec::len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_partition_by_exclusion() {
        let info = ExtendedAlbumInfo::from_detail_object(json!({
            "current": { "title": "Album" },
            "trackinfo": [{ "title": "One" }, { "title": "Two" }],
            "artist": "Band",
            "some_future_field": true
        }));

        assert_eq!(info.base_info, json!({ "title": "Album" }));
        assert_eq!(info.track_count(), 2);
        assert_eq!(info.other_info.len(), 2);
        assert!(info.other_info.contains_key("some_future_field"));
        assert!(!info.other_info.contains_key("current"));
    }

    #[test]
    fn test_empty_detail_object() {
        let info = ExtendedAlbumInfo::from_detail_object(json!({}));
        assert_eq!(info.base_info, Value::Null);
        assert_eq!(info.track_count(), 0);
        assert!(info.other_info.is_empty());
    }
}
