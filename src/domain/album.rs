//! Album records as listed on a storefront page

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::json_path::{id_text, is_truthy};

/// One album (or track release) from a storefront listing.
///
/// Only the fields the scraper reasons about are typed; everything else the
/// page provides is kept verbatim in `extra`. The underscored fields are our
/// own additions and never appear in raw page data.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AlbumRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item_id: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub art_id: Option<Value>,

    /// Path of the album page relative to the storefront root, e.g. `/album/x`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_url: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,

    /// Fully-qualified cover art URL
    #[serde(rename = "_art_url", default, skip_serializing_if = "Option::is_none")]
    pub art_url: Option<String>,

    /// Storefront base URL the record was scraped from
    #[serde(rename = "_url", default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
}

impl AlbumRecord {
    /// Art identifier rendered as text, if the record carries a usable one
    pub fn art_id_text(&self) -> Option<String> {
        self.art_id.as_ref().and_then(id_text)
    }

    /// Identifier rendered as text, falling back to `item_id`
    pub fn id_text(&self) -> Option<String> {
        self.id
            .as_ref()
            .and_then(id_text)
            .or_else(|| self.item_id.as_ref().and_then(id_text))
    }

    /// Copy `item_id` into `id` when `id` is falsy and `item_id` is present.
    pub fn backfill_id(&mut self) {
        let id_is_falsy = !self.id.as_ref().is_some_and(is_truthy);
        if id_is_falsy {
            if let Some(item_id) = self.item_id.as_ref().filter(|v| !v.is_null()) {
                self.id = Some(item_id.clone());
            }
        }
    }

    /// URL of the album's own page, available once the record is decorated
    pub fn detail_url(&self) -> Option<String> {
        match (&self.base_url, &self.page_url) {
            (_, Some(path)) if path.starts_with("http://") || path.starts_with("https://") => {
                Some(path.clone())
            }
            (Some(base), Some(path)) => Some(format!("{base}{path}")),
            _ => None,
        }
    }

    pub fn title(&self) -> Option<&str> {
        self.extra.get("title").and_then(Value::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: Value) -> AlbumRecord {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_unknown_fields_pass_through() {
        let album = record(json!({
            "id": 1, "art_id": 2, "page_url": "/album/a",
            "title": "A", "band_id": 9, "filtered": null
        }));
        assert_eq!(album.title(), Some("A"));
        assert_eq!(album.extra.get("band_id"), Some(&json!(9)));

        let out = serde_json::to_value(&album).unwrap();
        assert_eq!(out["filtered"], Value::Null);
        assert!(out.get("_art_url").is_none());
        assert!(out.get("_url").is_none());
    }

    #[test]
    fn test_backfill_id_from_item_id() {
        let mut album = record(json!({ "item_id": "77", "art_id": "x" }));
        album.backfill_id();
        assert_eq!(album.id, Some(json!("77")));
    }

    #[test]
    fn test_backfill_replaces_falsy_id_only() {
        let mut zero = record(json!({ "id": 0, "item_id": 5 }));
        zero.backfill_id();
        assert_eq!(zero.id, Some(json!(5)));

        let mut kept = record(json!({ "id": 3, "item_id": 5 }));
        kept.backfill_id();
        assert_eq!(kept.id, Some(json!(3)));

        let mut none = record(json!({ "title": "no ids" }));
        none.backfill_id();
        assert_eq!(none.id, None);
    }

    #[test]
    fn test_detail_url_needs_base_and_path() {
        let mut album = record(json!({ "page_url": "/album/x" }));
        assert_eq!(album.detail_url(), None);
        album.base_url = Some("https://band.bandcamp.com".to_string());
        assert_eq!(
            album.detail_url().as_deref(),
            Some("https://band.bandcamp.com/album/x")
        );
    }

    #[test]
    fn test_absolute_page_url_used_verbatim() {
        let album = record(json!({ "page_url": "https://label.bandcamp.com/album/split" }));
        assert_eq!(
            album.detail_url().as_deref(),
            Some("https://label.bandcamp.com/album/split")
        );
    }
}
