//! Reconciled page model

use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::Value;

use super::{AlbumRecord, BandInfo, ExtendedAlbumInfo};

/// Which reader produced a page's album list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlbumSource {
    /// JSON attribute on the catalog grid node
    CatalogNode,
    /// `buyfulldisco.tralbums` inside the page data blob
    PageData,
}

/// Everything scraped from one storefront fetch.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct PageModel {
    pub url: String,
    pub band: BandInfo,
    pub albums: Vec<AlbumRecord>,
    #[serde(rename = "pageData")]
    pub page_data: Value,
}

/// Outcome of one catalog fetch.
#[derive(Debug, Clone, PartialEq)]
pub enum CatalogPage {
    /// Albums came from the catalog grid node
    CatalogNode(PageModel),
    /// Albums came from the page data blob
    PageDataOnly(PageModel),
    /// Neither the first page nor the detail hop carried a catalog
    NoCatalog,
}

impl CatalogPage {
    pub fn from_source(source: AlbumSource, model: PageModel) -> Self {
        match source {
            AlbumSource::CatalogNode => Self::CatalogNode(model),
            AlbumSource::PageData => Self::PageDataOnly(model),
        }
    }

    pub fn model(&self) -> Option<&PageModel> {
        match self {
            Self::CatalogNode(model) | Self::PageDataOnly(model) => Some(model),
            Self::NoCatalog => None,
        }
    }

    pub fn source(&self) -> Option<AlbumSource> {
        match self {
            Self::CatalogNode(_) => Some(AlbumSource::CatalogNode),
            Self::PageDataOnly(_) => Some(AlbumSource::PageData),
            Self::NoCatalog => None,
        }
    }

    pub fn albums(&self) -> &[AlbumRecord] {
        self.model().map_or(&[], |model| model.albums.as_slice())
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Self::NoCatalog)
    }
}

/// `NoCatalog` serializes as `{}`; the other variants as the plain model.
impl Serialize for CatalogPage {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.model() {
            Some(model) => model.serialize(serializer),
            None => serializer.serialize_map(Some(0))?.end(),
        }
    }
}

/// A catalog page plus extended info for each of its albums.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct Discography {
    pub page: CatalogPage,
    pub details: Vec<AlbumDetail>,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct AlbumDetail {
    pub id: Option<String>,
    pub url: String,
    pub info: ExtendedAlbumInfo,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_no_catalog_serializes_to_empty_object() {
        let value = serde_json::to_value(CatalogPage::NoCatalog).unwrap();
        assert_eq!(value, json!({}));
    }

    #[test]
    fn test_model_variants_serialize_flat() {
        let model = PageModel {
            url: "https://band.bandcamp.com".to_string(),
            band: BandInfo::default(),
            albums: vec![],
            page_data: json!({ "buyfulldisco": {} }),
        };
        let value = serde_json::to_value(CatalogPage::PageDataOnly(model)).unwrap();
        assert_eq!(value["url"], "https://band.bandcamp.com");
        assert_eq!(value["albums"], json!([]));
        assert!(value.get("pageData").is_some());
    }
}
