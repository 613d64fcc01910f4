//! Album normalization shared by every album source

use super::art_url::ArtUrlResolver;
use super::document::PageDocument;
use crate::domain::AlbumRecord;
use crate::infrastructure::config::PageSelectors;

/// Inject art URLs, tag the base URL and backfill ids.
///
/// Pure in its inputs: decorating an already-decorated list again with the
/// same base URL and document gives the same list.
pub fn decorate(
    albums: Vec<AlbumRecord>,
    base_url: &str,
    document: &PageDocument,
    selectors: &PageSelectors,
) -> Vec<AlbumRecord> {
    let resolver = ArtUrlResolver::from_document(document, &albums, &selectors.image);
    decorate_with(albums, base_url, &resolver)
}

pub fn decorate_with(albums: Vec<AlbumRecord>, base_url: &str, resolver: &ArtUrlResolver) -> Vec<AlbumRecord> {
    albums
        .into_iter()
        .map(|mut album| {
            if let Some(art_url) = album
                .art_id_text()
                .and_then(|art_id| resolver.resolve(&art_id))
            {
                album.art_url = Some(art_url);
            }
            album.base_url = Some(base_url.to_string());
            album.backfill_id();
            album
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const BASE: &str = "https://band.bandcamp.com";

    fn page() -> PageDocument {
        PageDocument::parse(r#"<img src="https://f4.bcbits.com/img/a100_2.jpg">"#)
    }

    fn albums() -> Vec<AlbumRecord> {
        serde_json::from_value(json!([
            { "id": 1, "art_id": 100, "page_url": "/album/one" },
            { "item_id": "77", "art_id": "200", "page_url": "/album/two" },
            { "id": 3, "page_url": "/track/three" }
        ]))
        .unwrap()
    }

    #[test]
    fn test_decorates_every_album() {
        let out = decorate(albums(), BASE, &page(), &PageSelectors::default());

        assert!(out.iter().all(|a| a.base_url.as_deref() == Some(BASE)));
        assert_eq!(out[0].art_url.as_deref(), Some("https://f4.bcbits.com/img/a100_2.jpg"));
        assert_eq!(out[1].art_url.as_deref(), Some("https://f4.bcbits.com/img/a200_2.jpg"));
        assert_eq!(out[1].id, Some(json!("77")));
        // No art id, nothing to resolve
        assert_eq!(out[2].art_url, None);
    }

    #[test]
    fn test_decoration_is_idempotent() {
        let selectors = PageSelectors::default();
        let doc = page();
        let once = decorate(albums(), BASE, &doc, &selectors);
        let twice = decorate(once.clone(), BASE, &doc, &selectors);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_without_rendered_art_urls_are_absent() {
        let out = decorate(albums(), BASE, &PageDocument::parse("<p></p>"), &PageSelectors::default());
        assert!(out.iter().all(|a| a.art_url.is_none()));
        assert!(out.iter().all(|a| a.base_url.is_some()));
    }
}
