//! Album art URL resolution
//!
//! Catalog records only carry an opaque `art_id`. Cover images already on
//! the page reveal the CDN URL pattern: find one image whose `src` contains
//! a known id and reuse its `src` as a template for every other id. Art CDN
//! URLs differ only in the id segment, e.g.
//! `https://f4.bcbits.com/img/a0123456789_2.jpg`.

use tracing::debug;

use super::document::PageDocument;
use crate::domain::AlbumRecord;

/// `src` of a rendered image split around its art id
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtTemplate {
    prefix: String,
    suffix: String,
}

impl ArtTemplate {
    /// Split `src` around the first occurrence of `art_id`
    pub fn from_src(src: &str, art_id: &str) -> Option<Self> {
        if art_id.is_empty() {
            return None;
        }
        let start = src.find(art_id)?;
        Some(Self {
            prefix: src[..start].to_string(),
            suffix: src[start + art_id.len()..].to_string(),
        })
    }

    pub fn render(&self, art_id: &str) -> String {
        format!("{}{}{}", self.prefix, art_id, self.suffix)
    }
}

/// Maps art ids to image URLs; a no-op when no template was found.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArtUrlResolver {
    template: Option<ArtTemplate>,
}

impl ArtUrlResolver {
    /// Derive a resolver from the first album whose art id appears in a
    /// rendered image `src`.
    pub fn from_document(document: &PageDocument, albums: &[AlbumRecord], image_selector: &str) -> Self {
        let sources: Vec<String> = document
            .select_all(image_selector)
            .iter()
            .filter_map(|img| img.value().attr("src"))
            .map(str::to_string)
            .collect();

        let template = albums
            .iter()
            .filter_map(AlbumRecord::art_id_text)
            .find_map(|art_id| {
                sources
                    .iter()
                    .find_map(|src| ArtTemplate::from_src(src, &art_id))
            });

        match &template {
            Some(found) => debug!("Art URL template: {}{{id}}{}", found.prefix, found.suffix),
            None => debug!("No rendered image matches any art id; art URLs unavailable"),
        }

        Self { template }
    }

    pub fn with_template(template: ArtTemplate) -> Self {
        Self {
            template: Some(template),
        }
    }

    pub fn resolve(&self, art_id: &str) -> Option<String> {
        self.template.as_ref().map(|template| template.render(art_id))
    }

    pub fn is_noop(&self) -> bool {
        self.template.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn album(art_id: serde_json::Value) -> AlbumRecord {
        serde_json::from_value(json!({ "art_id": art_id })).unwrap()
    }

    #[test]
    fn test_template_substitutes_other_ids() {
        let template =
            ArtTemplate::from_src("https://f.bcbits.com/img/a123456789_10.jpg", "123456789").unwrap();
        assert_eq!(
            ArtUrlResolver::with_template(template).resolve("987654321").as_deref(),
            Some("https://f.bcbits.com/img/a987654321_10.jpg")
        );
    }

    #[test]
    fn test_first_album_with_rendered_image_decides() {
        let doc = PageDocument::parse(
            r#"<img src="/logo.png"><img src="https://f4.bcbits.com/img/a222_2.jpg">"#,
        );
        let albums = [album(json!(111)), album(json!("222")), album(json!(333))];
        let resolver = ArtUrlResolver::from_document(&doc, &albums, "img[src]");
        assert_eq!(
            resolver.resolve("111").as_deref(),
            Some("https://f4.bcbits.com/img/a111_2.jpg")
        );
    }

    #[test]
    fn test_no_match_is_noop() {
        let doc = PageDocument::parse(r#"<img src="/logo.png">"#);
        let resolver = ArtUrlResolver::from_document(&doc, &[album(json!(42))], "img[src]");
        assert!(resolver.is_noop());
        assert_eq!(resolver.resolve("42"), None);
    }

    #[test]
    fn test_empty_id_never_matches() {
        assert_eq!(ArtTemplate::from_src("/img/a1.jpg", ""), None);
    }
}
