//! Album detail use cases
//!
//! Fetches individual album pages and reads their `TralbumData`, either for
//! one album record or for every album on a reconciled catalog page.

use futures::stream::{self, StreamExt, TryStreamExt};
use tracing::{debug, info, warn};

use crate::application::catalog_pipeline::CatalogPipeline;
use crate::application::error::{ScrapeError, ScrapeResult};
use crate::domain::{AlbumDetail, AlbumRecord, ArtistIdentifier, Discography, ExtendedAlbumInfo, PageFetcher};
use crate::infrastructure::config::PageSelectors;
use crate::infrastructure::parsing::PageDocument;
use crate::infrastructure::parsing::detail_script::read_extended_info;
use crate::infrastructure::parsing_error::ExtractionResult;

impl<F: PageFetcher> CatalogPipeline<F> {
    /// Fetch the album's own page and read its extended info.
    pub async fn fetch_album_detail(&self, album: &AlbumRecord) -> ScrapeResult<ExtendedAlbumInfo> {
        let url = album.detail_url().ok_or_else(|| ScrapeError::MissingAlbumUrl {
            id: album.id_text(),
        })?;

        let html = self.fetch(&url).await?;
        let info = extended_info_from_html(&html, self.selectors())?;
        debug!(
            "Read {} tracks for {:?} from {}",
            info.track_count(),
            album.title().unwrap_or("untitled"),
            url
        );
        Ok(info)
    }

    /// Reconcile the storefront, then fetch details for every album on it.
    ///
    /// At most `concurrency` album pages are in flight at once; results keep
    /// catalog order. Albums without a page URL are skipped. The first fetch
    /// or extraction failure aborts the whole run.
    pub async fn fetch_discography(
        &self,
        identifier: &ArtistIdentifier,
        use_music_path: bool,
        concurrency: usize,
    ) -> ScrapeResult<Discography> {
        let page = self.fetch_catalog_page(identifier, use_music_path).await?;

        let linked: Vec<(&AlbumRecord, String)> = page
            .albums()
            .iter()
            .filter_map(|album| match album.detail_url() {
                Some(url) => Some((album, url)),
                None => {
                    warn!("Skipping album {:?} without a page URL", album.id_text());
                    None
                }
            })
            .collect();

        info!(
            "Fetching details for {} albums ({} at a time)",
            linked.len(),
            concurrency.max(1)
        );

        let details: Vec<AlbumDetail> = stream::iter(linked)
            .map(|(album, url)| async move {
                let info = self.fetch_album_detail(album).await?;
                Ok::<_, ScrapeError>(AlbumDetail {
                    id: album.id_text(),
                    url,
                    info,
                })
            })
            .buffered(concurrency.max(1))
            .try_collect()
            .await?;

        Ok(Discography { page, details })
    }
}

/// Parse an album page and read its `TralbumData`.
pub fn extended_info_from_html(html: &str, selectors: &PageSelectors) -> ExtractionResult<ExtendedAlbumInfo> {
    read_extended_info(&PageDocument::parse(html), selectors)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_extended_info_from_html() {
        let html = r#"<script>
            var TralbumData = {
                current: { title: "Tape" },
                trackinfo: [{ title: "One" }, { title: "Two" }],
                artist: "Someone"
            };
        </script>"#;
        let info = extended_info_from_html(html, &PageSelectors::default()).unwrap();
        assert_eq!(info.base_info["title"], "Tape");
        assert_eq!(info.track_count(), 2);
        assert_eq!(info.other_info.get("artist"), Some(&json!("Someone")));
    }

    struct OnePage(&'static str);

    #[async_trait::async_trait]
    impl PageFetcher for OnePage {
        async fn fetch(&self, _url: &str) -> anyhow::Result<String> {
            Ok(self.0.to_string())
        }
    }

    #[test]
    fn test_fetch_album_detail_uses_record_url() {
        let pipeline = CatalogPipeline::new(
            OnePage("<script>var TralbumData = { current: { id: 9 } };</script>"),
            PageSelectors::default(),
        );
        let album: AlbumRecord = serde_json::from_value(json!({
            "id": 9,
            "page_url": "/album/nine",
            "_url": "https://band.bandcamp.com"
        }))
        .unwrap();

        let info = tokio_test::block_on(pipeline.fetch_album_detail(&album));
        let info = tokio_test::assert_ok!(info);
        assert_eq!(info.base_info["id"], 9);
    }

    #[test]
    fn test_page_without_album_data() {
        let info = extended_info_from_html("<p>nothing</p>", &PageSelectors::default()).unwrap();
        assert_eq!(info.track_count(), 0);
    }
}
