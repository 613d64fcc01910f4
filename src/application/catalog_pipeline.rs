//! Catalog reconciliation pipeline
//!
//! Storefronts do not all land on the discography. Depending on the band's
//! configuration the root (or `/music`) page may show merch or a single
//! release instead. The pipeline:
//!
//! 1. fetches the landing page and checks the page data for the full
//!    catalog marker,
//! 2. otherwise follows the first album link once and checks again,
//! 3. reads band info, page data and albums from whichever page qualified,
//!    trying album strategies in order until one succeeds.
//!
//! HTML is parsed inside synchronous helpers, so no parsed document or
//! script context is held across a fetch.

use serde_json::Value;
use tracing::{debug, info, warn};

use crate::application::error::{ScrapeError, ScrapeResult};
use crate::domain::identifier::music_page_url;
use crate::domain::{
    AlbumRecord, AlbumSource, ArtistIdentifier, CatalogPage, PageFetcher, PageModel,
    resolve_page_url,
};
use crate::infrastructure::config::{PageSelectors, ScraperConfig};
use crate::infrastructure::http_client::HttpClient;
use crate::infrastructure::parsing::album_normalizer::decorate;
use crate::infrastructure::parsing::detail_script::read_band_info;
use crate::infrastructure::parsing::page_data::{has_full_catalog, read_page_data, tralbums};
use crate::infrastructure::parsing::{PageDocument, catalog};
use crate::infrastructure::parsing_error::{ExtractionError, ExtractionResult};

/// Album readers, in the order they are tried
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlbumStrategy {
    /// JSON attribute on the catalog grid node
    CatalogAttribute,
    /// `buyfulldisco.tralbums` from the page data blob
    PageDataTralbums,
}

impl AlbumStrategy {
    pub const ORDER: [Self; 2] = [Self::CatalogAttribute, Self::PageDataTralbums];

    pub fn source(self) -> AlbumSource {
        match self {
            Self::CatalogAttribute => AlbumSource::CatalogNode,
            Self::PageDataTralbums => AlbumSource::PageData,
        }
    }

    pub fn read(
        self,
        document: &PageDocument,
        base_url: &str,
        page_data: &Value,
        selectors: &PageSelectors,
    ) -> ExtractionResult<Vec<AlbumRecord>> {
        match self {
            Self::CatalogAttribute => catalog::read_albums(document, base_url, selectors),
            Self::PageDataTralbums => Ok(decorate(tralbums(page_data), base_url, document, selectors)),
        }
    }
}

/// What the landing page told us about where the catalog is
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Landing {
    /// This page carries the full catalog
    FullCatalog,
    /// No catalog here, but this album page might have it
    DetailLink(String),
    /// No catalog and nowhere to look
    NoAlbumLink,
}

/// Fetches storefront pages and reconciles them into a [`CatalogPage`].
pub struct CatalogPipeline<F> {
    fetcher: F,
    selectors: PageSelectors,
}

impl CatalogPipeline<HttpClient> {
    /// Pipeline backed by a real HTTP client
    pub fn from_config(config: &ScraperConfig) -> anyhow::Result<Self> {
        let client = HttpClient::new(config.http.clone())?;
        Ok(Self::new(client, config.selectors.clone()))
    }
}

impl<F: PageFetcher> CatalogPipeline<F> {
    pub fn new(fetcher: F, selectors: PageSelectors) -> Self {
        Self { fetcher, selectors }
    }

    pub fn selectors(&self) -> &PageSelectors {
        &self.selectors
    }

    pub(crate) async fn fetch(&self, url: &str) -> ScrapeResult<String> {
        self.fetcher.fetch(url).await.map_err(ScrapeError::Fetch)
    }

    /// Fetch and reconcile one storefront.
    ///
    /// Returns [`CatalogPage::NoCatalog`] when neither the landing page nor
    /// the first album page carries the catalog marker.
    pub async fn fetch_catalog_page(
        &self,
        identifier: &ArtistIdentifier,
        use_music_path: bool,
    ) -> ScrapeResult<CatalogPage> {
        let base_url = resolve_page_url(identifier);
        info!("Scraping storefront {} (music path: {})", base_url, use_music_path);

        let Some(html) = self.overview_page(&base_url, use_music_path).await? else {
            info!("No catalog found for {}", base_url);
            return Ok(CatalogPage::NoCatalog);
        };

        let page = reconcile_page(&html, &base_url, &self.selectors)?;
        info!(
            "Scraped {} albums from {} ({:?})",
            page.albums().len(),
            base_url,
            page.source()
        );
        Ok(page)
    }

    /// HTML of the page that carries the full catalog, if any.
    async fn overview_page(&self, base_url: &str, use_music_path: bool) -> ScrapeResult<Option<String>> {
        let landing_url = if use_music_path {
            music_page_url(base_url)
        } else {
            base_url.to_string()
        };

        let landing_html = self.fetch(&landing_url).await?;
        match inspect_landing(&landing_html, base_url, &self.selectors)? {
            Landing::FullCatalog => Ok(Some(landing_html)),
            Landing::NoAlbumLink => Ok(None),
            Landing::DetailLink(detail_url) => {
                debug!("Landing page has no catalog, trying {}", detail_url);
                let detail_html = self.fetch(&detail_url).await?;
                if page_has_full_catalog(&detail_html, &self.selectors)? {
                    Ok(Some(detail_html))
                } else {
                    debug!("Album page {} has no catalog either", detail_url);
                    Ok(None)
                }
            }
        }
    }
}

/// Classify a landing page.
pub fn inspect_landing(html: &str, base_url: &str, selectors: &PageSelectors) -> ExtractionResult<Landing> {
    let document = PageDocument::parse(html);
    let page_data = read_page_data(&document, selectors)?;
    if has_full_catalog(&page_data) {
        return Ok(Landing::FullCatalog);
    }

    Ok(first_album_link(&document, base_url, selectors)
        .map_or(Landing::NoAlbumLink, Landing::DetailLink))
}

fn page_has_full_catalog(html: &str, selectors: &PageSelectors) -> ExtractionResult<bool> {
    let document = PageDocument::parse(html);
    Ok(has_full_catalog(&read_page_data(&document, selectors)?))
}

/// Absolute URL of the first album link in document order.
///
/// Anchors whose href does not start with the album path prefix are skipped.
pub fn first_album_link(document: &PageDocument, base_url: &str, selectors: &PageSelectors) -> Option<String> {
    document
        .select_all(&selectors.album_link)
        .iter()
        .filter_map(|anchor| anchor.value().attr("href"))
        .find(|href| href.starts_with(&selectors.album_path_prefix))
        .map(|href| format!("{base_url}{href}"))
}

/// Build the page model from the authoritative page.
///
/// Band info and page data failures propagate. Album strategies are tried in
/// order; the first success supplies every album on the page.
pub fn reconcile_page(html: &str, base_url: &str, selectors: &PageSelectors) -> ExtractionResult<CatalogPage> {
    let document = PageDocument::parse(html);
    let band = read_band_info(&document, selectors)?;
    let page_data = read_page_data(&document, selectors)?;

    let (source, albums) = AlbumStrategy::ORDER
        .iter()
        .find_map(|strategy| {
            match strategy.read(&document, base_url, &page_data, selectors) {
                Ok(albums) => Some((strategy.source(), albums)),
                Err(e @ ExtractionError::NotABandcampPage { .. }) => {
                    debug!("Album strategy {:?} not applicable to {}: {}", strategy, base_url, e);
                    None
                }
                Err(e) => {
                    warn!("Album strategy {:?} failed for {}: {}", strategy, base_url, e);
                    None
                }
            }
        })
        .unwrap_or((AlbumSource::PageData, Vec::new()));

    debug!("Using {} albums from {:?}", albums.len(), source);

    let model = PageModel {
        url: base_url.to_string(),
        band,
        albums,
        page_data,
    };
    Ok(CatalogPage::from_source(source, model))
}
