//! Bandcamp storefront scraper
//!
//! Reads band information, album lists and per-album track data from
//! Bandcamp artist pages. Page data comes from JSON attributes in the markup
//! and from inline scripts evaluated in an isolated JavaScript sandbox.

// Module declarations
pub mod application;
pub mod domain;
pub mod infrastructure;

pub use application::{CatalogPipeline, ScrapeError, ScrapeResult};
pub use domain::{
    AlbumRecord, ArtistIdentifier, BandInfo, CatalogPage, Discography, ExtendedAlbumInfo,
    PageFetcher,
};
pub use infrastructure::{ExtractionError, ScraperConfig};
