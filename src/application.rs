//! Application layer module
//!
//! Use cases that fetch storefront pages and turn them into domain models.

pub mod album_details;
pub mod catalog_pipeline;
pub mod error;

pub use catalog_pipeline::{AlbumStrategy, CatalogPipeline, Landing, reconcile_page};
pub use error::{ScrapeError, ScrapeResult};
