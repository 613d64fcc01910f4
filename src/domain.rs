//! Domain module - catalog entities and value objects
//!
//! This module contains the data shapes produced by a scrape: the artist
//! identifier we start from, the album and band records we pull out of a
//! storefront page, and the reconciled page model handed back to callers.
//!
//! Modern Rust module organization (Rust 2018+ style):
//! - Each module is its own file in the domain/ directory
//! - Public exports are defined here for convenience

pub mod album;
pub mod band;
pub mod extended_info;
pub mod identifier;
pub mod json_path;
pub mod page;
pub mod services;

pub use album::AlbumRecord;
pub use band::BandInfo;
pub use extended_info::ExtendedAlbumInfo;
pub use identifier::{ArtistIdentifier, resolve_page_url};
pub use services::PageFetcher;
pub use page::{AlbumDetail, AlbumSource, CatalogPage, Discography, PageModel};
