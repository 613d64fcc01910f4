//! Storefront page parsing
//!
//! Readers for each place a storefront page keeps its data: the catalog grid
//! attribute, the page data blob, and detail scripts evaluated in a sandbox.
//! Every reader works on an already-parsed [`PageDocument`] and is
//! synchronous; fetching is the application layer's job.

pub mod album_normalizer;
pub mod art_url;
pub mod catalog;
pub mod detail_script;
pub mod document;
pub mod page_data;
pub mod sandbox;
pub mod script_locator;

// Re-export public types
pub use art_url::{ArtTemplate, ArtUrlResolver};
pub use document::PageDocument;
pub use sandbox::{MockBinding, SandboxGlobals, SandboxResult};
