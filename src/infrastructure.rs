//! Infrastructure layer: configuration, logging, HTTP and page parsing
//!
//! This module provides the concrete pieces the application layer wires
//! together: the reqwest-backed page fetcher, the storefront readers and
//! the ambient config/logging setup.

pub mod config;
pub mod http_client;
pub mod logging;
pub mod parsing;
pub mod parsing_error;

// Re-export commonly used items
pub use config::{ConfigError, HttpClientConfig, LoggingConfig, PageSelectors, ScraperConfig};
pub use http_client::HttpClient;
pub use parsing::PageDocument;
pub use parsing_error::{ExtractionError, ExtractionResult};
