//! Service trait definitions
//!
//! The scraper talks to the network only through these interfaces, so the
//! reconciliation logic can run against canned pages in tests.

use anyhow::Result;
use async_trait::async_trait;

/// Page download service
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetch `url` and return the raw response body.
    ///
    /// Errors are passed to the caller untouched.
    async fn fetch(&self, url: &str) -> Result<String>;
}

#[async_trait]
impl<T: PageFetcher + ?Sized> PageFetcher for std::sync::Arc<T> {
    async fn fetch(&self, url: &str) -> Result<String> {
        (**self).fetch(url).await
    }
}
