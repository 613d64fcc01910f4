//! Errors surfaced by the scraping use cases

use thiserror::Error;

use crate::infrastructure::parsing_error::ExtractionError;

#[derive(Error, Debug)]
pub enum ScrapeError {
    /// Network failure, passed through as the fetcher reported it
    #[error(transparent)]
    Fetch(anyhow::Error),

    #[error(transparent)]
    Extraction(#[from] ExtractionError),

    #[error("Album {} has no page URL to fetch details from", .id.as_deref().unwrap_or("<unknown>"))]
    MissingAlbumUrl { id: Option<String> },
}

impl ScrapeError {
    pub fn is_network(&self) -> bool {
        matches!(self, Self::Fetch(_))
    }
}

pub type ScrapeResult<T> = Result<T, ScrapeError>;
