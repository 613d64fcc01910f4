//! Extraction error types for storefront page readers
//!
//! Readers fail fast on structural or parse mismatches. Only the catalog
//! pipeline decides whether a failure means "try the next strategy".

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractionError {
    #[error("Not a Bandcamp HTML page: no node matching '{node}'")]
    NotABandcampPage { node: String },

    #[error("Could not parse JSON from Bandcamp albums node: {reason}")]
    MalformedCatalogData { reason: String },

    #[error("Could not parse JSON from Bandcamp HTML page: {reason}")]
    MalformedPageData { reason: String },

    #[error("Could not extract script data: {detail}")]
    ScriptEvaluation { detail: String },
}

impl ExtractionError {
    pub fn not_a_bandcamp_page(node: &str) -> Self {
        Self::NotABandcampPage {
            node: node.to_string(),
        }
    }

    pub fn malformed_catalog(reason: impl ToString) -> Self {
        Self::MalformedCatalogData {
            reason: reason.to_string(),
        }
    }

    pub fn malformed_page_data(reason: impl ToString) -> Self {
        Self::MalformedPageData {
            reason: reason.to_string(),
        }
    }

    pub fn script_evaluation(detail: impl ToString) -> Self {
        Self::ScriptEvaluation {
            detail: detail.to_string(),
        }
    }

    /// True when the page does not have the layout the reader expected,
    /// as opposed to a script that failed to run.
    pub fn is_page_shape_mismatch(&self) -> bool {
        !matches!(self, Self::ScriptEvaluation { .. })
    }
}

pub type ExtractionResult<T> = Result<T, ExtractionError>;
