//! Artist identifiers and storefront URL resolution

use std::fmt;
use std::str::FromStr;

use url::Url;

/// Host suffix appended to bare subdomain identifiers
pub const STOREFRONT_DOMAIN: &str = "bandcamp.com";

/// Path that forces the music view instead of (possibly) the merch view
pub const MUSIC_PATH: &str = "/music";

/// Which storefront to scrape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArtistIdentifier {
    /// Bare subdomain, e.g. `"someband"` for `https://someband.bandcamp.com`
    Subdomain(String),
    /// Explicit base URL, used verbatim (custom domains)
    Url(String),
}

impl ArtistIdentifier {
    pub fn subdomain(name: impl Into<String>) -> Self {
        Self::Subdomain(name.into())
    }

    pub fn url(url: impl Into<String>) -> Self {
        Self::Url(url.into())
    }
}

/// Storefront base URL for an identifier.
pub fn resolve_page_url(identifier: &ArtistIdentifier) -> String {
    match identifier {
        ArtistIdentifier::Subdomain(name) => format!("https://{name}.{STOREFRONT_DOMAIN}"),
        ArtistIdentifier::Url(url) => url.clone(),
    }
}

/// Base URL with the music sub-path appended.
pub fn music_page_url(base_url: &str) -> String {
    format!("{base_url}{MUSIC_PATH}")
}

impl FromStr for ArtistIdentifier {
    type Err = std::convert::Infallible;

    /// Anything that parses as an http(s) URL is an override; everything
    /// else is treated as a subdomain.
    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let input = input.trim();
        match Url::parse(input) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => {
                Ok(Self::Url(input.trim_end_matches('/').to_string()))
            }
            _ => Ok(Self::Subdomain(input.to_string())),
        }
    }
}

impl fmt::Display for ArtistIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Subdomain(name) => write!(f, "{name}"),
            Self::Url(url) => write!(f, "{url}"),
        }
    }
}
