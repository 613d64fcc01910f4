//! Configuration infrastructure
//!
//! Contains configuration loading for the storefront scraper.
//!
//! Configuration is organized into three groups:
//! 1. HTTP client settings
//! 2. Page selectors (where the data lives in Bandcamp markup)
//! 3. Logging settings
//!
//! Every field has a default, so a config file only needs the keys it changes.
//! Environment variables prefixed `BANDCAMP_SCRAPER__` override file values,
//! with `__` separating nested keys (e.g. `BANDCAMP_SCRAPER__HTTP__TIMEOUT_SECONDS`).

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

/// Environment variable prefix for overrides
pub const ENV_PREFIX: &str = "BANDCAMP_SCRAPER";

/// Default configuration values
pub mod defaults {
    pub const USER_AGENT: &str = "bandcamp-scraper/0.1 (+https://crates.io/crates/bandcamp-scraper)";
    pub const TIMEOUT_SECONDS: u64 = 30;
    pub const MAX_REDIRECTS: usize = 10;
    pub const DETAIL_CONCURRENCY: usize = 4;
    pub const LOG_LEVEL: &str = "info";
    pub const LOG_FILE_NAME: &str = "bandcamp-scraper.log";
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to load config from file: {source}")]
    FileLoad {
        #[from]
        source: config::ConfigError,
    },

    #[error("Configuration validation failed: {message}")]
    Validation { message: String },
}

/// Complete scraper configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScraperConfig {
    pub http: HttpClientConfig,
    pub selectors: PageSelectors,
    pub logging: LoggingConfig,

    /// Album detail pages fetched at once by `fetch_discography`
    pub detail_concurrency: usize,
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            http: HttpClientConfig::default(),
            selectors: PageSelectors::default(),
            logging: LoggingConfig::default(),
            detail_concurrency: defaults::DETAIL_CONCURRENCY,
        }
    }
}

/// HTTP client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpClientConfig {
    pub user_agent: String,
    pub timeout_seconds: u64,
    pub follow_redirects: bool,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            user_agent: defaults::USER_AGENT.to_string(),
            timeout_seconds: defaults::TIMEOUT_SECONDS,
            follow_redirects: true,
        }
    }
}

/// CSS selectors and attribute names locating data in storefront markup
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageSelectors {
    /// Catalog grid node carrying the album list
    pub catalog_node: String,
    pub catalog_attribute: String,

    /// Node carrying the page data blob
    pub page_data_node: String,
    pub page_data_attribute: String,

    pub script_tag: String,

    /// Anchors that may link to an album page, in document order
    pub album_link: String,
    pub album_path_prefix: String,

    /// Rendered images searched for art ids
    pub image: String,

    pub og_description: String,
    pub og_image: String,
}

impl Default for PageSelectors {
    fn default() -> Self {
        Self {
            catalog_node: ".music-grid".to_string(),
            catalog_attribute: "data-initial-values".to_string(),
            page_data_node: "#pagedata".to_string(),
            page_data_attribute: "data-blob".to_string(),
            script_tag: "script".to_string(),
            album_link: ".music-grid a[href], #music-grid a[href]".to_string(),
            album_path_prefix: "/album/".to_string(),
            image: "img[src]".to_string(),
            og_description: r#"meta[property="og:description"]"#.to_string(),
            og_image: r#"meta[property="og:image"]"#.to_string(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive used when `RUST_LOG` is unset
    pub level: String,
    pub console_output: bool,
    pub file_output: bool,
    /// Emit JSON lines instead of human-readable text
    pub json_format: bool,
    /// Log directory; defaults to `logs/` next to the executable
    pub log_dir: Option<PathBuf>,
    pub file_name: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: defaults::LOG_LEVEL.to_string(),
            console_output: true,
            file_output: false,
            json_format: false,
            log_dir: None,
            file_name: defaults::LOG_FILE_NAME.to_string(),
        }
    }
}

impl ScraperConfig {
    /// Default config file location (`<config dir>/bandcamp-scraper/config.json`)
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("bandcamp-scraper").join("config.json"))
    }

    /// Load a config file layered with environment overrides.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::from(path))
            .add_source(Self::environment())
            .build()?;

        let config: Self = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Defaults layered with environment overrides only.
    pub fn from_env() -> Result<Self, ConfigError> {
        let settings = config::Config::builder()
            .add_source(Self::environment())
            .build()?;

        let config: Self = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Load `path` if given, else the default location if it exists, else
    /// defaults (still honoring environment overrides).
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = path {
            return Self::from_file(path);
        }

        match Self::default_path().filter(|p| p.exists()) {
            Some(path) => {
                info!("Loading configuration from: {:?}", path);
                Self::from_file(&path)
            }
            None => Self::from_env(),
        }
    }

    fn environment() -> config::Environment {
        config::Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("__")
            .separator("__")
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.http.timeout_seconds == 0 {
            return Err(ConfigError::Validation {
                message: "http.timeout_seconds must be greater than 0".to_string(),
            });
        }

        if self.detail_concurrency == 0 {
            return Err(ConfigError::Validation {
                message: "detail_concurrency must be greater than 0".to_string(),
            });
        }

        let selectors = [
            ("catalog_node", &self.selectors.catalog_node),
            ("page_data_node", &self.selectors.page_data_node),
            ("script_tag", &self.selectors.script_tag),
            ("album_link", &self.selectors.album_link),
            ("image", &self.selectors.image),
            ("og_description", &self.selectors.og_description),
            ("og_image", &self.selectors.og_image),
        ];
        for (name, selector) in selectors {
            if scraper::Selector::parse(selector).is_err() {
                return Err(ConfigError::Validation {
                    message: format!("selectors.{name} is not a valid CSS selector: {selector}"),
                });
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config_is_valid() {
        assert!(ScraperConfig::default().validate().is_ok());
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(file, r#"{{ "http": {{ "timeout_seconds": 5 }}, "detail_concurrency": 2 }}"#).unwrap();

        let config = ScraperConfig::from_file(file.path()).unwrap();
        assert_eq!(config.http.timeout_seconds, 5);
        assert_eq!(config.http.user_agent, defaults::USER_AGENT);
        assert_eq!(config.detail_concurrency, 2);
        assert_eq!(config.selectors, PageSelectors::default());
    }

    #[test]
    fn test_invalid_selector_rejected() {
        let mut config = ScraperConfig::default();
        config.selectors.catalog_node = "[[".to_string();
        assert!(matches!(config.validate(), Err(ConfigError::Validation { .. })));
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let mut config = ScraperConfig::default();
        config.http.timeout_seconds = 0;
        assert!(config.validate().is_err());
    }
}
