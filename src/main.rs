//! Command-line entry point
//!
//! ```text
//! bandcamp-scraper <subdomain|url> [--music] [--details] [--config PATH]
//! ```
//!
//! Prints the reconciled catalog page (or, with `--details`, the catalog plus
//! every album's track data) as pretty JSON on stdout. Logs go to stderr.

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use tracing::{error, warn};

use bandcamp_scraper_lib::infrastructure::logging::init_logging_with_config;
use bandcamp_scraper_lib::{ArtistIdentifier, CatalogPipeline, ScrapeError, ScraperConfig};

const USAGE: &str = "usage: bandcamp-scraper <subdomain|url> [--music] [--details] [--config PATH]";

#[derive(Debug)]
struct CliArgs {
    identifier: ArtistIdentifier,
    use_music_path: bool,
    with_details: bool,
    config_path: Option<PathBuf>,
}

impl CliArgs {
    fn parse(args: impl IntoIterator<Item = String>) -> Result<Self> {
        let mut identifier = None;
        let mut use_music_path = false;
        let mut with_details = false;
        let mut config_path = None;

        let mut args = args.into_iter();
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--music" => use_music_path = true,
                "--details" => with_details = true,
                "--config" => {
                    let path = args.next().context("--config needs a path")?;
                    config_path = Some(PathBuf::from(path));
                }
                "-h" | "--help" => bail!(USAGE),
                flag if flag.starts_with("--") => bail!("unknown option {flag}\n{USAGE}"),
                _ if identifier.is_some() => bail!("more than one storefront given\n{USAGE}"),
                value => identifier = Some(value.parse::<ArtistIdentifier>()?),
            }
        }

        Ok(Self {
            identifier: identifier.context(USAGE)?,
            use_music_path,
            with_details,
            config_path,
        })
    }
}

fn report_failure(identifier: &ArtistIdentifier, err: &ScrapeError) {
    error!("Scrape of {} failed: {}", identifier, err);
    if let ScrapeError::Extraction(extraction) = err {
        if extraction.is_page_shape_mismatch() {
            warn!("{} does not look like a Bandcamp storefront", identifier);
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = CliArgs::parse(std::env::args().skip(1))?;
    let config = ScraperConfig::load_or_default(args.config_path.as_deref())?;
    init_logging_with_config(&config.logging)?;

    let pipeline = CatalogPipeline::from_config(&config)?;

    let output = if args.with_details {
        let discography = pipeline
            .fetch_discography(&args.identifier, args.use_music_path, config.detail_concurrency)
            .await
            .inspect_err(|e| report_failure(&args.identifier, e))?;
        serde_json::to_string_pretty(&discography)?
    } else {
        let page = pipeline
            .fetch_catalog_page(&args.identifier, args.use_music_path)
            .await
            .inspect_err(|e| report_failure(&args.identifier, e))?;
        if page.is_empty() {
            warn!("No catalog found for {}", args.identifier);
        }
        serde_json::to_string_pretty(&page)?
    };

    println!("{output}");
    Ok(())
}
