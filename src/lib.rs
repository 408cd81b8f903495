use scraper::Html;
use std::{
    fs::{self, File},
    io::{BufWriter, Write},
    path::Path,
};
use tracing::{debug, info, warn};

pub mod check;
pub mod config;
pub mod fetch;
pub mod knitpicks;
pub mod lovecrafts;
pub mod normalize;

mod data;
mod error;
mod utils;

pub use data::{CleanedRow, RawProductRecord};
pub use error::{CheckError, NormalizeError, ScrapeError};

/// A shop whose listing and product pages we know how to read.
pub trait Site {
    fn name(&self) -> &'static str;
    fn listing_url(&self) -> &str;

    /// True when the listing only exists after client-side rendering, e.g. when
    /// its filters live in the URL fragment.
    fn needs_browser(&self) -> bool {
        false
    }

    /// Selector that only exists once the listing has rendered.
    fn listing_ready(&self) -> Option<&'static str> {
        None
    }

    /// Selector that only exists once a product page has rendered.
    fn product_ready(&self) -> Option<&'static str> {
        None
    }

    fn extract_links(&self, doc: &Html) -> Vec<String>;
    fn extract_record(&self, url: &str, doc: &Html) -> Result<RawProductRecord, ScrapeError>;
}

#[async_trait::async_trait]
pub trait Fetcher {
    /// Returns the page source of `url`, once `wait_for` matches if given.
    async fn fetch(&self, url: &str, wait_for: Option<&str>) -> Result<String, ScrapeError>;
}

#[derive(Debug, Default)]
pub struct CollectOutcome {
    pub records: Vec<RawProductRecord>,
    pub failures: Vec<(String, ScrapeError)>,
}

/// Visits every product on the site's listing page, in listing order.
///
/// Without `keep_going` the first failing product aborts the run and nothing
/// collected so far is returned.
pub async fn collect<S, F>(
    site: &S,
    fetcher: &F,
    keep_going: bool,
) -> Result<CollectOutcome, ScrapeError>
where
    S: Site + ?Sized,
    F: Fetcher + ?Sized,
{
    info!("[{}] Open listing {}", site.name(), site.listing_url());
    let html = fetcher
        .fetch(site.listing_url(), site.listing_ready())
        .await?;
    let links = {
        let doc = Html::parse_document(&html);
        site.extract_links(&doc)
    };
    info!("[{}] Found {} product links", site.name(), links.len());
    if links.is_empty() {
        return Err(ScrapeError::NoProducts {
            url: site.listing_url().to_string(),
        });
    }

    let mut outcome = CollectOutcome::default();
    for (i, link) in links.iter().enumerate() {
        match scrape_product(site, fetcher, link).await {
            Ok(record) => {
                info!("[{}/{}] Extracted {}", i + 1, links.len(), link);
                outcome.records.push(record);
            }
            Err(e) if keep_going => {
                warn!("[{}/{}] Skip {}: {}", i + 1, links.len(), link, e);
                outcome.failures.push((link.clone(), e));
            }
            Err(e) => return Err(e),
        }
    }

    Ok(outcome)
}

async fn scrape_product<S, F>(site: &S, fetcher: &F, url: &str) -> Result<RawProductRecord, ScrapeError>
where
    S: Site + ?Sized,
    F: Fetcher + ?Sized,
{
    debug!("Visit {}", url);
    let html = fetcher.fetch(url, site.product_ready()).await?;
    let doc = Html::parse_document(&html);
    site.extract_record(url, &doc)
}

/// Writes the records as one JSON array, creating parent directories.
pub fn write_records<P: AsRef<Path>>(path: P, records: &[RawProductRecord]) -> Result<(), ScrapeError> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer(&mut writer, records)?;
    writer.flush()?;
    info!("Wrote {} records to {}", records.len(), path.display());
    Ok(())
}
