use clap::{Parser, Subcommand, ValueEnum};
use std::{io, path::PathBuf};
use tracing::{debug, info, warn};
use tracing_error::ErrorLayer;
use tracing_subscriber::prelude::*;
use yarn_scraper::{
    check, collect,
    config::{self, Config},
    fetch::{BrowserFetcher, HttpFetcher},
    knitpicks::KnitPicks,
    lovecrafts::LoveCrafts,
    normalize::{self, NormalizeOptions},
    write_records, Fetcher, Site,
};

const DEFAULT_JSON: &str = "output/product_info_v3.json";
const DEFAULT_CSV: &str = "output/product_info_v2.csv";

#[derive(Parser)]
#[command(name = "yarn-scraper", about = "Scrape yarn listings and export them as CSV")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Scrape every product on a shop's listing page into a JSON file
    Collect {
        #[arg(value_enum)]
        site: SiteName,
        #[arg(short, long, default_value = DEFAULT_JSON)]
        output: PathBuf,
        /// Render pages in Chrome instead of plain HTTP
        #[arg(long)]
        browser: bool,
        /// Skip products that fail instead of aborting the run
        #[arg(long)]
        keep_going: bool,
    },
    /// Print records that have empty fields
    Check {
        #[arg(default_value = DEFAULT_JSON)]
        input: PathBuf,
    },
    /// Convert scraped JSON into a cleaned CSV
    Normalize {
        #[arg(default_value = DEFAULT_JSON)]
        input: PathBuf,
        #[arg(default_value = DEFAULT_CSV)]
        output: PathBuf,
        #[arg(long, default_value_t = 1.0)]
        weight_factor: f64,
        #[arg(long, default_value = "oz")]
        weight_suffix: String,
        #[arg(long, default_value = "yds")]
        length_marker: String,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum SiteName {
    Lovecrafts,
    Knitpicks,
}

impl SiteName {
    fn site(self) -> Box<dyn Site> {
        match self {
            SiteName::Lovecrafts => Box::new(LoveCrafts),
            SiteName::Knitpicks => Box::new(KnitPicks),
        }
    }
}

/// Client-rendered listings always go through Chrome, whatever `--browser` says.
fn use_browser(site: &dyn Site, requested: bool) -> bool {
    if !requested && site.needs_browser() {
        info!("[{}] Listing is rendered client-side, using the browser", site.name());
    }
    requested || site.needs_browser()
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let dotenv = config::load_dotenv();

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .with(
            tracing_subscriber::EnvFilter::try_from_env("LOG_LEVEL").unwrap_or_else(|_| {
                "info,html5ever=error,selectors=error,hyper=warn,reqwest=info,headless_chrome=warn"
                    .into()
            }),
        )
        .with(ErrorLayer::default())
        .init();

    if let Some(path) = dotenv {
        debug!("Loaded {}", path.display());
    }
    let config = Config::from_env();

    match Cli::parse().command {
        Command::Collect {
            site,
            output,
            browser,
            keep_going,
        } => {
            let site = site.site();
            let fetcher: Box<dyn Fetcher> = if use_browser(site.as_ref(), browser) {
                Box::new(BrowserFetcher::launch(&config)?)
            } else {
                Box::new(HttpFetcher::new(&config)?)
            };

            let outcome = collect(site.as_ref(), fetcher.as_ref(), keep_going).await?;
            if !outcome.failures.is_empty() {
                warn!("{} products were skipped", outcome.failures.len());
            }
            write_records(&output, &outcome.records)?;
        }
        Command::Check { input } => {
            let count = check::check_for_missing(&input, io::stdout().lock())?;
            info!("{} incomplete records", count);
        }
        Command::Normalize {
            input,
            output,
            weight_factor,
            weight_suffix,
            length_marker,
        } => {
            let options = NormalizeOptions {
                weight_factor,
                weight_suffix,
                length_marker,
            };
            normalize::load_to_csv(&input, &output, &options)?;
        }
    }

    Ok(())
}
