use crate::{config::Config, Fetcher, ScrapeError};
use headless_chrome::{Browser, LaunchOptionsBuilder, Tab};
use std::{ffi::OsStr, sync::Arc};
use tracing::{debug, info};

/// Plain HTTP GET, for pages that are rendered on the server.
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new(config: &Config) -> Result<Self, ScrapeError> {
        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .build()?;
        Ok(HttpFetcher { client })
    }
}

#[async_trait::async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &str, _wait_for: Option<&str>) -> Result<String, ScrapeError> {
        debug!("GET {}", url);
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ScrapeError::Status {
                url: url.to_string(),
                status,
            });
        }
        Ok(response.text().await?)
    }
}

/// A Chrome tab driven over the DevTools protocol. The browser process is
/// killed when this is dropped.
pub struct BrowserFetcher {
    _browser: Browser,
    tab: Arc<Tab>,
}

impl BrowserFetcher {
    pub fn launch(config: &Config) -> Result<Self, ScrapeError> {
        info!(
            "Launching browser (headless: {}, executable: {})",
            config.headless,
            config
                .chrome_location
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "auto".to_string())
        );

        let user_agent = format!("--user-agent={}", config.user_agent);
        let options = LaunchOptionsBuilder::default()
            .headless(config.headless)
            .path(config.chrome_location.clone())
            .args(vec![OsStr::new(&user_agent)])
            .build()
            .map_err(|e| ScrapeError::Browser(format!("Invalid launch options: {}", e)))?;

        let browser = Browser::new(options)
            .map_err(|e| ScrapeError::Browser(format!("Failed to launch browser: {}", e)))?;
        let tab = browser
            .new_tab()
            .map_err(|e| ScrapeError::Browser(format!("Failed to open tab: {}", e)))?;

        Ok(BrowserFetcher {
            _browser: browser,
            tab,
        })
    }
}

#[async_trait::async_trait]
impl Fetcher for BrowserFetcher {
    async fn fetch(&self, url: &str, wait_for: Option<&str>) -> Result<String, ScrapeError> {
        let tab = Arc::clone(&self.tab);
        let url = url.to_string();
        let wait_for = wait_for.map(ToString::to_string);

        tokio::task::spawn_blocking(move || {
            debug!("Navigate {}", url);
            tab.navigate_to(&url)
                .and_then(|tab| tab.wait_until_navigated())
                .map_err(|e| ScrapeError::Browser(format!("Navigation to {} failed: {}", url, e)))?;

            if let Some(selector) = wait_for.as_deref() {
                tab.wait_for_element(selector).map_err(|e| {
                    ScrapeError::Browser(format!("`{}` never appeared on {}: {}", selector, url, e))
                })?;
            }

            tab.get_content()
                .map_err(|e| ScrapeError::Browser(format!("Failed to read {}: {}", url, e)))
        })
        .await?
    }
}
