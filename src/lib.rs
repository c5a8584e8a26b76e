// Re-export modules
pub mod config;
pub mod discover;
pub mod extract;
pub mod fetch;
pub mod harvest;
pub mod results;

// Re-export commonly used types for convenience
pub use config::DirectoryConfig;
pub use results::{RecordEvent, StaffRecord};

use fetch::{PageFetcher, WebDriverFetcher};
use std::sync::Arc;
use tokio::sync::mpsc;

/// Main builder for harvesting staff records from a directory listing
pub struct Harvest {
    config: DirectoryConfig,
    fetcher: Option<Arc<dyn PageFetcher>>,
}

impl Harvest {
    /// Create a new Harvest builder for the given origin
    pub fn new(base_origin: &str) -> Self {
        Self {
            config: DirectoryConfig::new(base_origin),
            fetcher: None,
        }
    }

    /// Create a builder from an existing configuration
    pub fn from_config(config: DirectoryConfig) -> Self {
        Self {
            config,
            fetcher: None,
        }
    }

    /// Load the configuration from a JSON file
    pub fn with_config_file(
        mut self,
        path: impl AsRef<std::path::Path>,
    ) -> Result<Self, Box<dyn std::error::Error>> {
        self.config = DirectoryConfig::from_file(path)?;
        Ok(self)
    }

    /// Load the configuration from a JSON string
    pub fn with_config_str(mut self, json: &str) -> Result<Self, Box<dyn std::error::Error>> {
        self.config = DirectoryConfig::from_json(json)?;
        Ok(self)
    }

    /// Set the path of the listing page
    pub fn with_listing_path(mut self, path: &str) -> Self {
        self.config.listing_path = path.to_string();
        self
    }

    /// Set the path prefix a detail link must start with
    pub fn with_detail_prefix(mut self, prefix: &str) -> Self {
        self.config.detail_path_prefix = prefix.to_string();
        self
    }

    /// Set the maximum number of detail links taken from the listing
    pub fn with_max_links(mut self, max_links: usize) -> Self {
        self.config.max_links = max_links;
        self
    }

    /// Set the maximum number of concurrent detail-page fetches
    pub fn with_max_concurrency(mut self, max_concurrency: usize) -> Self {
        self.config.max_concurrency = max_concurrency;
        self
    }

    /// Set the WebDriver URL used by the default fetcher
    pub fn with_webdriver_url(mut self, url: &str) -> Self {
        self.config.webdriver_url = url.to_string();
        self
    }

    /// Replace the page fetcher (tests, alternate transports)
    pub fn with_fetcher(mut self, fetcher: Arc<dyn PageFetcher>) -> Self {
        self.fetcher = Some(fetcher);
        self
    }

    /// The effective configuration
    pub fn config(&self) -> &DirectoryConfig {
        &self.config
    }

    /// Start the harvest and get a receiver for record events
    pub async fn generate(
        mut self,
    ) -> Result<mpsc::Receiver<RecordEvent>, Box<dyn std::error::Error>> {
        // Override the WebDriver URL with an environment variable if provided
        if let Ok(webdriver_url) = std::env::var("WEBDRIVER_URL") {
            if !webdriver_url.is_empty() {
                self.config.webdriver_url = webdriver_url;
            }
        }

        let fetcher: Arc<dyn PageFetcher> = match self.fetcher.take() {
            Some(fetcher) => fetcher,
            None => Arc::new(WebDriverFetcher::new(&self.config.webdriver_url)),
        };

        harvest::start(&self.config, fetcher).await
    }
}
