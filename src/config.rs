use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use url::Url;

/// Configuration for a directory harvest
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DirectoryConfig {
    /// Origin the relative links are resolved against,
    /// e.g. "https://www.htl-salzburg.ac.at"
    pub base_origin: String,

    /// Path of the listing page that enumerates the detail links
    #[serde(default = "default_listing_path")]
    pub listing_path: String,

    /// Path prefix a valid detail link must start with
    #[serde(default = "default_detail_path_prefix")]
    pub detail_path_prefix: String,

    /// Maximum number of detail links taken from the listing
    #[serde(default = "default_max_links")]
    pub max_links: usize,

    /// Maximum number of concurrent detail-page fetches
    #[serde(default = "default_max_concurrency")]
    pub max_concurrency: usize,

    /// URL for the WebDriver instance
    #[serde(default = "default_webdriver_url")]
    pub webdriver_url: String,
}

/// Default path of the listing page
fn default_listing_path() -> String {
    "/lehrerinnen.html".to_string()
}

/// Default path prefix for detail links
fn default_detail_path_prefix() -> String {
    "/lehrerinnen-details/".to_string()
}

/// Default value for max_links
fn default_max_links() -> usize {
    5
}

/// Default value for max_concurrency
fn default_max_concurrency() -> usize {
    5
}

/// Default value for webdriver_url
fn default_webdriver_url() -> String {
    "http://localhost:4444".to_string()
}

impl DirectoryConfig {
    /// Create a new configuration with default values
    pub fn new(base_origin: &str) -> Self {
        Self {
            base_origin: base_origin.to_string(),
            listing_path: default_listing_path(),
            detail_path_prefix: default_detail_path_prefix(),
            max_links: default_max_links(),
            max_concurrency: default_max_concurrency(),
            webdriver_url: default_webdriver_url(),
        }
    }

    /// Load configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, Box<dyn Error>> {
        let mut file = File::open(path)?;
        let mut contents = String::new();
        file.read_to_string(&mut contents)?;

        Self::from_json(&contents)
    }

    /// Load configuration from a JSON string
    pub fn from_json(json: &str) -> Result<Self, Box<dyn Error>> {
        let config: Self = serde_json::from_str(json)?;
        Ok(config)
    }

    /// Absolute URL for a path on the configured origin
    pub fn absolute_url(&self, path: &str) -> String {
        format!("{}{}", self.base_origin.trim_end_matches('/'), path)
    }

    /// Absolute URL of the listing page
    pub fn listing_url(&self) -> String {
        self.absolute_url(&self.listing_path)
    }

    /// Check that the configuration is usable
    pub fn validate(&self) -> Result<(), Box<dyn Error>> {
        let parsed = Url::parse(&self.base_origin)?;
        if parsed.cannot_be_a_base() {
            return Err(format!("base origin is not an absolute URL: {}", self.base_origin).into());
        }
        if self.max_links == 0 {
            return Err("max_links must be at least 1".into());
        }
        Ok(())
    }
}
