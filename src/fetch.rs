use async_trait::async_trait;
use fantoccini::{Client, ClientBuilder};

/// Retrieves the text content of a page
///
/// Implementations signal any failure (connection, navigation, bad status)
/// by returning an empty string. Callers treat empty content as "nothing to
/// extract" and never see the underlying cause.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> String;
}

/// `PageFetcher` backed by a WebDriver session
///
/// Opens one session per fetch, so concurrent fetches never share a
/// browser navigation.
pub struct WebDriverFetcher {
    webdriver_url: String,
}

impl WebDriverFetcher {
    /// Create a fetcher for the given WebDriver instance
    pub fn new(webdriver_url: &str) -> Self {
        Self {
            webdriver_url: webdriver_url.to_string(),
        }
    }

    /// Connects to the WebDriver instance
    async fn connect(&self) -> Option<Client> {
        // Try to connect to the specified WebDriver URL
        match ClientBuilder::native().connect(&self.webdriver_url).await {
            Ok(client) => {
                ::log::debug!("Connected to WebDriver at {}", self.webdriver_url);
                return Some(client);
            }
            Err(e) => {
                ::log::error!(
                    "Failed to connect to WebDriver at {}: {}",
                    self.webdriver_url,
                    e
                );
            }
        }

        // If we couldn't connect, try with common alternative URLs
        let fallback_urls = [
            "http://localhost:9515", // ChromeDriver default
            "http://localhost:4723", // Appium default
            "http://localhost:9222", // Chrome debug port default
            "http://127.0.0.1:4444", // Try with IP instead of localhost
        ];

        for url in fallback_urls.iter() {
            if *url == self.webdriver_url {
                continue; // Skip if it's the same as the one we already tried
            }

            ::log::info!("Trying fallback WebDriver URL: {}", url);
            match ClientBuilder::native().connect(url).await {
                Ok(client) => {
                    ::log::debug!("Connected to fallback WebDriver at {}", url);
                    return Some(client);
                }
                Err(_) => {
                    // Don't log error for fallbacks to avoid log spam
                }
            }
        }

        ::log::error!("Failed to connect to any WebDriver server");
        ::log::error!(
            "Make sure a WebDriver server is running or set the WEBDRIVER_URL environment variable"
        );
        None
    }
}

#[async_trait]
impl PageFetcher for WebDriverFetcher {
    async fn fetch(&self, url: &str) -> String {
        let Some(client) = self.connect().await else {
            return String::new();
        };

        let content = match client.goto(url).await {
            Ok(_) => match client.source().await {
                Ok(source) => source,
                Err(e) => {
                    ::log::error!("Failed to get source for {}: {}", url, e);
                    String::new()
                }
            },
            Err(e) => {
                ::log::error!("Failed to access {}: {}", url, e);
                String::new()
            }
        };

        if let Err(e) = client.close().await {
            ::log::warn!("Failed to close WebDriver session for {}: {}", url, e);
        }

        content
    }
}
