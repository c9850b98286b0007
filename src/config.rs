use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::time::Duration;

/// Desktop browser User-Agent sent with page fetches to reduce the chance of being blocked.
pub const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Public YouTube oEmbed endpoint.
pub const YOUTUBE_OEMBED_ENDPOINT: &str = "https://www.youtube.com/oembed";

/// Scraper configuration
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct ScraperConfig {
    /// Page fetch timeout in seconds
    #[serde(default = "default_fetch_timeout")]
    pub fetch_timeout: u64,
    /// oEmbed lookup timeout in seconds
    #[serde(default = "default_oembed_timeout")]
    pub oembed_timeout: u64,
    /// User-Agent header for page fetches
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    /// oEmbed endpoint for video lookups
    #[serde(default = "default_oembed_endpoint")]
    pub oembed_endpoint: String,
    /// Address the HTTP server binds to
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            fetch_timeout: default_fetch_timeout(),
            oembed_timeout: default_oembed_timeout(),
            user_agent: default_user_agent(),
            oembed_endpoint: default_oembed_endpoint(),
            bind_addr: default_bind_addr(),
        }
    }
}

// Default value functions
fn default_fetch_timeout() -> u64 {
    10
}

fn default_oembed_timeout() -> u64 {
    5
}

fn default_user_agent() -> String {
    BROWSER_USER_AGENT.to_string()
}

fn default_oembed_endpoint() -> String {
    YOUTUBE_OEMBED_ENDPOINT.to_string()
}

fn default_bind_addr() -> String {
    "127.0.0.1:3000".to_string()
}

impl ScraperConfig {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded with the following priority (highest to lowest):
    /// 1. Environment variables with RECIPE_SCRAPE__ prefix
    /// 2. recipe-scrape.toml file in current directory
    /// 3. Default values
    ///
    /// Environment variable format: RECIPE_SCRAPE__FETCH_TIMEOUT
    pub fn load() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            // Optional config file (can be missing)
            .add_source(File::with_name("recipe-scrape").required(false))
            .add_source(
                Environment::with_prefix("RECIPE_SCRAPE")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }

    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout)
    }

    pub fn oembed_timeout(&self) -> Duration {
        Duration::from_secs(self.oembed_timeout)
    }
}
