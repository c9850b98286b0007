use log::warn;
use std::time::Duration;

use crate::config::ScraperConfig;
use crate::fetchers::RequestFetcher;
use crate::pipelines::url::{self as url_pipeline, parse_target, source_domain};
use crate::video::OEmbedClient;
use crate::{ExtractedMetadata, ScrapeError};

/// Builder for configuring a [`MetadataExtractor`]
#[derive(Debug, Default)]
pub struct MetadataExtractorBuilder {
    config: ScraperConfig,
    fetch_timeout: Option<Duration>,
    oembed_timeout: Option<Duration>,
}

impl MetadataExtractorBuilder {
    /// Start from a loaded configuration instead of the defaults
    ///
    /// # Example
    /// ```no_run
    /// use recipe_scrape::{MetadataExtractor, ScraperConfig};
    ///
    /// let config = ScraperConfig::load().unwrap();
    /// let builder = MetadataExtractor::builder().config(config);
    /// ```
    pub fn config(mut self, config: ScraperConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the page fetch timeout
    ///
    /// # Example
    /// ```
    /// use recipe_scrape::MetadataExtractor;
    /// use std::time::Duration;
    ///
    /// let builder = MetadataExtractor::builder().fetch_timeout(Duration::from_secs(15));
    /// ```
    pub fn fetch_timeout(mut self, duration: Duration) -> Self {
        self.fetch_timeout = Some(duration);
        self
    }

    /// Set the oEmbed lookup timeout
    pub fn oembed_timeout(mut self, duration: Duration) -> Self {
        self.oembed_timeout = Some(duration);
        self
    }

    /// Set the User-Agent sent with page fetches
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.config.user_agent = user_agent.into();
        self
    }

    /// Point video lookups at a different oEmbed endpoint
    ///
    /// # Example
    /// ```
    /// use recipe_scrape::MetadataExtractor;
    ///
    /// let builder = MetadataExtractor::builder().oembed_endpoint("http://127.0.0.1:9000/oembed");
    /// ```
    pub fn oembed_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.config.oembed_endpoint = endpoint.into();
        self
    }

    /// Build the extractor
    ///
    /// # Errors
    /// Returns `ScrapeError::Request` if an HTTP client cannot be created.
    pub fn build(self) -> Result<MetadataExtractor, ScrapeError> {
        let fetch_timeout = self
            .fetch_timeout
            .unwrap_or_else(|| self.config.fetch_timeout());
        let oembed_timeout = self
            .oembed_timeout
            .unwrap_or_else(|| self.config.oembed_timeout());

        let fetcher = RequestFetcher::new(fetch_timeout, &self.config.user_agent)?;
        let oembed = OEmbedClient::new(oembed_timeout, self.config.oembed_endpoint)?;

        Ok(MetadataExtractor { fetcher, oembed })
    }
}

/// Extracts recipe metadata from URLs
///
/// Holds its HTTP clients and no other state, so one instance can serve
/// any number of concurrent calls.
#[derive(Debug, Clone)]
pub struct MetadataExtractor {
    fetcher: RequestFetcher,
    oembed: OEmbedClient,
}

impl MetadataExtractor {
    /// Creates a new builder for the extractor
    ///
    /// # Example
    /// ```
    /// use recipe_scrape::MetadataExtractor;
    ///
    /// let extractor = MetadataExtractor::builder().build().unwrap();
    /// ```
    pub fn builder() -> MetadataExtractorBuilder {
        MetadataExtractorBuilder::default()
    }

    /// Extract metadata, surfacing every failure
    ///
    /// # Errors
    /// - `MissingUrl` / `InvalidUrl` before any network call
    /// - `FetchFailed` for a non-success status from the target site
    /// - `EmptyResponse` for a success status with no body
    /// - `Request` for transport errors and timeouts
    ///
    /// # Example
    /// ```no_run
    /// # use recipe_scrape::MetadataExtractor;
    /// # #[tokio::main]
    /// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let extractor = MetadataExtractor::builder().build()?;
    /// let metadata = extractor.extract("https://example.com/recipe").await?;
    /// println!("{}", metadata.title);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn extract(&self, url: &str) -> Result<ExtractedMetadata, ScrapeError> {
        let url = parse_target(url)?;
        url_pipeline::process(&url, &self.fetcher, &self.oembed).await
    }

    /// Extract metadata, degrading to a minimal record on anything but bad input
    ///
    /// The fallback record keeps the domain derived from the URL so the
    /// caller can still save the bookmark and fill the rest in by hand.
    pub async fn extract_or_fallback(&self, url: &str) -> Result<ExtractedMetadata, ScrapeError> {
        let url = parse_target(url)?;
        match url_pipeline::process(&url, &self.fetcher, &self.oembed).await {
            Ok(metadata) => Ok(metadata),
            Err(e) => {
                warn!("Falling back to empty metadata for {}: {}", url, e);
                Ok(ExtractedMetadata::fallback(source_domain(&url)))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_overrides() {
        let builder = MetadataExtractor::builder()
            .fetch_timeout(Duration::from_secs(3))
            .oembed_timeout(Duration::from_millis(1500))
            .user_agent("TestAgent/1.0")
            .oembed_endpoint("http://localhost/oembed");

        assert_eq!(builder.fetch_timeout, Some(Duration::from_secs(3)));
        assert_eq!(builder.oembed_timeout, Some(Duration::from_millis(1500)));
        assert_eq!(builder.config.user_agent, "TestAgent/1.0");
        assert_eq!(builder.config.oembed_endpoint, "http://localhost/oembed");
        assert!(builder.build().is_ok());
    }

    #[tokio::test]
    async fn test_invalid_url_rejected_in_both_modes() {
        let extractor = MetadataExtractor::builder().build().unwrap();

        assert!(matches!(
            extractor.extract("definitely not a url").await,
            Err(ScrapeError::InvalidUrl(_))
        ));
        assert!(matches!(
            extractor.extract_or_fallback("").await,
            Err(ScrapeError::MissingUrl)
        ));
    }
}
