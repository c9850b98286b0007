use log::{debug, error};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, UPGRADE_INSECURE_REQUESTS};
use reqwest::{Client, Url};
use std::time::Duration;

use crate::error::ScrapeError;

/// Fetches HTML pages with a browser-like header set and a bounded timeout.
#[derive(Debug, Clone)]
pub struct RequestFetcher {
    client: Client,
}

impl RequestFetcher {
    pub fn new(timeout: Duration, user_agent: &str) -> Result<Self, ScrapeError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            ACCEPT,
            HeaderValue::from_static(
                "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,*/*;q=0.8",
            ),
        );
        headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.5"));
        headers.insert(UPGRADE_INSECURE_REQUESTS, HeaderValue::from_static("1"));

        // Accept-Encoding is negotiated by reqwest's gzip/brotli/deflate features
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .default_headers(headers)
            .build()?;

        Ok(Self::from_client(client))
    }

    /// Wrap an already configured client
    pub(crate) fn from_client(client: Client) -> Self {
        Self { client }
    }

    /// Fetch the page body.
    ///
    /// A non-success status is `FetchFailed`, a success status with an empty
    /// body is `EmptyResponse`.
    pub async fn fetch(&self, url: &Url) -> Result<String, ScrapeError> {
        debug!("fetch: GET {}", url);
        let response = self.client.get(url.clone()).send().await?;

        let status = response.status();
        if !status.is_success() {
            error!("Failed to fetch URL: {}", status);
            return Err(ScrapeError::FetchFailed {
                status: status.as_u16(),
            });
        }

        let html = response.text().await?;
        if html.is_empty() {
            error!("Empty HTML response from {}", url);
            return Err(ScrapeError::EmptyResponse);
        }

        debug!("fetch: received {} bytes", html.len());
        Ok(html)
    }
}
