use thiserror::Error;

/// Errors that can occur while scraping recipe metadata
#[derive(Error, Debug)]
pub enum ScrapeError {
    /// No URL was supplied
    #[error("URL is required")]
    MissingUrl,

    /// Request body could not be read as a scrape request
    #[error("Invalid request body: {0}")]
    InvalidRequest(String),

    /// Input is not an absolute http(s) URL
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Target site answered with a non-success status
    #[error("Failed to fetch URL: {status}")]
    FetchFailed { status: u16 },

    /// Target site answered with a success status but no body
    #[error("Received empty response from URL")]
    EmptyResponse,

    /// Transport failure or timeout talking to the target site
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// JSON (de)serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// I/O error, e.g. binding the server socket
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ScrapeError {
    /// True for errors caused by the caller's input rather than the target site.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            ScrapeError::MissingUrl | ScrapeError::InvalidRequest(_) | ScrapeError::InvalidUrl(_)
        )
    }
}
