//! HTTP surface: `POST /api/scrape-recipe` and `GET /health`.

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use log::{error, info, warn};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::config::ScraperConfig;
use crate::{ExtractedMetadata, MetadataExtractor, ScrapeError};

#[derive(Debug, Deserialize)]
pub struct ScrapeRequest {
    #[serde(default)]
    pub url: Option<String>,
}

/// Error payload returned for every failed scrape.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorBody {
    pub error: String,
    pub code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// A scrape failure together with the URL the caller asked for.
#[derive(Debug)]
pub struct ApiError {
    pub error: ScrapeError,
    pub url: Option<String>,
}

impl From<ScrapeError> for ApiError {
    fn from(error: ScrapeError) -> Self {
        Self { error, url: None }
    }
}

impl ApiError {
    fn for_url(error: ScrapeError, url: &str) -> Self {
        Self {
            error,
            url: Some(url.to_string()),
        }
    }

    fn status_and_body(&self) -> (StatusCode, ErrorBody) {
        let (status, code, message) = match &self.error {
            ScrapeError::MissingUrl => (
                StatusCode::BAD_REQUEST,
                "missing_url",
                "URL is required".to_string(),
            ),
            ScrapeError::InvalidRequest(_) => (
                StatusCode::BAD_REQUEST,
                "invalid_request",
                "Invalid request body".to_string(),
            ),
            ScrapeError::InvalidUrl(_) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "invalid_url",
                "Invalid URL".to_string(),
            ),
            ScrapeError::FetchFailed { status } => (
                StatusCode::BAD_GATEWAY,
                "upstream_status",
                format!("Failed to fetch URL: {status}"),
            ),
            ScrapeError::EmptyResponse => (
                StatusCode::BAD_GATEWAY,
                "upstream_empty",
                "Received empty response from URL".to_string(),
            ),
            _ => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "scrape_failed",
                "Failed to scrape recipe metadata".to_string(),
            ),
        };

        // Diagnostics only accompany failures past input validation
        let (details, url) = if self.error.is_client_error() {
            (None, None)
        } else {
            (Some(self.error.to_string()), self.url.clone())
        };

        let body = ErrorBody {
            error: message,
            code: code.to_string(),
            details,
            url,
        };
        (status, body)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = self.status_and_body();
        if status.is_server_error() {
            error!("Error scraping recipe: {}", self.error);
        } else {
            warn!("Rejected scrape request: {}", self.error);
        }
        (status, Json(body)).into_response()
    }
}

/// POST /api/scrape-recipe
///
/// Body: `{"url": "https://..."}`. Returns the extracted metadata.
pub async fn scrape_recipe(
    State(extractor): State<Arc<MetadataExtractor>>,
    payload: Result<Json<ScrapeRequest>, JsonRejection>,
) -> Result<Json<ExtractedMetadata>, ApiError> {
    let Json(request) =
        payload.map_err(|rejection| ScrapeError::InvalidRequest(rejection.body_text()))?;

    let url = request
        .url
        .filter(|url| !url.trim().is_empty())
        .ok_or(ScrapeError::MissingUrl)?;

    let metadata = extractor
        .extract(&url)
        .await
        .map_err(|e| ApiError::for_url(e, &url))?;

    Ok(Json(metadata))
}

/// GET /health
pub async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

/// Build the application router
pub fn router(extractor: Arc<MetadataExtractor>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/scrape-recipe", post(scrape_recipe))
        .with_state(extractor)
}

/// Bind `config.bind_addr` and serve until the process is stopped
pub async fn serve(config: ScraperConfig) -> Result<(), ScrapeError> {
    let bind_addr = config.bind_addr.clone();
    let extractor = MetadataExtractor::builder().config(config).build()?;

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    info!("Listening on {}", listener.local_addr()?);

    axum::serve(listener, router(Arc::new(extractor))).await?;
    Ok(())
}
