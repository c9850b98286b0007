use log::{debug, info};
use reqwest::Url;

use crate::error::ScrapeError;
use crate::extractors::extract_from_html;
use crate::fetchers::RequestFetcher;
use crate::model::ExtractedMetadata;
use crate::video::{is_youtube_host, video_id, OEmbedClient};

/// Validate the caller's input as an absolute http(s) URL with a host.
pub fn parse_target(input: &str) -> Result<Url, ScrapeError> {
    let input = input.trim();
    if input.is_empty() {
        return Err(ScrapeError::MissingUrl);
    }

    let url = Url::parse(input).map_err(|e| ScrapeError::InvalidUrl(e.to_string()))?;

    match url.scheme() {
        "http" | "https" => {}
        scheme => {
            return Err(ScrapeError::InvalidUrl(format!(
                "unsupported scheme: {scheme}"
            )))
        }
    }

    if url.host_str().map_or(true, str::is_empty) {
        return Err(ScrapeError::InvalidUrl("URL has no host".to_string()));
    }

    Ok(url)
}

/// Hostname with a leading `www.` removed.
pub fn source_domain(url: &Url) -> String {
    let host = url.host_str().unwrap_or_default();
    host.strip_prefix("www.").unwrap_or(host).to_string()
}

/// Process a URL to extract recipe metadata
///
/// This pipeline:
/// 1. For YouTube URLs with a video id, asks the oEmbed endpoint and returns
///    straight away on success
/// 2. Otherwise fetches the page with RequestFetcher
/// 3. Resolves title, description and thumbnail from social metadata tags
/// 4. Takes prep time and cuisine from the first JSON-LD Recipe
pub async fn process(
    url: &Url,
    fetcher: &RequestFetcher,
    oembed: &OEmbedClient,
) -> Result<ExtractedMetadata, ScrapeError> {
    // 1. Video platforms
    if url.host_str().is_some_and(is_youtube_host) {
        match video_id(url) {
            Some(id) => {
                if let Some(metadata) = oembed.lookup(&id).await {
                    return Ok(metadata);
                }
                debug!("oEmbed unavailable for {}, scraping the page instead", url);
            }
            None => debug!("No video id in {}, scraping the page instead", url),
        }
    }

    // 2. Fetch HTML
    let html = fetcher.fetch(url).await?;

    // 3-4. Parse and compile; the document never lives across an await
    let metadata = extract_from_html(&html, &source_domain(url));
    info!("Scraped metadata: {:?}", metadata);
    Ok(metadata)
}
