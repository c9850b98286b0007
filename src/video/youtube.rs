use log::{debug, info};
use reqwest::{Client, Url};
use serde::Deserialize;
use std::time::Duration;

use crate::error::ScrapeError;
use crate::model::ExtractedMetadata;

/// Domain reported for every video resolved through oEmbed.
pub const YOUTUBE_DOMAIN: &str = "youtube.com";

const DEFAULT_VIDEO_TITLE: &str = "YouTube Video";

/// True for youtube.com (and its subdomains) and the youtu.be short-link host.
pub fn is_youtube_host(host: &str) -> bool {
    host == "youtube.com"
        || host.ends_with(".youtube.com")
        || host == "youtu.be"
        || host == "www.youtu.be"
}

/// Extract the video identifier from a YouTube URL.
///
/// - `youtube.com/watch?v=<id>`
/// - `youtu.be/<id>`
/// - `youtube.com/shorts/<id>` and `youtube.com/embed/<id>`
pub fn video_id(url: &Url) -> Option<String> {
    let host = url.host_str()?;
    let mut segments = url
        .path_segments()
        .map(|s| s.filter(|s| !s.is_empty()).collect::<Vec<_>>())
        .unwrap_or_default()
        .into_iter();

    let id = if host == "youtu.be" || host == "www.youtu.be" {
        segments.next().map(str::to_string)
    } else if is_youtube_host(host) {
        url.query_pairs()
            .find(|(key, _)| key == "v")
            .map(|(_, value)| value.into_owned())
            .or_else(|| match (segments.next(), segments.next()) {
                (Some("shorts" | "embed"), Some(id)) => Some(id.to_string()),
                _ => None,
            })
    } else {
        None
    };

    id.filter(|id| !id.is_empty())
}

#[derive(Debug, Deserialize)]
struct YouTubeOEmbed {
    title: Option<String>,
    author_name: Option<String>,
    thumbnail_url: Option<String>,
}

impl From<YouTubeOEmbed> for ExtractedMetadata {
    fn from(oembed: YouTubeOEmbed) -> Self {
        let title = oembed
            .title
            .filter(|t| !t.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_VIDEO_TITLE.to_string());
        let description = oembed
            .author_name
            .filter(|a| !a.trim().is_empty())
            .map(|author| format!("Video by {author}"))
            .unwrap_or_default();

        ExtractedMetadata {
            title,
            description,
            thumbnail_url: oembed.thumbnail_url.unwrap_or_default(),
            source_domain: YOUTUBE_DOMAIN.to_string(),
            prep_time: None,
            cuisine_type: None,
        }
    }
}

/// Client for the YouTube oEmbed endpoint.
#[derive(Debug, Clone)]
pub struct OEmbedClient {
    client: Client,
    endpoint: String,
}

impl OEmbedClient {
    pub fn new(timeout: Duration, endpoint: impl Into<String>) -> Result<Self, ScrapeError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }

    /// Resolve video metadata, or `None` on timeout, non-success status or
    /// a malformed response.
    pub async fn lookup(&self, video_id: &str) -> Option<ExtractedMetadata> {
        match self.fetch(video_id).await {
            Ok(oembed) => {
                let metadata = ExtractedMetadata::from(oembed);
                info!("YouTube oEmbed metadata: {:?}", metadata);
                Some(metadata)
            }
            Err(e) => {
                debug!("YouTube oEmbed lookup failed for {}: {}", video_id, e);
                None
            }
        }
    }

    async fn fetch(&self, video_id: &str) -> Result<YouTubeOEmbed, reqwest::Error> {
        let watch_url = format!("https://www.youtube.com/watch?v={video_id}");
        debug!("Fetching from YouTube oEmbed: {}", self.endpoint);

        self.client
            .get(&self.endpoint)
            .query(&[("url", watch_url.as_str()), ("format", "json")])
            .send()
            .await?
            .error_for_status()?
            .json::<YouTubeOEmbed>()
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;
    use std::io::Write;
    use std::time::Instant;

    fn id_of(url: &str) -> Option<String> {
        video_id(&Url::parse(url).unwrap())
    }

    #[test]
    fn test_youtube_hosts() {
        assert!(is_youtube_host("youtube.com"));
        assert!(is_youtube_host("www.youtube.com"));
        assert!(is_youtube_host("m.youtube.com"));
        assert!(is_youtube_host("youtu.be"));
        assert!(!is_youtube_host("notyoutube.com"));
        assert!(!is_youtube_host("example.com"));
    }

    #[test]
    fn test_watch_url() {
        assert_eq!(
            id_of("https://www.youtube.com/watch?v=dQw4w9WgXcQ&t=42s"),
            Some("dQw4w9WgXcQ".to_string())
        );
    }

    #[test]
    fn test_short_link() {
        assert_eq!(
            id_of("https://youtu.be/dQw4w9WgXcQ?si=abc"),
            Some("dQw4w9WgXcQ".to_string())
        );
        assert_eq!(id_of("https://youtu.be/"), None);
    }

    #[test]
    fn test_shorts_and_embed() {
        assert_eq!(
            id_of("https://www.youtube.com/shorts/abc123"),
            Some("abc123".to_string())
        );
        assert_eq!(
            id_of("https://www.youtube.com/embed/xyz789"),
            Some("xyz789".to_string())
        );
    }

    #[test]
    fn test_no_identifier() {
        assert_eq!(id_of("https://www.youtube.com/"), None);
        assert_eq!(id_of("https://www.youtube.com/watch?v="), None);
        assert_eq!(id_of("https://www.youtube.com/channel/UCxyz"), None);
        assert_eq!(id_of("https://example.com/watch?v=abc"), None);
    }

    #[test]
    fn test_oembed_mapping_defaults() {
        let metadata = ExtractedMetadata::from(YouTubeOEmbed {
            title: None,
            author_name: None,
            thumbnail_url: None,
        });
        assert_eq!(metadata.title, "YouTube Video");
        assert_eq!(metadata.description, "");
        assert_eq!(metadata.source_domain, "youtube.com");
        assert!(metadata.prep_time.is_none());
    }

    #[tokio::test]
    async fn test_lookup_success() {
        let mut server = mockito::Server::new_async().await;
        let m = server
            .mock("GET", "/oembed")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded(
                    "url".into(),
                    "https://www.youtube.com/watch?v=abc123".into(),
                ),
                Matcher::UrlEncoded("format".into(), "json".into()),
            ]))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"title":"Perfect Ramen","author_name":"Noodle Lab","thumbnail_url":"https://i.ytimg.com/vi/abc123/hqdefault.jpg"}"#,
            )
            .create_async()
            .await;

        let client =
            OEmbedClient::new(Duration::from_secs(5), format!("{}/oembed", server.url())).unwrap();
        let metadata = client.lookup("abc123").await.unwrap();

        m.assert_async().await;
        assert_eq!(metadata.title, "Perfect Ramen");
        assert_eq!(metadata.description, "Video by Noodle Lab");
        assert_eq!(
            metadata.thumbnail_url,
            "https://i.ytimg.com/vi/abc123/hqdefault.jpg"
        );
        assert_eq!(metadata.source_domain, "youtube.com");
        assert!(metadata.cuisine_type.is_none());
    }

    #[tokio::test]
    async fn test_lookup_absent_on_error_status() {
        let mut server = mockito::Server::new_async().await;
        let _m = server
            .mock("GET", "/oembed")
            .match_query(Matcher::Any)
            .with_status(404)
            .create_async()
            .await;

        let client =
            OEmbedClient::new(Duration::from_secs(5), format!("{}/oembed", server.url())).unwrap();
        assert!(client.lookup("gone").await.is_none());
    }

    #[tokio::test]
    async fn test_lookup_absent_on_malformed_body() {
        let mut server = mockito::Server::new_async().await;
        let _m = server
            .mock("GET", "/oembed")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body("<html>not json</html>")
            .create_async()
            .await;

        let client =
            OEmbedClient::new(Duration::from_secs(5), format!("{}/oembed", server.url())).unwrap();
        assert!(client.lookup("abc123").await.is_none());
    }

    #[tokio::test]
    async fn test_lookup_absent_on_timeout() {
        let mut server = mockito::Server::new_async().await;
        let _m = server
            .mock("GET", "/oembed")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_chunked_body(|w| {
                std::thread::sleep(Duration::from_secs(4));
                w.write_all(br#"{"title":"Too Late"}"#)
            })
            .create_async()
            .await;

        let client =
            OEmbedClient::new(Duration::from_secs(1), format!("{}/oembed", server.url())).unwrap();

        let started = Instant::now();
        assert!(client.lookup("abc123").await.is_none());
        assert!(started.elapsed() < Duration::from_secs(3));
    }
}
