//! Best-effort metadata extraction for saved recipe links.
//!
//! Given a recipe page or a YouTube video URL, produce a title, description,
//! thumbnail, source domain and, when the page carries a JSON-LD Recipe,
//! prep time and cuisine. Used to pre-fill a bookmark before the user
//! files it into a category or a meal-plan slot.

pub mod builder;
pub mod config;
pub mod error;
pub mod extractors;
pub mod fetchers;
pub mod model;
pub mod pipelines;
pub mod server;
pub mod video;

pub use builder::{MetadataExtractor, MetadataExtractorBuilder};
pub use config::ScraperConfig;
pub use error::ScrapeError;
pub use model::{ExtractedMetadata, RecipeDraft};

/// Extract metadata from a URL using default settings.
///
/// # Example
/// ```no_run
/// # #[tokio::main]
/// # async fn main() -> Result<(), recipe_scrape::ScrapeError> {
/// let metadata = recipe_scrape::extract_metadata("https://www.youtube.com/watch?v=dQw4w9WgXcQ").await?;
/// assert_eq!(metadata.source_domain, "youtube.com");
/// # Ok(())
/// # }
/// ```
pub async fn extract_metadata(url: &str) -> Result<ExtractedMetadata, ScrapeError> {
    MetadataExtractor::builder().build()?.extract(url).await
}
