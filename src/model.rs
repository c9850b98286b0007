use serde::{Deserialize, Serialize};

/// Best-effort summary of a recipe page or video.
///
/// `prep_time` and `cuisine_type` are only populated from structured
/// Recipe data and serialize as `null` otherwise.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedMetadata {
    pub title: String,
    pub description: String,
    pub thumbnail_url: String,
    pub source_domain: String,
    pub prep_time: Option<String>,
    pub cuisine_type: Option<String>,
}

impl ExtractedMetadata {
    /// Minimal record returned when extraction degrades: every field empty
    /// except the domain, which is still derived from the URL.
    pub fn fallback(source_domain: impl Into<String>) -> Self {
        Self {
            source_domain: source_domain.into(),
            ..Default::default()
        }
    }
}

/// Insert-shaped recipe record built from a user-supplied URL and the
/// metadata scraped for it. Persisting it is the storage layer's job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipeDraft {
    pub url: String,
    pub title: String,
    pub description: Option<String>,
    pub thumbnail_url: Option<String>,
    pub category_id: Option<String>,
    pub prep_time: Option<String>,
    pub cuisine_type: Option<String>,
    pub source_domain: Option<String>,
    #[serde(default)]
    pub is_favorite: bool,
}

impl RecipeDraft {
    pub fn new(url: impl Into<String>, metadata: ExtractedMetadata) -> Self {
        Self {
            url: url.into(),
            title: metadata.title,
            description: non_empty(metadata.description),
            thumbnail_url: non_empty(metadata.thumbnail_url),
            category_id: None,
            prep_time: metadata.prep_time,
            cuisine_type: metadata.cuisine_type,
            source_domain: non_empty(metadata.source_domain),
            is_favorite: false,
        }
    }

    pub fn with_category(mut self, category_id: impl Into<String>) -> Self {
        self.category_id = Some(category_id.into());
        self
    }

    pub fn favorite(mut self, is_favorite: bool) -> Self {
        self.is_favorite = is_favorite;
        self
    }
}

fn non_empty(value: String) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}
