use crate::model::ExtractedMetadata;
use log::debug;
use scraper::Html;

pub mod json_ld;
pub mod meta_tags;

pub use json_ld::RecipeFields;

/// Title used when a page carries no title metadata at all.
pub const UNTITLED_RECIPE: &str = "Untitled Recipe";

/// A single place a field value can come from.
pub type FieldSource = fn(&Html) -> Option<String>;

/// Title precedence: Open Graph, Twitter Card, `<title>`.
pub const TITLE_SOURCES: &[FieldSource] = &[
    meta_tags::og_title,
    meta_tags::twitter_title,
    meta_tags::title_tag,
];

/// Description precedence: Open Graph, Twitter Card, meta description.
pub const DESCRIPTION_SOURCES: &[FieldSource] = &[
    meta_tags::og_description,
    meta_tags::twitter_description,
    meta_tags::meta_description,
];

/// Thumbnail precedence: Open Graph, Twitter Card.
pub const THUMBNAIL_SOURCES: &[FieldSource] = &[meta_tags::og_image, meta_tags::twitter_image];

/// Evaluate `sources` in order and return the first value found.
pub fn first_present(document: &Html, sources: &[FieldSource]) -> Option<String> {
    sources.iter().find_map(|source| source(document))
}

/// Compile metadata from a fetched HTML page.
pub fn extract_from_html(html: &str, source_domain: &str) -> ExtractedMetadata {
    let document = Html::parse_document(html);

    let title = first_present(&document, TITLE_SOURCES)
        .unwrap_or_else(|| UNTITLED_RECIPE.to_string());
    let description = first_present(&document, DESCRIPTION_SOURCES).unwrap_or_default();
    let thumbnail_url = first_present(&document, THUMBNAIL_SOURCES).unwrap_or_default();

    let recipe = json_ld::recipe_fields(&document).unwrap_or_default();
    debug!("Structured recipe fields: {:?}", recipe);

    ExtractedMetadata {
        title,
        description,
        thumbnail_url,
        source_domain: source_domain.to_string(),
        prep_time: recipe.prep_time,
        cuisine_type: recipe.cuisine_type,
    }
}
