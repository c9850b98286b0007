use html_escape::decode_html_entities;
use log::debug;
use scraper::{Html, Selector};
use serde::Deserialize;
use serde_json::Value;

/// Fields taken from the first JSON-LD Recipe on the page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecipeFields {
    pub prep_time: Option<String>,
    pub cuisine_type: Option<String>,
}

#[derive(Debug, Deserialize)]
struct JsonLdRecipe {
    #[serde(rename = "prepTime", default)]
    prep_time: Option<TextValue>,
    #[serde(rename = "totalTime", default)]
    total_time: Option<TextValue>,
    #[serde(rename = "recipeCuisine", default)]
    recipe_cuisine: Option<TextValue>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum TextValue {
    String(String),
    Multiple(Vec<String>),
    // numbers, objects and anything else sites put here
    Other(Value),
}

impl TextValue {
    fn into_text(self) -> Option<String> {
        let text = match self {
            TextValue::String(s) => decode_html_symbols(&s),
            TextValue::Multiple(v) => v
                .iter()
                .map(|s| decode_html_symbols(s))
                .filter(|s| !s.is_empty())
                .collect::<Vec<String>>()
                .join(", "),
            TextValue::Other(_) => String::new(),
        };
        let text = text.trim();
        if text.is_empty() {
            None
        } else {
            Some(text.to_string())
        }
    }
}

impl TryFrom<&Value> for JsonLdRecipe {
    type Error = serde_json::Error;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        serde_json::from_value(value.clone())
    }
}

impl From<JsonLdRecipe> for RecipeFields {
    fn from(recipe: JsonLdRecipe) -> Self {
        let prep_time = recipe
            .prep_time
            .and_then(TextValue::into_text)
            .or_else(|| recipe.total_time.and_then(TextValue::into_text));

        RecipeFields {
            prep_time,
            cuisine_type: recipe.recipe_cuisine.and_then(TextValue::into_text),
        }
    }
}

// Script contents are raw text, so entities survive HTML parsing
fn decode_html_symbols(text: &str) -> String {
    decode_html_entities(text).into_owned()
}

/// True when `@type` is "Recipe", or an array containing "Recipe".
pub fn is_recipe_type(value: &Value) -> bool {
    match value.get("@type") {
        Some(Value::String(t)) => t == "Recipe",
        Some(Value::Array(types)) => types.iter().any(|t| t.as_str() == Some("Recipe")),
        _ => false,
    }
}

/// First Recipe object in a parsed block: the root, then top-level array
/// items, then `@graph` items.
fn find_recipe(json_ld: &Value) -> Option<&Value> {
    if is_recipe_type(json_ld) {
        debug!("json_ld: Found Recipe type in root");
        return Some(json_ld);
    }

    let items = match json_ld {
        Value::Array(items) => Some(items),
        _ => json_ld.get("@graph").and_then(Value::as_array),
    }?;

    items.iter().find(|item| is_recipe_type(item))
}

/// Parse every inline JSON-LD block independently. Blocks that are not valid
/// JSON are dropped without affecting the others.
pub fn parse_blocks(document: &Html) -> Vec<Value> {
    let selector = Selector::parse(r#"script[type="application/ld+json"]"#).unwrap();

    document
        .select(&selector)
        .enumerate()
        .filter_map(|(index, script)| {
            let raw_json = script.text().collect::<String>();
            match serde_json::from_str::<Value>(raw_json.trim()) {
                Ok(json_ld) => Some(json_ld),
                Err(e) => {
                    debug!("json_ld: Failed to parse JSON-LD {}: {}", index, e);
                    None
                }
            }
        })
        .collect()
}

/// Recipe fields from the first JSON-LD block, in document order, that
/// carries a Recipe. `None` when the page has no structured recipe data.
pub fn recipe_fields(document: &Html) -> Option<RecipeFields> {
    let blocks = parse_blocks(document);
    debug!("json_ld: Parsed {} JSON-LD blocks", blocks.len());

    let recipe = blocks.iter().find_map(find_recipe)?;
    match JsonLdRecipe::try_from(recipe) {
        Ok(recipe) => Some(recipe.into()),
        Err(e) => {
            debug!("json_ld: Failed to convert to JsonLdRecipe: {}", e);
            Some(RecipeFields::default())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn create_html_document(blocks: &[&str]) -> Html {
        let scripts: String = blocks
            .iter()
            .map(|b| format!(r#"<script type="application/ld+json">{b}</script>"#))
            .collect();
        let html = format!(
            r#"
            <!DOCTYPE html>
            <html>
            <head>{scripts}</head>
            <body></body>
            </html>
            "#
        );
        Html::parse_document(&html)
    }

    #[test]
    fn test_is_recipe_type() {
        assert!(is_recipe_type(&json!({"@type": "Recipe"})));
        assert!(is_recipe_type(&json!({"@type": ["NewsArticle", "Recipe"]})));
        assert!(!is_recipe_type(&json!({"@type": "RecipeCollection"})));
        assert!(!is_recipe_type(&json!({"@type": "WebSite"})));
        assert!(!is_recipe_type(&json!({"name": "untyped"})));
    }

    #[test]
    fn test_prep_time_and_cuisine() {
        let document = create_html_document(&[r#"
        {
            "@context": "https://schema.org/",
            "@type": "Recipe",
            "name": "Chicken Tikka Masala",
            "prepTime": "PT20M",
            "totalTime": "PT1H",
            "recipeCuisine": "Indian"
        }
        "#]);

        let fields = recipe_fields(&document).unwrap();
        assert_eq!(fields.prep_time.as_deref(), Some("PT20M"));
        assert_eq!(fields.cuisine_type.as_deref(), Some("Indian"));
    }

    #[test]
    fn test_total_time_fallback() {
        let document = create_html_document(&[r#"
        {"@type": "Recipe", "name": "Stew", "totalTime": "PT2H"}
        "#]);

        let fields = recipe_fields(&document).unwrap();
        assert_eq!(fields.prep_time.as_deref(), Some("PT2H"));
        assert_eq!(fields.cuisine_type, None);
    }

    #[test]
    fn test_invalid_block_does_not_abort() {
        let document = create_html_document(&[
            r#"{ "@type": "Recipe", "prepTime": "PT5M", "#,
            r#"{ "@type": "Recipe", "prepTime": "PT30M" }"#,
        ]);

        let fields = recipe_fields(&document).unwrap();
        assert_eq!(fields.prep_time.as_deref(), Some("PT30M"));
    }

    #[test]
    fn test_first_recipe_wins() {
        let document = create_html_document(&[
            r#"{ "@type": "WebSite", "name": "Food Blog" }"#,
            r#"{ "@type": "Recipe", "recipeCuisine": "Thai" }"#,
            r#"{ "@type": "Recipe", "recipeCuisine": "French" }"#,
        ]);

        let fields = recipe_fields(&document).unwrap();
        assert_eq!(fields.cuisine_type.as_deref(), Some("Thai"));
    }

    #[test]
    fn test_recipe_in_graph() {
        let document = create_html_document(&[r#"
        {
            "@context": "https://schema.org",
            "@graph": [
                { "@type": "WebPage", "name": "Page" },
                { "@type": "Recipe", "prepTime": "PT15M", "recipeCuisine": ["Italian", "Mediterranean"] }
            ]
        }
        "#]);

        let fields = recipe_fields(&document).unwrap();
        assert_eq!(fields.prep_time.as_deref(), Some("PT15M"));
        assert_eq!(
            fields.cuisine_type.as_deref(),
            Some("Italian, Mediterranean")
        );
    }

    #[test]
    fn test_recipe_in_top_level_array() {
        let document = create_html_document(&[r#"
        [
            { "@type": "Organization", "name": "Kitchen" },
            { "@type": ["Recipe"], "recipeCuisine": "Mexican" }
        ]
        "#]);

        let fields = recipe_fields(&document).unwrap();
        assert_eq!(fields.cuisine_type.as_deref(), Some("Mexican"));
    }

    #[test]
    fn test_entities_decoded_and_odd_values_ignored() {
        let document = create_html_document(&[r#"
        { "@type": "Recipe", "prepTime": 30, "recipeCuisine": "Caf&eacute; Classics" }
        "#]);

        let fields = recipe_fields(&document).unwrap();
        assert_eq!(fields.prep_time, None);
        assert_eq!(fields.cuisine_type.as_deref(), Some("Café Classics"));
    }

    #[test]
    fn test_entities_decoded_once() {
        let document = create_html_document(&[r#"
        { "@type": "Recipe", "recipeCuisine": ["Fish &amp; Chips", "Tags &amp;lt;b&amp;gt;"] }
        "#]);

        let fields = recipe_fields(&document).unwrap();
        assert_eq!(
            fields.cuisine_type.as_deref(),
            Some("Fish & Chips, Tags &lt;b&gt;")
        );
    }

    #[test]
    fn test_no_recipe() {
        let document = create_html_document(&[r#"{ "@type": "Article" }"#]);
        assert_eq!(recipe_fields(&document), None);
        assert_eq!(recipe_fields(&Html::parse_document("<html></html>")), None);
    }
}
