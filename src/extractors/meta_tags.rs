//! Link-preview metadata sources: Open Graph, Twitter Card, the standard
//! description meta tag and the document `<title>`.
//!
//! Each source returns a trimmed, non-empty value or `None`.

use scraper::{Html, Selector};

fn meta_property(doc: &Html, property: &str) -> Option<String> {
    let selector = Selector::parse(&format!(r#"meta[property="{property}"]"#)).ok()?;
    first_content(doc, &selector)
}

fn meta_name(doc: &Html, name: &str) -> Option<String> {
    let selector = Selector::parse(&format!(r#"meta[name="{name}"]"#)).ok()?;
    first_content(doc, &selector)
}

fn first_content(doc: &Html, selector: &Selector) -> Option<String> {
    doc.select(selector)
        .next()
        .and_then(|el| el.value().attr("content"))
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

pub fn og_title(doc: &Html) -> Option<String> {
    meta_property(doc, "og:title")
}

pub fn og_description(doc: &Html) -> Option<String> {
    meta_property(doc, "og:description")
}

pub fn og_image(doc: &Html) -> Option<String> {
    meta_property(doc, "og:image")
}

pub fn twitter_title(doc: &Html) -> Option<String> {
    meta_name(doc, "twitter:title")
}

pub fn twitter_description(doc: &Html) -> Option<String> {
    meta_name(doc, "twitter:description")
}

pub fn twitter_image(doc: &Html) -> Option<String> {
    meta_name(doc, "twitter:image")
}

pub fn meta_description(doc: &Html) -> Option<String> {
    meta_name(doc, "description")
}

pub fn title_tag(doc: &Html) -> Option<String> {
    let selector = Selector::parse("title").ok()?;
    doc.select(&selector)
        .next()
        .map(|el| el.text().collect::<String>().trim().to_string())
        .filter(|s| !s.is_empty())
}
