//! HTML parser for extracting anchors
//!
//! Returns `href` values exactly as written. Resolution, filtering and
//! scoping are left to the crawler so that every browser implementation
//! feeds it the same raw material.

use scraper::{Html, Selector};

/// Extracts the raw `href` of every `<a>` element in document order
///
/// # Extraction Rules
///
/// **Include:**
/// - Every `<a>` element, in document order
/// - `None` for anchors that carry no `href` attribute
///
/// **Exclude:**
/// - `<a ... download>` links (files, not pages)
///
/// **Note:** `rel="nofollow"` links ARE returned
///
/// # Example
///
/// ```
/// use link_sweep::crawler::extract_anchors;
///
/// let html = r#"<a href="/page">Link</a><a name="top"></a>"#;
/// assert_eq!(extract_anchors(html), vec![Some("/page".to_string()), None]);
/// ```
pub fn extract_anchors(html: &str) -> Vec<Option<String>> {
    let document = Html::parse_document(html);

    let Ok(selector) = Selector::parse("a") else {
        return Vec::new();
    };

    document
        .select(&selector)
        .filter(|element| element.value().attr("download").is_none())
        .map(|element| element.value().attr("href").map(str::to_string))
        .collect()
}

/// Extracts the page title, if any
pub fn extract_title(html: &str) -> Option<String> {
    let document = Html::parse_document(html);
    let selector = Selector::parse("title").ok()?;

    document
        .select(&selector)
        .next()
        .map(|element| element.text().collect::<String>().trim().to_string())
        .filter(|s| !s.is_empty())
}
