//! URL handling module for Link-Sweep
//!
//! This module provides link resolution, URL canonicalization for dedup
//! purposes, and the domain scope a crawl is confined to.

mod normalize;
mod scope;

// Re-export main functions
pub use normalize::{normalize_link, normalize_url};
pub use scope::{extract_host, DomainScope};

use ::url::Url;

/// Outcome of checking a discovered href against a crawl's scope
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkDisposition {
    /// Same-domain page, ready to be enqueued
    InScope(Url),
    /// Valid page on another origin
    OutOfScope(Url),
    /// Not a navigable page (empty, fragment-only, pseudo-protocol)
    Ignored,
}

/// Classifies a raw href found on `page` against `scope`
///
/// # Examples
///
/// ```
/// use link_sweep::url::{classify_link, DomainScope, LinkDisposition};
/// use url::Url;
///
/// let page = Url::parse("https://example.com/").unwrap();
/// let scope = DomainScope::from_url(&page).unwrap();
///
/// assert!(matches!(classify_link("/a#x", &page, &scope), Ok(LinkDisposition::InScope(_))));
/// assert!(matches!(classify_link("https://other.com/", &page, &scope), Ok(LinkDisposition::OutOfScope(_))));
/// assert_eq!(classify_link("mailto:a@b.c", &page, &scope), Ok(LinkDisposition::Ignored));
/// ```
pub fn classify_link(
    href: &str,
    page: &Url,
    scope: &DomainScope,
) -> crate::UrlResult<LinkDisposition> {
    Ok(match normalize_link(href, page)? {
        None => LinkDisposition::Ignored,
        Some(url) if scope.contains(&url) => LinkDisposition::InScope(url),
        Some(url) => LinkDisposition::OutOfScope(url),
    })
}
