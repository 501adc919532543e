use crate::UrlError;
use url::Url;

/// Pseudo-protocols that never name a page
const IGNORED_SCHEMES: &[&str] = &["mailto:", "tel:", "javascript:", "data:"];

/// Canonicalizes an absolute URL for dedup purposes
///
/// # Normalization Steps
///
/// 1. Parse the URL; reject if malformed
/// 2. Accept only HTTP and HTTPS
/// 3. Require a host
/// 4. Remove the fragment (`/page#a` and `/page#b` are one page)
/// 5. Remove the query (query variations are not new pages)
///
/// Host lowercasing, dot-segment removal and the empty-path-to-root rule
/// come from the WHATWG parser itself. The scheme, host and path are left
/// otherwise untouched, so the output is a fixed point of this function.
///
/// # Examples
///
/// ```
/// use link_sweep::url::normalize_url;
///
/// let url = normalize_url("https://EXAMPLE.com/a/../page?x=1#top").unwrap();
/// assert_eq!(url.as_str(), "https://example.com/page");
/// ```
pub fn normalize_url(url_str: &str) -> Result<Url, UrlError> {
    let url = Url::parse(url_str.trim()).map_err(|e| UrlError::Parse(e.to_string()))?;
    canonicalize(url)
}

/// Resolves a raw `href` against the page it was found on, then normalizes it
///
/// Returns `Ok(None)` for links that are not navigable pages (empty hrefs,
/// fragment-only anchors and `mailto:`/`tel:`/`javascript:`/`data:` links).
/// Those are dropped without being treated as errors.
///
/// # Errors
///
/// * `UrlError::Parse` - The href cannot be resolved against `base`
/// * `UrlError::InvalidScheme` - The resolved URL is not HTTP(S)
/// * `UrlError::MissingHost` - The resolved URL has no host
pub fn normalize_link(href: &str, base: &Url) -> Result<Option<Url>, UrlError> {
    let href = href.trim();

    if href.is_empty() || href.starts_with('#') {
        return Ok(None);
    }

    let lowered = href.to_ascii_lowercase();
    if IGNORED_SCHEMES
        .iter()
        .any(|scheme| lowered.starts_with(scheme))
    {
        return Ok(None);
    }

    let absolute = base
        .join(href)
        .map_err(|e| UrlError::Parse(format!("{}: {}", href, e)))?;

    canonicalize(absolute).map(Some)
}

fn canonicalize(mut url: Url) -> Result<Url, UrlError> {
    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(UrlError::InvalidScheme(url.scheme().to_string()));
    }

    if url.host_str().map_or(true, str::is_empty) {
        return Err(UrlError::MissingHost(url.to_string()));
    }

    url.set_fragment(None);
    url.set_query(None);

    Ok(url)
}
