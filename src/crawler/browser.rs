//! The page-rendering capability the crawler drives
//!
//! The crawler only needs two things from a browser: go to a URL, and list
//! the `href` attributes of the anchors on the page it landed on. Anything
//! that can do both (a headless browser binding, a plain HTTP client, an
//! in-memory fake) can be crawled with.

use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;
use url::Url;

/// Result of a successful navigation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Navigation {
    /// HTTP status of the final response
    pub status: u16,

    /// URL the browser ended up on after redirects
    pub final_url: Url,
}

/// Errors reported by a browser capability
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BrowserError {
    #[error("Navigation to {url} timed out after {timeout:?}")]
    Timeout { url: String, timeout: Duration },

    #[error("Could not connect to {url}: {message}")]
    Connect { url: String, message: String },

    #[error("Navigation to {url} failed: {message}")]
    Navigation { url: String, message: String },

    #[error("Could not enumerate anchors on {url}: {message}")]
    Anchors { url: String, message: String },

    #[error("No page has been loaded yet")]
    NoPage,

    #[error("Browser session lost: {0}")]
    SessionLost(String),
}

impl BrowserError {
    /// Returns true if the browser itself is unusable
    ///
    /// Fatal errors end the crawl; every other error is confined to the
    /// page that produced it.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::SessionLost(_))
    }
}

/// Narrow browser-automation interface used by the crawler
///
/// Implementations hold one stateful session (cookies, current page). The
/// crawler calls `navigate` and then `enumerate_anchors` for the same page,
/// strictly one URL at a time.
#[async_trait]
pub trait Browser: Send {
    /// Navigates to `url`, giving up after `timeout`
    ///
    /// Any HTTP response, including 4xx and 5xx, is a successful navigation.
    async fn navigate(&mut self, url: &Url, timeout: Duration) -> Result<Navigation, BrowserError>;

    /// Lists the raw `href` of every anchor on the current page
    ///
    /// Values are returned as written in the page: possibly relative,
    /// possibly malformed. Anchors without an `href` yield `None`.
    async fn enumerate_anchors(&mut self) -> Result<Vec<Option<String>>, BrowserError>;
}
