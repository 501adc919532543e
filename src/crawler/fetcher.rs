//! HTTP browser implementation
//!
//! This module provides a `Browser` backed by reqwest:
//! - Building HTTP clients with a proper user agent string
//! - A cookie store shared by every request of the session
//! - GET navigation with a per-request timeout
//! - Error classification (timeout, connect, other)
//! - Anchor enumeration from the last HTML body

use crate::config::UserAgentConfig;
use crate::crawler::browser::{Browser, BrowserError, Navigation};
use crate::crawler::parser::{extract_anchors, extract_title};
use async_trait::async_trait;
use reqwest::{redirect::Policy, Client, Response};
use std::time::Duration;
use url::Url;

/// Maximum redirect hops followed by a navigation
const MAX_REDIRECTS: usize = 10;

/// Builds an HTTP client with proper configuration
///
/// # Example
///
/// ```no_run
/// use link_sweep::config::UserAgentConfig;
/// use link_sweep::crawler::build_http_client;
///
/// let config = UserAgentConfig {
///     crawler_name: "LinkSweep".to_string(),
///     crawler_version: "1.0".to_string(),
///     contact_url: "https://example.com/about".to_string(),
///     contact_email: "admin@example.com".to_string(),
/// };
///
/// let client = build_http_client(&config).unwrap();
/// ```
pub fn build_http_client(config: &UserAgentConfig) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.header_value())
        .connect_timeout(Duration::from_secs(10))
        .redirect(Policy::limited(MAX_REDIRECTS))
        .cookie_store(true)
        .gzip(true)
        .brotli(true)
        .build()
}

/// The page the browser is currently on
#[derive(Debug, Clone)]
struct LoadedPage {
    url: Url,
    /// Body of an HTML response; `None` for other content types or when the
    /// body could not be read
    html: Option<String>,
}

/// A cookie-aware HTTP client acting as the crawler's browser
///
/// One `HttpBrowser` is one session: cookies set by a login response are
/// sent with every later navigation.
#[derive(Debug, Clone)]
pub struct HttpBrowser {
    client: Client,
    current: Option<LoadedPage>,
}

impl HttpBrowser {
    /// Creates a browser with a fresh cookie jar
    pub fn new(config: &UserAgentConfig) -> Result<Self, reqwest::Error> {
        Ok(Self::with_client(build_http_client(config)?))
    }

    /// Wraps an existing client
    pub fn with_client(client: Client) -> Self {
        Self {
            client,
            current: None,
        }
    }

    /// The underlying HTTP client (shares the session's cookies)
    pub fn client(&self) -> &Client {
        &self.client
    }

    /// URL of the page currently loaded, if any
    pub fn current_url(&self) -> Option<&Url> {
        self.current.as_ref().map(|page| &page.url)
    }

    /// Makes `response` the current page and reports it as a navigation
    ///
    /// Also used by the form login so the page it lands on becomes current.
    pub(crate) async fn load_response(
        &mut self,
        response: Response,
    ) -> Result<Navigation, BrowserError> {
        let status = response.status().as_u16();
        let final_url = response.url().clone();

        let is_html = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|ct| ct.contains("text/html") || ct.contains("application/xhtml"))
            .unwrap_or(false);

        // The status is already known; an unreadable body only costs the links
        let html = if is_html {
            match response.text().await {
                Ok(body) => {
                    tracing::trace!("{} title: {:?}", final_url, extract_title(&body));
                    Some(body)
                }
                Err(e) => {
                    tracing::warn!(
                        "{} answered {} but its body could not be read: {}",
                        final_url,
                        status,
                        e
                    );
                    None
                }
            }
        } else {
            None
        };

        self.current = Some(LoadedPage {
            url: final_url.clone(),
            html,
        });

        Ok(Navigation { status, final_url })
    }
}

#[async_trait]
impl Browser for HttpBrowser {
    async fn navigate(&mut self, url: &Url, timeout: Duration) -> Result<Navigation, BrowserError> {
        self.current = None;

        let response = self
            .client
            .get(url.clone())
            .timeout(timeout)
            .send()
            .await
            .map_err(|e| classify_error(url, timeout, e))?;

        self.load_response(response).await
    }

    async fn enumerate_anchors(&mut self) -> Result<Vec<Option<String>>, BrowserError> {
        let page = self.current.as_ref().ok_or(BrowserError::NoPage)?;

        match &page.html {
            Some(html) => Ok(extract_anchors(html)),
            None => Err(BrowserError::Anchors {
                url: page.url.to_string(),
                message: "no HTML body".to_string(),
            }),
        }
    }
}

/// Maps a reqwest failure onto the browser error taxonomy
fn classify_error(url: &Url, timeout: Duration, e: reqwest::Error) -> BrowserError {
    if e.is_timeout() {
        BrowserError::Timeout {
            url: url.to_string(),
            timeout,
        }
    } else if e.is_connect() {
        BrowserError::Connect {
            url: url.to_string(),
            message: e.to_string(),
        }
    } else {
        BrowserError::Navigation {
            url: url.to_string(),
            message: e.to_string(),
        }
    }
}
