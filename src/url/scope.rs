use crate::UrlError;
use std::fmt;
use url::Url;

/// The scheme + host (+ effective port) a crawl must not leave
///
/// Derived once from the base URL of a crawl and read-only afterwards.
/// Two URLs are in the same scope when their scheme, lowercase host and
/// port (explicit or scheme default) all match.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DomainScope {
    scheme: String,
    host: String,
    port: Option<u16>,
}

impl DomainScope {
    /// Derives the scope from a URL
    ///
    /// # Examples
    ///
    /// ```
    /// use link_sweep::url::DomainScope;
    /// use url::Url;
    ///
    /// let scope = DomainScope::from_url(&Url::parse("https://Example.com/start").unwrap()).unwrap();
    /// assert_eq!(scope.to_string(), "https://example.com");
    /// assert!(scope.contains(&Url::parse("https://example.com:443/other").unwrap()));
    /// assert!(!scope.contains(&Url::parse("http://example.com/other").unwrap()));
    /// ```
    pub fn from_url(url: &Url) -> Result<Self, UrlError> {
        let host = extract_host(url).ok_or_else(|| UrlError::MissingHost(url.to_string()))?;

        Ok(Self {
            scheme: url.scheme().to_string(),
            host,
            port: url.port_or_known_default(),
        })
    }

    /// Parses a URL string and derives its scope
    pub fn parse(url_str: &str) -> Result<Self, UrlError> {
        let url = Url::parse(url_str.trim()).map_err(|e| UrlError::Parse(e.to_string()))?;
        Self::from_url(&url)
    }

    /// Returns true if `url` lies inside this scope
    pub fn contains(&self, url: &Url) -> bool {
        url.scheme() == self.scheme
            && extract_host(url).as_deref() == Some(self.host.as_str())
            && url.port_or_known_default() == self.port
    }

    /// The lowercase host of this scope
    pub fn host(&self) -> &str {
        &self.host
    }
}

impl fmt::Display for DomainScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let default_port = match self.scheme.as_str() {
            "http" => Some(80),
            "https" => Some(443),
            _ => None,
        };

        match self.port {
            Some(port) if Some(port) != default_port => {
                write!(f, "{}://{}:{}", self.scheme, self.host, port)
            }
            _ => write!(f, "{}://{}", self.scheme, self.host),
        }
    }
}

/// Extracts the lowercase host of a URL, if it has one
pub fn extract_host(url: &Url) -> Option<String> {
    url.host_str()
        .filter(|h| !h.is_empty())
        .map(|h| h.to_lowercase())
}
