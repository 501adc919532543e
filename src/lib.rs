//! Link-Sweep: a single-site broken link sweeper
//!
//! This crate walks the anchor graph of one website, never leaving its domain,
//! and records the HTTP status (or navigation error) of every distinct page it
//! reaches. Crawls are grouped into phases (before login, after login, after
//! logout) that share one browser session, and the observations are exported
//! as CSV, JSON and HTML reports.

pub mod config;
pub mod crawler;
pub mod output;
pub mod state;
pub mod url;

use thiserror::Error;

/// Main error type for Link-Sweep operations
///
/// Per-page failures never surface here: they are recorded as observations.
/// Only failures that end the whole session do.
#[derive(Debug, Error)]
pub enum SweepError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("URL error: {0}")]
    Url(#[from] UrlError),

    #[error("Browser session failed: {0}")]
    Browser(#[from] crawler::BrowserError),

    #[error("Authentication failed: {0}")]
    Auth(String),

    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    #[error("Report error: {0}")]
    Report(#[from] output::OutputError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// URL-specific errors
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum UrlError {
    #[error("Failed to parse URL: {0}")]
    Parse(String),

    #[error("Invalid URL scheme: {0}")]
    InvalidScheme(String),

    #[error("Missing host in URL: {0}")]
    MissingHost(String),
}

/// Result type alias for Link-Sweep operations
pub type Result<T> = std::result::Result<T, SweepError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for URL operations
pub type UrlResult<T> = std::result::Result<T, UrlError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{Browser, Crawler, HttpBrowser, Session};
pub use state::{PageObservation, PageState, Phase, VisitedSet};
pub use crate::url::{normalize_link, normalize_url, DomainScope};
