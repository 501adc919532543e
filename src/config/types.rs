use crate::state::Phase;
use serde::Deserialize;
use std::time::Duration;

/// Main configuration structure for Link-Sweep
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub crawler: CrawlerConfig,
    #[serde(rename = "user-agent")]
    pub user_agent: UserAgentConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub auth: Option<AuthConfig>,
    #[serde(default, rename = "phase")]
    pub phases: Vec<PhaseEntry>,
}

impl Config {
    /// The URL the domain scope is derived from
    ///
    /// Falls back to the first seed of the first phase when no base URL is set.
    pub fn scope_url(&self) -> Option<&str> {
        self.crawler.base_url.as_deref().or_else(|| {
            self.phases
                .iter()
                .flat_map(|p| p.seeds.iter())
                .next()
                .map(String::as_str)
        })
    }

    /// Total number of seed URLs across all phases
    pub fn seed_count(&self) -> usize {
        self.phases.iter().map(|p| p.seeds.len()).sum()
    }
}

/// Order in which the frontier is consumed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Traversal {
    /// FIFO: earliest-enqueued URL first
    #[default]
    BreadthFirst,
    /// LIFO: most recently discovered URL first
    DepthFirst,
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlerConfig {
    /// URL whose scheme and host bound the crawl
    #[serde(rename = "base-url", default)]
    pub base_url: Option<String>,

    /// Maximum link distance from a seed; unbounded when absent
    #[serde(rename = "max-depth", default)]
    pub max_depth: Option<u32>,

    /// Per-navigation timeout (milliseconds)
    #[serde(rename = "navigation-timeout-ms", default = "default_timeout_ms")]
    pub navigation_timeout_ms: u64,

    #[serde(default)]
    pub traversal: Traversal,

    /// Keep one visited set for the whole session instead of one per phase
    #[serde(rename = "share-visited", default = "default_true")]
    pub share_visited: bool,
}

impl CrawlerConfig {
    pub fn navigation_timeout(&self) -> Duration {
        Duration::from_millis(self.navigation_timeout_ms)
    }
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            max_depth: None,
            navigation_timeout_ms: default_timeout_ms(),
            traversal: Traversal::default(),
            share_visited: true,
        }
    }
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
pub struct UserAgentConfig {
    /// Name of the crawler
    #[serde(rename = "crawler-name")]
    pub crawler_name: String,

    /// Version of the crawler
    #[serde(rename = "crawler-version")]
    pub crawler_version: String,

    /// URL with information about the crawler
    #[serde(rename = "contact-url")]
    pub contact_url: String,

    /// Email address for crawler-related contact
    #[serde(rename = "contact-email")]
    pub contact_email: String,
}

impl UserAgentConfig {
    /// Format: CrawlerName/Version (+ContactURL; ContactEmail)
    pub fn header_value(&self) -> String {
        format!(
            "{}/{} (+{}; {})",
            self.crawler_name, self.crawler_version, self.contact_url, self.contact_email
        )
    }
}

/// Report file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    Csv,
    Json,
    Html,
}

impl ReportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Json => "json",
            Self::Html => "html",
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Directory the report files are written to
    #[serde(rename = "report-dir", default = "default_report_dir")]
    pub report_dir: String,

    /// File name prefix, followed by a timestamp
    #[serde(rename = "report-prefix", default = "default_report_prefix")]
    pub report_prefix: String,

    #[serde(default = "default_formats")]
    pub formats: Vec<ReportFormat>,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            report_dir: default_report_dir(),
            report_prefix: default_report_prefix(),
            formats: default_formats(),
        }
    }
}

/// Form login used to move the session into the authenticated phase
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    #[serde(rename = "login-url")]
    pub login_url: String,

    #[serde(rename = "email-field", default = "default_email_field")]
    pub email_field: String,

    #[serde(rename = "password-field", default = "default_password_field")]
    pub password_field: String,

    pub email: String,

    pub password: String,

    /// Path the login must land on to count as successful
    #[serde(rename = "success-path", default)]
    pub success_path: Option<String>,

    #[serde(rename = "logout-url", default)]
    pub logout_url: Option<String>,
}

/// A crawl phase and its seeds
#[derive(Debug, Clone, Deserialize)]
pub struct PhaseEntry {
    pub name: Phase,
    pub seeds: Vec<String>,
}

fn default_timeout_ms() -> u64 {
    15_000
}

fn default_true() -> bool {
    true
}

fn default_report_dir() -> String {
    "test_reports".to_string()
}

fn default_report_prefix() -> String {
    "broken_links".to_string()
}

fn default_formats() -> Vec<ReportFormat> {
    vec![ReportFormat::Csv, ReportFormat::Json, ReportFormat::Html]
}

fn default_email_field() -> String {
    "email".to_string()
}

fn default_password_field() -> String {
    "password".to_string()
}
