//! Crawler module for domain-scoped link sweeping
//!
//! This module contains the core crawling logic, including:
//! - The browser capability the crawler drives, and its HTTP implementation
//! - HTML anchor extraction
//! - The frontier (breadth-first or depth-first)
//! - The traversal loop and the multi-phase session around it

mod auth;
mod browser;
mod coordinator;
mod fetcher;
mod frontier;
mod parser;
mod session;

#[cfg(test)]
pub(crate) mod fake;

pub use auth::{Authenticator, FormLogin, NoAuth};
pub use browser::{Browser, BrowserError, Navigation};
pub use coordinator::{CrawlOptions, Crawler};
pub use fetcher::{build_http_client, HttpBrowser};
pub use frontier::{Frontier, QueuedUrl};
pub use parser::{extract_anchors, extract_title};
pub use session::Session;

use crate::config::Config;
use crate::state::PageObservation;
use crate::SweepError;

/// Runs every configured phase over a fresh HTTP session
///
/// This is the main entry point for a sweep. It will:
/// 1. Build the HTTP browser (one cookie jar for the whole session)
/// 2. Build the form login when `[auth]` is configured
/// 3. Crawl each phase in order
///
/// # Example
///
/// ```no_run
/// use link_sweep::config::load_config;
/// use link_sweep::crawler::sweep;
/// use std::path::Path;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = load_config(Path::new("sweep.toml"))?;
/// let observations = sweep(&config).await?;
/// println!("{} pages checked", observations.len());
/// # Ok(())
/// # }
/// ```
pub async fn sweep(config: &Config) -> Result<Vec<PageObservation>, SweepError> {
    let session = Session::from_config(config)?;
    let mut browser = HttpBrowser::new(&config.user_agent)?;

    match &config.auth {
        Some(auth) => {
            let mut login = FormLogin::new(auth, config.crawler.navigation_timeout())?;
            session.run(&mut browser, &mut login).await
        }
        None => session.run(&mut browser, &mut NoAuth).await,
    }
}
