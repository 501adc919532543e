//! Crawler - the traversal loop
//!
//! This module contains the crawl loop that:
//! - Seeds the frontier with normalized, in-scope, unvisited URLs
//! - Visits one URL at a time through the browser capability
//! - Records one observation per visited URL
//! - Extracts, normalizes and scopes anchors, and enqueues new pages

use crate::config::{Config, CrawlerConfig, Traversal};
use crate::crawler::browser::Browser;
use crate::crawler::frontier::{Frontier, QueuedUrl};
use crate::state::{PageObservation, PageState, Phase, VisitedSet};
use crate::url::{classify_link, normalize_url, DomainScope, LinkDisposition};
use crate::{SweepError, UrlError};
use std::time::{Duration, Instant};
use url::Url;

/// Traversal settings for a crawl
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CrawlOptions {
    /// Anchors of a page at depth `d` are followed only while `d < max_depth`
    pub max_depth: Option<u32>,

    /// Upper bound for each navigation
    pub navigation_timeout: Duration,

    pub traversal: Traversal,
}

impl Default for CrawlOptions {
    fn default() -> Self {
        Self::from(&CrawlerConfig::default())
    }
}

impl From<&CrawlerConfig> for CrawlOptions {
    fn from(config: &CrawlerConfig) -> Self {
        Self {
            max_depth: config.max_depth,
            navigation_timeout: config.navigation_timeout(),
            traversal: config.traversal,
        }
    }
}

/// Counters for one page's anchors
#[derive(Debug, Default)]
struct Discovery {
    enqueued: usize,
    duplicate: usize,
    out_of_scope: usize,
    skipped: usize,
}

/// Domain-scoped site crawler
///
/// A `Crawler` holds only read-only settings; all mutable state (the
/// visited set, the results) belongs to the caller, so the same crawler can
/// run several phases against one visited set.
#[derive(Debug, Clone)]
pub struct Crawler {
    scope: DomainScope,
    options: CrawlOptions,
}

impl Crawler {
    /// Creates a crawler confined to `scope`
    pub fn new(scope: DomainScope, options: CrawlOptions) -> Self {
        Self { scope, options }
    }

    /// Creates a crawler from configuration
    ///
    /// The scope comes from `crawler.base-url`, or the first seed.
    pub fn from_config(config: &Config) -> Result<Self, SweepError> {
        let scope_url = config
            .scope_url()
            .ok_or_else(|| UrlError::MissingHost("no base-url or seed configured".to_string()))?;
        let scope = DomainScope::parse(scope_url)?;
        Ok(Self::new(scope, CrawlOptions::from(&config.crawler)))
    }

    pub fn scope(&self) -> &DomainScope {
        &self.scope
    }

    pub fn options(&self) -> &CrawlOptions {
        &self.options
    }

    /// Crawls from `seeds`, returning one observation per newly visited URL
    ///
    /// URLs already in `visited` are neither visited nor observed again.
    /// Observations come back in visitation order, tagged with `phase`.
    ///
    /// # Errors
    ///
    /// Only a fatal browser failure (the session itself is gone) is
    /// returned. Navigation failures become error observations; malformed,
    /// out-of-scope and duplicate links are skipped.
    pub async fn crawl<B, I, S>(
        &self,
        browser: &mut B,
        seeds: I,
        visited: &mut VisitedSet,
        phase: Option<Phase>,
    ) -> Result<Vec<PageObservation>, SweepError>
    where
        B: Browser + ?Sized,
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut frontier = Frontier::new(self.options.traversal);
        self.seed(&mut frontier, seeds, visited);

        tracing::debug!(
            "Crawling {} with {} seed(s) ({:?}, max depth {:?})",
            self.scope,
            frontier.len(),
            self.options.traversal,
            self.options.max_depth
        );

        let start_time = Instant::now();
        let mut observations = Vec::new();

        while let Some(queued) = frontier.pop() {
            let mut observation = self
                .visit(browser, &queued, visited, &mut frontier)
                .await?;
            if let Some(phase) = phase {
                observation = observation.in_phase(phase);
            }
            observations.push(observation);

            if observations.len() % 25 == 0 {
                tracing::info!(
                    "Progress: {} pages visited, {} in frontier",
                    observations.len(),
                    frontier.len()
                );
            }
        }

        tracing::debug!(
            "Frontier is empty: {} pages visited in {:?} ({} observed, {} failed)",
            observations.len(),
            start_time.elapsed(),
            visited.count_in_state(PageState::Observed),
            visited.count_in_state(PageState::Failed)
        );

        Ok(observations)
    }

    /// Puts every acceptable seed in the frontier at depth 0
    fn seed<I, S>(&self, frontier: &mut Frontier, seeds: I, visited: &mut VisitedSet)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut accepted = Vec::new();

        for seed in seeds {
            let seed = seed.as_ref();

            let url = match normalize_url(seed) {
                Ok(url) => url,
                Err(e) => {
                    tracing::warn!("Skipping seed {}: {}", seed, e);
                    continue;
                }
            };

            if !self.scope.contains(&url) {
                tracing::warn!("Skipping seed {}: outside {}", seed, self.scope);
                continue;
            }

            if visited.claim(&url) {
                accepted.push(url);
            } else {
                tracing::debug!("Seed {} already visited", url);
            }
        }

        enqueue(frontier, visited, accepted, 0);
    }

    /// Navigates to one URL and turns the outcome into an observation
    async fn visit<B>(
        &self,
        browser: &mut B,
        queued: &QueuedUrl,
        visited: &mut VisitedSet,
        frontier: &mut Frontier,
    ) -> Result<PageObservation, SweepError>
    where
        B: Browser + ?Sized,
    {
        let url = &queued.url;
        visited.advance(url, PageState::Visiting);
        tracing::debug!("Visiting {} (depth {})", url, queued.depth);

        let navigation = match browser.navigate(url, self.options.navigation_timeout).await {
            Ok(navigation) => navigation,
            Err(e) if e.is_fatal() => return Err(e.into()),
            Err(e) => {
                tracing::warn!("Error visiting {}: {}", url, e);
                visited.advance(url, PageState::Failed);
                return Ok(PageObservation::error(url.as_str(), e.to_string()));
            }
        };

        visited.advance(url, PageState::Observed);
        tracing::debug!("{} -> status {}", url, navigation.status);

        if !self.should_expand(queued.depth) {
            return Ok(PageObservation::status(url.as_str(), navigation.status));
        }

        if !self.scope.contains(&navigation.final_url) {
            tracing::debug!(
                "{} redirected outside {} to {}, not following its links",
                url,
                self.scope,
                navigation.final_url
            );
        } else {
            let discovery = self
                .discover(browser, &navigation.final_url, queued.depth + 1, visited, frontier)
                .await?;
            tracing::trace!(
                "{}: {} enqueued, {} duplicate, {} out of scope, {} skipped",
                url,
                discovery.enqueued,
                discovery.duplicate,
                discovery.out_of_scope,
                discovery.skipped
            );
        }

        Ok(PageObservation::status(url.as_str(), navigation.status))
    }

    /// Enqueues the in-scope, unvisited anchors of the current page
    async fn discover<B>(
        &self,
        browser: &mut B,
        page: &Url,
        depth: u32,
        visited: &mut VisitedSet,
        frontier: &mut Frontier,
    ) -> Result<Discovery, SweepError>
    where
        B: Browser + ?Sized,
    {
        let mut discovery = Discovery::default();
        let mut found = Vec::new();

        let anchors = match browser.enumerate_anchors().await {
            Ok(anchors) => anchors,
            Err(e) if e.is_fatal() => return Err(e.into()),
            Err(e) => {
                tracing::debug!("No links followed from {}: {}", page, e);
                return Ok(discovery);
            }
        };

        for href in anchors {
            let Some(href) = href else {
                discovery.skipped += 1;
                continue;
            };

            match classify_link(&href, page, &self.scope) {
                Ok(LinkDisposition::InScope(url)) => {
                    if visited.claim(&url) {
                        found.push(url);
                        discovery.enqueued += 1;
                    } else {
                        discovery.duplicate += 1;
                    }
                }
                Ok(LinkDisposition::OutOfScope(url)) => {
                    tracing::trace!("Ignoring out-of-scope link {}", url);
                    discovery.out_of_scope += 1;
                }
                Ok(LinkDisposition::Ignored) => discovery.skipped += 1,
                Err(e) => {
                    tracing::debug!("Error processing link {:?} on {}: {}", href, page, e);
                    discovery.skipped += 1;
                }
            }
        }

        enqueue(frontier, visited, found, depth);
        Ok(discovery)
    }

    fn should_expand(&self, depth: u32) -> bool {
        self.options.max_depth.map_or(true, |max| depth < max)
    }
}

/// Moves freshly claimed URLs into the frontier
fn enqueue(frontier: &mut Frontier, visited: &mut VisitedSet, urls: Vec<Url>, depth: u32) {
    for url in &urls {
        visited.advance(url, PageState::Enqueued);
    }
    frontier.extend(urls, depth);
}
