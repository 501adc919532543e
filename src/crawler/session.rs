//! Multi-phase crawl session
//!
//! Runs the configured phases in order over one browser, logging in before
//! `after_login` and out before `after_logout`. Observations of every phase
//! are collected into one list, in visitation order.

use crate::config::{Config, PhaseEntry};
use crate::crawler::auth::Authenticator;
use crate::crawler::browser::Browser;
use crate::crawler::coordinator::Crawler;
use crate::state::{PageObservation, Phase, VisitedSet};
use crate::SweepError;

/// A sequence of phases crawled with one browser session
#[derive(Debug, Clone)]
pub struct Session {
    crawler: Crawler,
    phases: Vec<PhaseEntry>,
    share_visited: bool,
}

impl Session {
    pub fn new(crawler: Crawler, phases: Vec<PhaseEntry>, share_visited: bool) -> Self {
        Self {
            crawler,
            phases,
            share_visited,
        }
    }

    pub fn from_config(config: &Config) -> Result<Self, SweepError> {
        Ok(Self::new(
            Crawler::from_config(config)?,
            config.phases.clone(),
            config.crawler.share_visited,
        ))
    }

    pub fn crawler(&self) -> &Crawler {
        &self.crawler
    }

    pub fn phases(&self) -> &[PhaseEntry] {
        &self.phases
    }

    /// Runs every phase and returns all observations
    ///
    /// With `share_visited`, a URL observed in one phase is not observed
    /// again in a later one; otherwise every phase starts from an empty
    /// visited set.
    ///
    /// # Errors
    ///
    /// * Login failure
    /// * Fatal browser failure during any phase
    ///
    /// A failed logout is logged and the `after_logout` phase still runs.
    pub async fn run<B, A>(
        &self,
        browser: &mut B,
        auth: &mut A,
    ) -> Result<Vec<PageObservation>, SweepError>
    where
        B: Browser + ?Sized,
        A: Authenticator<B> + ?Sized,
    {
        let mut results = Vec::new();
        let mut visited = VisitedSet::new();
        let mut logged_in = false;

        for entry in &self.phases {
            match entry.name {
                Phase::AfterLogin if !logged_in => {
                    auth.login(browser).await?;
                    logged_in = true;
                }
                Phase::AfterLogout if logged_in => {
                    if let Err(e) = auth.logout(browser).await {
                        tracing::warn!("Logout failed, crawling as-is: {}", e);
                    }
                    logged_in = false;
                }
                _ => {}
            }

            if !self.share_visited {
                visited = VisitedSet::new();
            }

            tracing::info!(
                "Crawling phase {} from {} seed(s)",
                entry.name,
                entry.seeds.len()
            );

            let observations = self
                .crawler
                .crawl(browser, &entry.seeds, &mut visited, Some(entry.name))
                .await?;

            let broken = observations.iter().filter(|o| o.is_broken()).count();
            tracing::info!(
                "Phase {} done: {} pages, {} broken",
                entry.name,
                observations.len(),
                broken
            );

            results.extend(observations);
        }

        Ok(results)
    }
}
