use crate::state::PageState;
use std::collections::HashMap;
use url::Url;

/// Normalized URLs already enqueued or processed, with their page state
///
/// A URL enters the set the moment it is discovered, before it is enqueued,
/// so it can never be queued twice. The set can outlive a single crawl when phases share it.
#[derive(Debug, Default, Clone)]
pub struct VisitedSet {
    pages: HashMap<String, PageState>,
}

impl VisitedSet {
    /// Creates an empty visited set
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if the URL has already been claimed by a crawl
    pub fn contains(&self, url: &Url) -> bool {
        self.pages.contains_key(url.as_str())
    }

    /// Claims a newly discovered URL, in the `Discovered` state
    ///
    /// Returns `false` (and changes nothing) if the URL was already present.
    pub fn claim(&mut self, url: &Url) -> bool {
        if self.contains(url) {
            return false;
        }
        self.pages
            .insert(url.as_str().to_string(), PageState::Discovered);
        true
    }

    /// Moves a claimed URL to `next`
    ///
    /// Returns `false` if the URL is unknown or the transition is not allowed
    /// by the page state machine.
    pub fn advance(&mut self, url: &Url, next: PageState) -> bool {
        match self.pages.get_mut(url.as_str()) {
            Some(state) if state.can_transition_to(next) => {
                tracing::trace!("{}: {} -> {}", url, state, next);
                *state = next;
                true
            }
            Some(state) => {
                tracing::warn!("Rejected transition for {}: {} -> {}", url, state, next);
                false
            }
            None => false,
        }
    }

    /// Current state of a URL, if it has been claimed
    pub fn state(&self, url: &Url) -> Option<PageState> {
        self.pages.get(url.as_str()).copied()
    }

    /// Number of URLs in the set
    pub fn len(&self) -> usize {
        self.pages.len()
    }

    /// Returns true if no URL has been claimed yet
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// Counts URLs currently in `state`
    pub fn count_in_state(&self, state: PageState) -> usize {
        self.pages.values().filter(|s| **s == state).count()
    }
}
