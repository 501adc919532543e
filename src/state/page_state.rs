/// Page state definitions for tracking crawl progress
///
/// Every URL moves through `Discovered → Enqueued → Visiting` and ends in
/// exactly one terminal state. Nothing leaves a terminal state.
use std::fmt;

/// Represents the current state of a page in the crawl process
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PageState {
    // ===== Active States =====
    /// Link found on a page, normalized and in scope
    Discovered,

    /// Waiting in the frontier
    Enqueued,

    /// The browser is navigating to it
    Visiting,

    // ===== Terminal States =====
    /// Navigation produced an HTTP status
    Observed,

    /// Navigation failed (timeout, DNS, connection, other)
    Failed,
}

impl PageState {
    /// Returns true if this is a terminal state (no further processing needed)
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Observed | Self::Failed)
    }

    /// Returns true if the transition `self -> next` is allowed
    pub fn can_transition_to(&self, next: PageState) -> bool {
        matches!(
            (self, next),
            (Self::Discovered, Self::Enqueued)
                | (Self::Enqueued, Self::Visiting)
                | (Self::Visiting, Self::Observed)
                | (Self::Visiting, Self::Failed)
        )
    }

    /// Converts the page state to its string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Discovered => "discovered",
            Self::Enqueued => "enqueued",
            Self::Visiting => "visiting",
            Self::Observed => "observed",
            Self::Failed => "failed",
        }
    }

    /// Returns all possible page states
    pub fn all_states() -> Vec<Self> {
        vec![
            Self::Discovered,
            Self::Enqueued,
            Self::Visiting,
            Self::Observed,
            Self::Failed,
        ]
    }
}

impl fmt::Display for PageState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
