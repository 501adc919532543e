//! State module for tracking crawl progress
//!
//! # Components
//!
//! - `PageState`: per-URL lifecycle (discovered, enqueued, visiting, observed, failed)
//! - `VisitedSet`: URLs already claimed by a crawl, optionally shared across phases
//! - `PageObservation`: the record produced for every visited URL

mod observation;
mod page_state;
mod visited;

// Re-export main types
pub use observation::{PageObservation, Phase};
pub use page_state::PageState;
pub use visited::VisitedSet;
