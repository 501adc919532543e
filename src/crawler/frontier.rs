//! Frontier of URLs waiting to be visited
//!
//! Breadth-first crawls consume the frontier as a FIFO queue, depth-first
//! crawls as a LIFO stack that still visits each page's links in document
//! order. Either way, entries carry their link distance from the seed so
//! depth limits can be enforced.

use crate::config::Traversal;
use std::collections::VecDeque;
use url::Url;

/// A URL queued for a visit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueuedUrl {
    /// The normalized URL to visit
    pub url: Url,

    /// Link distance from the seed (seeds are depth 0)
    pub depth: u32,
}

/// Ordered collection of pending visits
#[derive(Debug, Clone)]
pub struct Frontier {
    queue: VecDeque<QueuedUrl>,
    traversal: Traversal,
}

impl Frontier {
    /// Creates an empty frontier
    pub fn new(traversal: Traversal) -> Self {
        Self {
            queue: VecDeque::new(),
            traversal,
        }
    }

    /// Adds a URL to the back of the frontier
    pub fn push(&mut self, url: Url, depth: u32) {
        self.queue.push_back(QueuedUrl { url, depth });
    }

    /// Adds the links found on one page, all at the same depth
    ///
    /// Depth-first crawls push the batch in reverse, so the page's links are
    /// still visited in document order.
    pub fn extend<I>(&mut self, urls: I, depth: u32)
    where
        I: IntoIterator<Item = Url>,
    {
        let mut batch: Vec<Url> = urls.into_iter().collect();
        if self.traversal == Traversal::DepthFirst {
            batch.reverse();
        }
        for url in batch {
            self.push(url, depth);
        }
    }

    /// Takes the next URL to visit
    ///
    /// Breadth-first pops the earliest-enqueued entry; depth-first pops the
    /// most recently enqueued one.
    pub fn pop(&mut self) -> Option<QueuedUrl> {
        match self.traversal {
            Traversal::BreadthFirst => self.queue.pop_front(),
            Traversal::DepthFirst => self.queue.pop_back(),
        }
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn traversal(&self) -> Traversal {
        self.traversal
    }
}
