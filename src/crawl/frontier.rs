// src/crawl/frontier.rs
// =============================================================================
// The mutable state of one crawl job.
//
// - visited: normalized URLs already dequeued (only ever grows)
// - queue: URLs waiting to be visited, first in first out (breadth-first)
// - queued: the same URLs as `queue`, for O(1) duplicate checks
// - redirected: normalized URLs a fetch landed on after a redirect; they
//   count as seen but not against the budget
// - budget: maximum number of pages to visit
//
// A Frontier is created per crawl and owned by the scheduling loop, which
// passes it around by `&mut`. Nothing here is global, so several crawls can
// run side by side in the same process.
// =============================================================================

use std::collections::{HashSet, VecDeque};

use super::links::DiscoveryScope;
use crate::document::CrawlOutcome;

/// Lifecycle of a crawl job
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CrawlState {
    Idle,
    Running,
    Finished(CrawlOutcome),
}

/// A URL waiting in the frontier
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrontierEntry {
    /// Normalized URL used for dedup and as the document's source URL
    pub url: String,
    /// URL to actually request; differs from `url` only for the seed
    pub fetch_url: String,
}

#[derive(Debug)]
pub struct Frontier {
    visited: HashSet<String>,
    queue: VecDeque<FrontierEntry>,
    queued: HashSet<String>,
    redirected: HashSet<String>,
    budget: usize,
    base_domain: String,
    state: CrawlState,
}

impl Frontier {
    /// Creates the frontier with the seed as its only entry.
    ///
    /// `seed_normalized` is used for dedup, `seed_fetch_url` is what gets
    /// requested, so a seed with a query string is fetched as given.
    pub fn new(
        seed_normalized: String,
        seed_fetch_url: String,
        base_domain: String,
        budget: usize,
    ) -> Self {
        let mut frontier = Frontier {
            visited: HashSet::new(),
            queue: VecDeque::new(),
            queued: HashSet::new(),
            redirected: HashSet::new(),
            budget,
            base_domain,
            state: CrawlState::Idle,
        };
        frontier.queued.insert(seed_normalized.clone());
        frontier.queue.push_back(FrontierEntry {
            url: seed_normalized,
            fetch_url: seed_fetch_url,
        });
        frontier
    }

    /// Pops the next unvisited URL and marks it visited.
    ///
    /// Returns None once the budget is spent or the queue is empty. Entries
    /// that were visited in the meantime are discarded on the way.
    pub fn next_url(&mut self) -> Option<FrontierEntry> {
        if matches!(self.state, CrawlState::Finished(_)) {
            return None;
        }
        self.state = CrawlState::Running;

        while self.visited.len() < self.budget {
            let entry = self.queue.pop_front()?;
            self.queued.remove(&entry.url);

            if !self.visited.insert(entry.url.clone()) {
                continue;
            }
            return Some(entry);
        }

        None
    }

    /// Appends newly discovered URLs to the tail of the queue, skipping any
    /// that are visited or already waiting. Returns how many were added.
    pub fn enqueue<I>(&mut self, urls: I) -> usize
    where
        I: IntoIterator<Item = String>,
    {
        let mut added = 0;
        for url in urls {
            if self.visited.contains(&url)
                || self.redirected.contains(&url)
                || !self.queued.insert(url.clone())
            {
                continue;
            }
            self.queue.push_back(FrontierEntry {
                fetch_url: url.clone(),
                url,
            });
            added += 1;
        }
        added
    }

    /// Records the normalized URL a fetch ended up on after redirects.
    ///
    /// Returns false when that page was already seen, either visited under
    /// its own URL or reached through an earlier redirect.
    pub fn record_redirect(&mut self, landed: String) -> bool {
        if self.visited.contains(&landed) {
            return false;
        }
        self.queued.remove(&landed);
        self.queue.retain(|entry| entry.url != landed);
        self.redirected.insert(landed)
    }

    /// Link-discovery view of this crawl
    pub fn scope(&self) -> DiscoveryScope<'_> {
        DiscoveryScope {
            base_domain: &self.base_domain,
            visited: &self.visited,
            budget: self.budget,
        }
    }

    /// Marks the crawl finished and works out how it ended
    pub fn finish(&mut self, cancelled: bool) -> CrawlOutcome {
        let outcome = if cancelled {
            CrawlOutcome::Cancelled
        } else if self.queue.is_empty() {
            CrawlOutcome::Completed
        } else {
            CrawlOutcome::Exhausted
        };
        self.state = CrawlState::Finished(outcome);
        outcome
    }

    pub fn visited_count(&self) -> usize {
        self.visited.len()
    }

    pub fn is_visited(&self, url: &str) -> bool {
        self.visited.contains(url)
    }

    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    pub fn budget(&self) -> usize {
        self.budget
    }

    pub fn base_domain(&self) -> &str {
        &self.base_domain
    }

    pub fn state(&self) -> CrawlState {
        self.state
    }
}
