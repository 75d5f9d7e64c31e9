// src/crawl/mod.rs
// =============================================================================
// This module handles crawling a documentation website.
//
// Features:
// - Breadth-first crawling starting from a seed URL
// - Same-domain restriction plus a fixed list of excluded paths
// - A page budget instead of a depth limit
// - Polite crawling with a fixed delay between requests
// - Progress reporting and cancellation between pages
//
// Submodules:
// - policy: which URLs are eligible
// - fetch: downloading pages (trait + reqwest implementation)
// - links: finding the next URLs on a page
// - frontier: visited set, queue and budget of one crawl
// - progress: progress sink trait
// - scheduler: the crawl loop tying it all together
// =============================================================================

mod fetch;
mod frontier;
mod links;
pub mod policy;
mod progress;
mod scheduler;

pub use fetch::{FetchedPage, HttpFetcher, PageFetcher};
pub use frontier::{CrawlState, Frontier, FrontierEntry};
pub use links::{discover_links, resolve_link, DiscoveryScope};
pub use policy::{is_documentation_url, normalize_url};
pub use progress::{NoProgress, ProgressSink};
pub use scheduler::{crawl_website, Crawler};
