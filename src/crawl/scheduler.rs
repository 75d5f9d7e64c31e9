// src/crawl/scheduler.rs
// =============================================================================
// The crawl loop.
//
// How it works:
// 1. Start with the seed URL in the frontier
// 2. Pop the next URL, mark it visited, report progress
// 3. Fetch the page (a failure skips the page, it never stops the crawl)
// 4. Extract a Document from the HTML, if the page has enough content
// 5. Discover same-domain documentation links in the same HTML and
//    append them to the frontier
// 6. Wait the politeness delay, then repeat until the frontier is empty,
//    the page budget is spent, or the caller cancels
//
// One fetch is in flight at a time. The caller can cancel between pages
// (or during a fetch or delay) and gets back the documents finished so far.
// =============================================================================

use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};
use url::Url;

use super::fetch::{FetchedPage, HttpFetcher, PageFetcher};
use super::frontier::{Frontier, FrontierEntry};
use super::links::discover_links;
use super::policy::{authority, normalize_str, normalize_url};
use super::progress::{notify, NoProgress, ProgressSink};
use crate::config::{CrawlConfig, SeedFailurePolicy};
use crate::document::{CrawlReport, Document};
use crate::error::CrawlError;
use crate::extract::ContentExtractor;

/// A configured crawler. One `crawl` call is one independent crawl job.
pub struct Crawler<F = HttpFetcher> {
    fetcher: F,
    extractor: ContentExtractor,
    config: CrawlConfig,
}

impl Crawler<HttpFetcher> {
    /// Crawler backed by a real HTTP client
    pub fn new(config: CrawlConfig) -> Result<Self, CrawlError> {
        let fetcher = HttpFetcher::new(&config)?;
        Ok(Self::with_fetcher(fetcher, config))
    }
}

impl<F: PageFetcher> Crawler<F> {
    /// Crawler backed by any fetcher (tests use an in-memory site)
    pub fn with_fetcher(fetcher: F, config: CrawlConfig) -> Self {
        Crawler {
            fetcher,
            extractor: ContentExtractor::new(config.extraction.clone()),
            config,
        }
    }

    pub fn config(&self) -> &CrawlConfig {
        &self.config
    }

    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    /// Crawls from `seed` without progress reporting or cancellation
    pub async fn crawl(&self, seed: &str) -> Result<CrawlReport, CrawlError> {
        self.crawl_with(seed, &NoProgress, &CancellationToken::new())
            .await
    }

    /// Crawls from `seed`, reporting progress and honouring `cancel`.
    ///
    /// Per-page failures are logged and skipped. The only errors returned
    /// are a malformed seed and, under `SeedFailurePolicy::Fail`, an
    /// unreachable seed.
    pub async fn crawl_with(
        &self,
        seed: &str,
        progress: &dyn ProgressSink,
        cancel: &CancellationToken,
    ) -> Result<CrawlReport, CrawlError> {
        let seed_url = Url::parse(seed).map_err(|source| CrawlError::InvalidSeed {
            url: seed.to_string(),
            source,
        })?;
        let base_domain =
            authority(&seed_url).ok_or_else(|| CrawlError::MissingHost(seed.to_string()))?;

        let mut frontier = Frontier::new(
            normalize_url(&seed_url),
            seed.to_string(),
            base_domain,
            self.config.max_pages,
        );
        let mut documents: Vec<Document> = Vec::new();
        let mut failed_pages = 0;
        let mut cancelled = false;

        info!(seed, budget = self.config.max_pages, "starting crawl");

        loop {
            if cancel.is_cancelled() {
                cancelled = true;
                break;
            }

            let entry = match frontier.next_url() {
                Some(entry) => entry,
                None => break,
            };
            let visited = frontier.visited_count();
            let budget = frontier.budget();

            info!(visited, budget, url = %entry.url, "scraping");
            notify(progress, visited, budget, &describe(&entry.url));

            let fetched = tokio::select! {
                biased;
                _ = cancel.cancelled() => {
                    cancelled = true;
                    break;
                }
                result = self.fetcher.fetch(&entry.fetch_url) => result,
            };

            match fetched {
                Ok(page) => {
                    if let Some(document) = self.process_page(&entry, &page, &mut frontier) {
                        documents.push(document);
                    }
                }
                Err(error) => {
                    failed_pages += 1;
                    if visited == 1 && self.config.seed_failure == SeedFailurePolicy::Fail {
                        return Err(CrawlError::SeedUnreachable {
                            url: entry.fetch_url,
                            source: error,
                        });
                    }
                    warn!(url = %entry.fetch_url, %error, "failed to fetch page, skipping");
                }
            }

            let more_to_do = frontier.pending() > 0 && frontier.visited_count() < budget;
            if more_to_do && !self.config.request_delay.is_zero() {
                tokio::select! {
                    biased;
                    _ = cancel.cancelled() => {
                        cancelled = true;
                        break;
                    }
                    _ = tokio::time::sleep(self.config.request_delay) => {}
                }
            }
        }

        let outcome = frontier.finish(cancelled);
        let report = CrawlReport::new(
            seed.to_string(),
            documents,
            frontier.visited_count(),
            failed_pages,
            outcome,
        );

        info!(
            pages_visited = report.pages_visited,
            documents = report.documents.len(),
            total_characters = report.total_characters,
            ?outcome,
            "crawl finished"
        );

        Ok(report)
    }

    // Extracts the page's document and feeds its links to the frontier.
    // Both steps use the HTML we already fetched.
    fn process_page(
        &self,
        entry: &FrontierEntry,
        page: &FetchedPage,
        frontier: &mut Frontier,
    ) -> Option<Document> {
        if let Some(landed) = normalize_str(&page.final_url) {
            if landed != entry.url && !frontier.record_redirect(landed) {
                debug!(
                    url = %entry.url,
                    final_url = %page.final_url,
                    "redirected to a page already crawled"
                );
                return None;
            }
        }

        let document = self.extractor.extract(&page.html, &entry.url);
        match &document {
            Some(doc) => info!(url = %entry.url, chars = doc.length, "extracted document"),
            None => debug!(url = %entry.url, "no content extracted"),
        }

        // Relative links resolve against where the server actually sent us
        let base = Url::parse(&page.final_url).or_else(|_| Url::parse(&entry.url));
        if let Ok(base) = base {
            let links = discover_links(&page.html, &base, &frontier.scope());
            let found = links.len();
            let added = frontier.enqueue(links);
            debug!(url = %entry.url, found, added, "discovered links");
        }

        document
    }
}

/// Crawls a documentation site with default settings and the given budget
pub async fn crawl_website(seed: &str, max_pages: usize) -> Result<CrawlReport, CrawlError> {
    let config = CrawlConfig::builder().max_pages(max_pages).build();
    Crawler::new(config)?.crawl(seed).await
}

// Human-readable progress line for a URL: "Scraping: /docs/intro"
fn describe(url: &str) -> String {
    let path = Url::parse(url)
        .map(|parsed| parsed.path().to_string())
        .unwrap_or_else(|_| url.to_string());
    format!("Scraping: {}", path)
}
