// src/config.rs
// =============================================================================
// Crawl settings.
//
// Every knob has a default that matches polite, single-threaded crawling of
// a documentation site: 50 pages, half a second between requests, a 10
// second timeout and a browser-like user agent.
//
// Build one with the builder:
//
//   let config = CrawlConfig::builder()
//       .max_pages(20)
//       .request_delay(Duration::from_millis(250))
//       .build();
// =============================================================================

use std::time::Duration;

/// Browser-like user agent sent with every request
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";

/// What to do when the very first fetch of a crawl fails
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SeedFailurePolicy {
    /// Log the failure and return an empty report; emptiness is the signal
    #[default]
    BestEffort,
    /// Return `CrawlError::SeedUnreachable` to the caller
    Fail,
}

/// Thresholds used by the content extractor
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionConfig {
    /// Pages whose cleaned text is shorter than this are dropped
    pub min_content_chars: usize,
    /// Code samples must be longer than this to be kept
    pub min_code_chars: usize,
    /// How many code samples get appended to a document
    pub max_code_samples: usize,
    /// A candidate content region must have more visible text than this
    pub region_min_chars: usize,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            min_content_chars: 100,
            min_code_chars: 20,
            max_code_samples: 3,
            region_min_chars: 100,
        }
    }
}

/// Settings for one crawl job
#[derive(Debug, Clone)]
pub struct CrawlConfig {
    /// Maximum number of pages to visit
    pub max_pages: usize,
    /// Fixed delay after each page, success or failure
    pub request_delay: Duration,
    /// Per-request timeout
    pub request_timeout: Duration,
    /// User agent header value
    pub user_agent: String,
    /// How a failed seed fetch is reported
    pub seed_failure: SeedFailurePolicy,
    /// Extractor thresholds
    pub extraction: ExtractionConfig,
}

impl Default for CrawlConfig {
    fn default() -> Self {
        Self {
            max_pages: 50,
            request_delay: Duration::from_millis(500),
            request_timeout: Duration::from_secs(10),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            seed_failure: SeedFailurePolicy::BestEffort,
            extraction: ExtractionConfig::default(),
        }
    }
}

impl CrawlConfig {
    pub fn builder() -> CrawlConfigBuilder {
        CrawlConfigBuilder::default()
    }
}

/// Builder for `CrawlConfig`
#[derive(Debug, Default)]
pub struct CrawlConfigBuilder {
    config: CrawlConfig,
}

impl CrawlConfigBuilder {
    /// Set the page budget
    pub fn max_pages(mut self, max_pages: usize) -> Self {
        self.config.max_pages = max_pages;
        self
    }

    /// Set the delay applied after every page
    pub fn request_delay(mut self, delay: Duration) -> Self {
        self.config.request_delay = delay;
        self
    }

    /// Set the per-request timeout
    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.config.request_timeout = timeout;
        self
    }

    /// Set the user agent
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.config.user_agent = user_agent.into();
        self
    }

    /// Choose how a failed seed fetch is reported
    pub fn seed_failure(mut self, policy: SeedFailurePolicy) -> Self {
        self.config.seed_failure = policy;
        self
    }

    /// Replace the extractor thresholds
    pub fn extraction(mut self, extraction: ExtractionConfig) -> Self {
        self.config.extraction = extraction;
        self
    }

    pub fn build(self) -> CrawlConfig {
        self.config
    }
}
