// src/error.rs
// =============================================================================
// Error types for the crawler library.
//
// Three families, one per stage that can fail:
// - FetchError: a single page could not be downloaded (soft, page is skipped)
// - CrawlError: the crawl as a whole could not run
// - IngestError: the finished crawl could not be handed to an ingestion sink
//
// Thin pages and broken selectors are NOT errors here. The extractor simply
// returns None for a thin page, and selector failures are logged and skipped.
// =============================================================================

use thiserror::Error;

/// Why a single page fetch failed.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The request did not complete within the configured timeout
    #[error("timed out fetching {url}")]
    Timeout { url: String },

    /// The server answered, but not with a 2xx status
    #[error("HTTP {status} from {url}")]
    Status { url: String, status: u16 },

    /// Connection, TLS, DNS or body-decoding failure
    #[error("transport error fetching {url}: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The URL could not be parsed at all
    #[error("invalid URL: {url}")]
    InvalidUrl { url: String },
}

impl FetchError {
    /// Sorts a reqwest failure into the right variant
    pub fn from_reqwest(url: &str, error: reqwest::Error) -> Self {
        if error.is_timeout() {
            FetchError::Timeout {
                url: url.to_string(),
            }
        } else {
            FetchError::Transport {
                url: url.to_string(),
                source: error,
            }
        }
    }
}

/// Crawl-level failures. Per-page problems never end up here.
#[derive(Debug, Error)]
pub enum CrawlError {
    #[error("invalid seed URL '{url}': {source}")]
    InvalidSeed {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("seed URL has no host: {0}")]
    MissingHost(String),

    /// Only raised under `SeedFailurePolicy::Fail`
    #[error("seed URL {url} is unreachable: {source}")]
    SeedUnreachable {
        url: String,
        #[source]
        source: FetchError,
    },

    #[error("failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}

/// Failures while handing documents to an ingestion sink.
#[derive(Debug, Error)]
pub enum IngestError {
    /// The crawl finished but produced nothing worth indexing
    #[error("no documents were extracted from {seed}; check the URL and try again")]
    NoDocuments { seed: String },

    #[error("ingestion sink failed: {0}")]
    Sink(#[from] anyhow::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
