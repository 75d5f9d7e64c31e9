// src/lib.rs
// =============================================================================
// doc-crawler turns a documentation website into a list of clean documents.
//
// Pipeline for every page:
//   frontier -> fetch -> extract (Document) -> discover links -> frontier
//
// Modules:
// - crawl:    URL policy, fetching, link discovery and the BFS scheduler
// - extract:  boilerplate removal and main-content extraction
// - document: the Document and CrawlReport types
// - ingest:   interfaces to the downstream embedding/answering services
// - config:   crawl settings with sensible defaults
// - error:    error types
// - logging:  tracing subscriber setup for binaries
// =============================================================================

pub mod config;
pub mod crawl;
pub mod document;
pub mod error;
pub mod extract;
pub mod ingest;
pub mod logging;

pub use config::{CrawlConfig, CrawlConfigBuilder, ExtractionConfig, SeedFailurePolicy};
pub use crawl::{
    crawl_website, is_documentation_url, Crawler, FetchedPage, HttpFetcher, NoProgress,
    PageFetcher, ProgressSink,
};
pub use document::{CrawlOutcome, CrawlReport, Document};
pub use error::{CrawlError, FetchError, IngestError};
pub use extract::extract_document;
