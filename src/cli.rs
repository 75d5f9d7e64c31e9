// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// Subcommands:
// - crawl:   crawl a documentation site and print/save the documents
// - extract: fetch one page and show the document extracted from it
// - links:   fetch one page and show the links the crawler would follow
// =============================================================================

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::time::Duration;

use doc_crawler::config::DEFAULT_USER_AGENT;
use doc_crawler::{CrawlConfig, SeedFailurePolicy};

#[derive(Parser, Debug)]
#[command(
    name = "doc-crawler",
    version,
    about = "Crawl a documentation website into clean, citeable documents",
    long_about = "doc-crawler walks a documentation site breadth-first, strips navigation, \
                  ads and legal boilerplate, and keeps the prose and code samples of each page \
                  together with the URL it came from."
)]
pub struct Cli {
    /// Show debug logs (RUST_LOG overrides this)
    #[arg(long, short, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Crawl a documentation site starting from a URL
    ///
    /// Example: doc-crawler crawl https://docs.example.com/ --max-pages 20
    Crawl {
        /// Seed URL; only pages on the same host are crawled
        url: String,

        #[command(flatten)]
        settings: CrawlSettings,

        /// Print the full report as JSON instead of a table
        #[arg(long)]
        json: bool,

        /// Also write the documents to this file, one JSON object per line
        #[arg(long, short)]
        output: Option<PathBuf>,
    },

    /// Fetch a single page and print the document extracted from it
    Extract {
        url: String,

        #[command(flatten)]
        settings: CrawlSettings,

        /// Print the document as JSON
        #[arg(long)]
        json: bool,
    },

    /// Fetch a single page and list the links the crawler would enqueue
    Links {
        url: String,

        #[command(flatten)]
        settings: CrawlSettings,
    },
}

/// Flags shared by every subcommand that talks to the network
#[derive(Args, Debug, Clone)]
pub struct CrawlSettings {
    /// Maximum number of pages to visit
    #[arg(long, default_value_t = 50)]
    pub max_pages: usize,

    /// Delay between requests, in milliseconds
    #[arg(long, default_value_t = 500)]
    pub delay_ms: u64,

    /// Per-request timeout, in seconds
    #[arg(long, default_value_t = 10)]
    pub timeout_secs: u64,

    /// User agent header sent with every request
    #[arg(long, default_value = DEFAULT_USER_AGENT)]
    pub user_agent: String,

    /// Fail the crawl if the seed URL cannot be fetched
    #[arg(long)]
    pub strict_seed: bool,
}

impl CrawlSettings {
    pub fn to_config(&self) -> CrawlConfig {
        let seed_failure = if self.strict_seed {
            SeedFailurePolicy::Fail
        } else {
            SeedFailurePolicy::BestEffort
        };

        CrawlConfig::builder()
            .max_pages(self.max_pages)
            .request_delay(Duration::from_millis(self.delay_ms))
            .request_timeout(Duration::from_secs(self.timeout_secs))
            .user_agent(self.user_agent.clone())
            .seed_failure(seed_failure)
            .build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_crawl_defaults() {
        let cli = Cli::parse_from(["doc-crawler", "crawl", "https://example.com/docs/"]);
        match cli.command {
            Commands::Crawl {
                url,
                settings,
                json,
                output,
            } => {
                assert_eq!(url, "https://example.com/docs/");
                assert!(!json);
                assert!(output.is_none());

                let config = settings.to_config();
                assert_eq!(config.max_pages, 50);
                assert_eq!(config.request_delay, Duration::from_millis(500));
                assert_eq!(config.request_timeout, Duration::from_secs(10));
                assert_eq!(config.user_agent, DEFAULT_USER_AGENT);
                assert_eq!(config.seed_failure, SeedFailurePolicy::BestEffort);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_crawl_flags() {
        let cli = Cli::parse_from([
            "doc-crawler",
            "--verbose",
            "crawl",
            "https://example.com/",
            "--max-pages",
            "5",
            "--delay-ms",
            "0",
            "--strict-seed",
            "--output",
            "docs.jsonl",
        ]);
        assert!(cli.verbose);
        match cli.command {
            Commands::Crawl {
                settings, output, ..
            } => {
                let config = settings.to_config();
                assert_eq!(config.max_pages, 5);
                assert_eq!(config.request_delay, Duration::ZERO);
                assert_eq!(config.seed_failure, SeedFailurePolicy::Fail);
                assert_eq!(output, Some(PathBuf::from("docs.jsonl")));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }
}
