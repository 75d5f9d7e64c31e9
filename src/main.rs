// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Parse command-line arguments using clap
// 2. Set up logging
// 3. Dispatch to the appropriate subcommand handler
// 4. Print results
// 5. Exit with proper code (0 = documents found, 1 = nothing extracted,
//    2 = error)
// =============================================================================

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use tokio_util::sync::CancellationToken;
use url::Url;

use cli::{Cli, Commands, CrawlSettings};
use doc_crawler::crawl::policy::authority;
use doc_crawler::crawl::{discover_links, DiscoveryScope};
use doc_crawler::ingest::{self, CorpusStats, JsonLinesSink};
use doc_crawler::{
    logging, Crawler, CrawlReport, Document, HttpFetcher, IngestError, PageFetcher,
};
use std::collections::HashSet;
use std::path::Path;

#[tokio::main]
async fn main() {
    let exit_code = match run().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

async fn run() -> Result<i32> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    match cli.command {
        Commands::Crawl {
            url,
            settings,
            json,
            output,
        } => handle_crawl(&url, &settings, json, output.as_deref()).await,
        Commands::Extract {
            url,
            settings,
            json,
        } => handle_extract(&url, &settings, json).await,
        Commands::Links { url, settings } => handle_links(&url, &settings).await,
    }
}

// Handles the 'crawl' subcommand
async fn handle_crawl(
    url: &str,
    settings: &CrawlSettings,
    json: bool,
    output: Option<&Path>,
) -> Result<i32> {
    eprintln!("🔍 Crawling documentation: {}", url);
    eprintln!("📊 Max pages: {}", settings.max_pages);

    let crawler = Crawler::new(settings.to_config()).context("failed to set up the crawler")?;

    // Ctrl-C stops the crawl after the current page; we still get a report
    let cancel = CancellationToken::new();
    let on_signal = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            eprintln!("\n⏹️  Stopping after the current page...");
            on_signal.cancel();
        }
    });

    let progress = |current: usize, total: usize, description: &str| {
        eprintln!("[{}/{}] {}", current, total, description);
    };

    let report = crawler
        .crawl_with(url, &progress, &cancel)
        .await
        .with_context(|| format!("crawl of {} failed", url))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }

    if let Some(path) = output {
        let sink = JsonLinesSink::new(path);
        match ingest::ingest(&report, &sink).await {
            Ok(_) => eprintln!(
                "💾 Wrote {} document(s) to {}",
                report.documents.len(),
                path.display()
            ),
            Err(IngestError::NoDocuments { seed }) => {
                eprintln!("⚠️  No documents were extracted from {}", seed);
                return Ok(1);
            }
            Err(e) => return Err(e).context("failed to write documents"),
        }
    }

    if report.is_empty() {
        Ok(1)
    } else {
        Ok(0)
    }
}

// Handles the 'extract' subcommand
async fn handle_extract(url: &str, settings: &CrawlSettings, json: bool) -> Result<i32> {
    let fetcher = HttpFetcher::new(&settings.to_config())?;
    let page = fetcher.fetch(url).await?;

    let document = match doc_crawler::extract_document(&page.html, url) {
        Some(document) => document,
        None => {
            eprintln!("⚠️  No substantive content found on {}", url);
            return Ok(1);
        }
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&document)?);
    } else {
        print_document(&document);
    }
    Ok(0)
}

// Handles the 'links' subcommand
async fn handle_links(url: &str, settings: &CrawlSettings) -> Result<i32> {
    let page_url = Url::parse(url).with_context(|| format!("invalid URL '{}'", url))?;
    let base_domain = authority(&page_url).context("URL has no host")?;

    let fetcher = HttpFetcher::new(&settings.to_config())?;
    let page = fetcher.fetch(url).await?;

    let visited = HashSet::new();
    let scope = DiscoveryScope {
        base_domain: &base_domain,
        visited: &visited,
        budget: settings.max_pages,
    };
    let links = discover_links(&page.html, &page_url, &scope);

    for link in &links {
        println!("{}", link);
    }
    eprintln!("🔗 {} link(s) would be enqueued", links.len());
    Ok(0)
}

// Prints the crawl as a human-readable table plus a summary
fn print_report(report: &CrawlReport) {
    println!("{:<60} {:<30} {:>8} {:>5}", "URL", "TITLE", "CHARS", "CODE");
    println!("{}", "=".repeat(106));

    for document in &report.documents {
        println!(
            "{:<60} {:<30} {:>8} {:>5}",
            truncate(&document.source_url, 60),
            truncate(&document.title, 30),
            document.length,
            document.code_count
        );
    }

    println!();

    let stats = CorpusStats::from_documents(&report.documents);
    println!("📊 Summary ({:?}):", report.outcome);
    println!("   🌐 Pages visited: {}", report.pages_visited);
    println!("   ❌ Failed fetches: {}", report.failed_pages);
    println!("   📄 Documents: {}", stats.pages_scraped);
    println!("   💻 With code: {}", stats.pages_with_code);
    println!("   🔤 Total characters: {}", stats.total_characters);
}

fn print_document(document: &Document) {
    println!("🔗 {}", document.source_url);
    println!("📄 {}", document.title);
    println!(
        "🔤 {} characters, {} code sample(s)\n",
        document.length, document.code_count
    );
    println!("{}", document.content);
}

// Shortens text for table display, on a character boundary
fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() > width {
        let kept: String = text.chars().take(width.saturating_sub(3)).collect();
        format!("{}...", kept)
    } else {
        text.to_string()
    }
}
