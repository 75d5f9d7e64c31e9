// src/extract/content.rs
// =============================================================================
// Turns one fetched HTML page into a Document.
//
// Steps (each works on the pruned view of the page):
// 1. Parse and prune scripts, page chrome and boilerplate blocks
// 2. Pick the main content region: the first candidate container with more
//    than 100 characters of text, or <body> if none qualifies
// 3. Collapse whitespace and strip leftover UI strings
// 4. Collect code samples (pre, pre code, highlight classes) longer than
//    20 characters, each distinct sample once
// 5. Read <title> and cut the site name off
// 6. Drop the page if the text is under 100 characters, otherwise build
//    the Document with up to 3 code samples appended
// =============================================================================

use scraper::{Html, Selector};

use super::rules::{ExtractionRules, ARTIFACTS};
use super::tree::{collapse_whitespace, PrunedTree};
use crate::config::ExtractionConfig;
use crate::crawl::policy::normalize_str;
use crate::document::Document;

/// Title used when a page has no <title>
pub const UNTITLED: &str = "No Title";

/// Characters that separate a page title from the site name
const TITLE_SEPARATORS: &[char] = &['|', '·', '-', '–', '—'];

/// Extracts documents from pages. Compile once, reuse for the whole crawl.
#[derive(Debug)]
pub struct ContentExtractor {
    rules: ExtractionRules,
    config: ExtractionConfig,
}

impl ContentExtractor {
    pub fn new(config: ExtractionConfig) -> Self {
        ContentExtractor {
            rules: ExtractionRules::new(),
            config,
        }
    }

    /// Builds a Document from a page, or None if the page is too thin.
    ///
    /// Extraction is deterministic: the same HTML always yields the same
    /// Document.
    pub fn extract(&self, html: &str, page_url: &str) -> Option<Document> {
        let tree = PrunedTree::new(html, &self.rules.prune);

        let prose = self.main_text(&tree);
        let prose_chars = prose.chars().count();
        if prose_chars < self.config.min_content_chars {
            tracing::debug!(url = %page_url, chars = prose_chars, "page too thin, skipping");
            return None;
        }

        let code_samples = self.code_samples(&tree);
        let title = page_title(tree.document());
        let source_url = normalize_str(page_url).unwrap_or_else(|| page_url.to_string());

        Some(Document::new(
            source_url,
            title,
            prose,
            &code_samples,
            self.config.max_code_samples,
        ))
    }

    /// Cleaned text of the main content region
    pub fn main_text(&self, tree: &PrunedTree) -> String {
        let region = self
            .rules
            .content
            .iter()
            .filter_map(|selector| tree.select_first(selector))
            .map(|element| tree.visible_text(element))
            .find(|text| text.chars().count() > self.config.region_min_chars);

        let text = match region {
            Some(text) => text,
            None => tree
                .body()
                .map(|body| tree.visible_text(body))
                .unwrap_or_default(),
        };

        strip_artifacts(&text)
    }

    /// Distinct code samples in document order, grouped by selector priority
    pub fn code_samples(&self, tree: &PrunedTree) -> Vec<String> {
        let mut samples: Vec<String> = Vec::new();

        for selector in self.rules.code.iter() {
            for element in tree.select_all(selector) {
                let code = tree.raw_text(element);
                if code.chars().count() > self.config.min_code_chars && !samples.contains(&code) {
                    samples.push(code);
                }
            }
        }

        samples
    }
}

impl Default for ContentExtractor {
    fn default() -> Self {
        Self::new(ExtractionConfig::default())
    }
}

/// Extracts a Document with the default thresholds
pub fn extract_document(html: &str, page_url: &str) -> Option<Document> {
    ContentExtractor::default().extract(html, page_url)
}

/// The page's <title>, with the site name removed
pub fn page_title(document: &Html) -> String {
    let raw = Selector::parse("title")
        .ok()
        .and_then(|selector| {
            document
                .select(&selector)
                .next()
                .map(|title| title.text().collect::<String>())
        });

    match raw {
        Some(raw) => clean_title(&raw),
        None => UNTITLED.to_string(),
    }
}

/// Cuts a title at its first separator and trims it.
///
///   "Installation | MyLib Docs" -> "Installation"
///   "Quickstart — Guide"        -> "Quickstart"
pub fn clean_title(raw: &str) -> String {
    let title = collapse_whitespace(raw);
    match title.find(TITLE_SEPARATORS) {
        Some(index) => title[..index].trim().to_string(),
        None => title,
    }
}

/// Removes leftover UI strings, then tidies the whitespace they leave behind
pub fn strip_artifacts(text: &str) -> String {
    let stripped = ARTIFACTS
        .iter()
        .fold(text.to_string(), |acc, &artifact| acc.replace(artifact, ""));
    collapse_whitespace(&stripped)
}
