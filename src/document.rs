// src/document.rs
// =============================================================================
// The data that comes out of a crawl.
//
// - Document: one page's cleaned text, code samples and provenance
// - CrawlOutcome: how the crawl loop stopped
// - CrawlReport: everything a finished crawl hands back to the caller
//
// All of these serialize to JSON so the CLI can print them with --json.
// =============================================================================

use serde::{Deserialize, Serialize};

/// Marker placed between the prose and the appended code samples
pub const CODE_EXAMPLES_HEADING: &str = "Code Examples:";

/// Separator placed between appended code samples
pub const CODE_SAMPLE_SEPARATOR: &str = "---";

/// One successfully extracted documentation page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    /// Normalized URL (scheme + host + path) of the page
    pub source_url: String,
    /// Page title with the trailing site name removed
    pub title: String,
    /// Cleaned prose, followed by up to N code samples
    pub content: String,
    /// Character count of `content`, code included
    pub length: usize,
    /// True when at least one code sample was found
    pub has_code: bool,
    /// Number of distinct code samples found, before truncation
    pub code_count: usize,
}

impl Document {
    /// Builds a document from cleaned prose and the page's code samples.
    ///
    /// At most `max_samples` samples are appended, but `code_count` reflects
    /// every sample that was found.
    pub fn new(
        source_url: String,
        title: String,
        prose: String,
        code_samples: &[String],
        max_samples: usize,
    ) -> Self {
        let mut content = prose;
        let shown: Vec<&str> = code_samples
            .iter()
            .take(max_samples)
            .map(String::as_str)
            .collect();

        if !shown.is_empty() {
            content.push_str("\n\n");
            content.push_str(CODE_EXAMPLES_HEADING);
            content.push('\n');
            let separator = format!("\n{}\n", CODE_SAMPLE_SEPARATOR);
            content.push_str(&shown.join(separator.as_str()));
        }

        let length = content.chars().count();

        Document {
            source_url,
            title,
            content,
            length,
            has_code: !code_samples.is_empty(),
            code_count: code_samples.len(),
        }
    }
}

/// How the crawl loop terminated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CrawlOutcome {
    /// The frontier emptied before the budget ran out
    Completed,
    /// The budget was reached with URLs still waiting
    Exhausted,
    /// The caller cancelled the crawl
    Cancelled,
}

/// The final result of one crawl job
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrawlReport {
    /// The URL the crawl started from
    pub seed_url: String,
    /// Documents in the order their pages were visited
    pub documents: Vec<Document>,
    /// How many URLs were dequeued and marked visited
    pub pages_visited: usize,
    /// How many of those failed to fetch
    pub failed_pages: usize,
    /// Sum of `length` over all documents
    pub total_characters: usize,
    pub outcome: CrawlOutcome,
}

impl CrawlReport {
    pub fn new(
        seed_url: String,
        documents: Vec<Document>,
        pages_visited: usize,
        failed_pages: usize,
        outcome: CrawlOutcome,
    ) -> Self {
        let total_characters = documents.iter().map(|d| d.length).sum();
        CrawlReport {
            seed_url,
            documents,
            pages_visited,
            failed_pages,
            total_characters,
            outcome,
        }
    }

    /// True when nothing worth indexing came out of the crawl
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prose() -> String {
        "x".repeat(120)
    }

    #[test]
    fn test_document_without_code() {
        let doc = Document::new(
            "https://example.com/docs".to_string(),
            "Intro".to_string(),
            prose(),
            &[],
            3,
        );
        assert_eq!(doc.content, prose());
        assert_eq!(doc.length, 120);
        assert!(!doc.has_code);
        assert_eq!(doc.code_count, 0);
    }

    #[test]
    fn test_document_truncates_code_but_counts_all() {
        let samples: Vec<String> = (1..=5).map(|i| format!("sample number {i}")).collect();
        let doc = Document::new(
            "https://example.com/docs".to_string(),
            "Intro".to_string(),
            prose(),
            &samples,
            3,
        );

        assert!(doc.has_code);
        assert_eq!(doc.code_count, 5);
        assert!(doc
            .content
            .ends_with("Code Examples:\nsample number 1\n---\nsample number 2\n---\nsample number 3"));
        assert!(!doc.content.contains("sample number 4"));
        // Length covers the appended code too
        assert_eq!(doc.length, doc.content.chars().count());
        assert!(doc.length > 120);
    }

    #[test]
    fn test_report_totals() {
        let docs = vec![
            Document::new("a".into(), "A".into(), prose(), &[], 3),
            Document::new("b".into(), "B".into(), "y".repeat(200), &[], 3),
        ];
        let report = CrawlReport::new("a".into(), docs, 4, 1, CrawlOutcome::Completed);
        assert_eq!(report.total_characters, 320);
        assert!(!report.is_empty());
    }
}
