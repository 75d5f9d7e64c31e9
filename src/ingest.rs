// src/ingest.rs
// =============================================================================
// The boundary between the crawler and everything downstream of it.
//
// Downstream services (text splitting, embeddings, vector storage, answer
// generation) live elsewhere. This module only defines how they plug in:
//
// - IngestionSink: accepts the documents of a finished crawl
// - AnswerService: answers a question and says which pages it used; `ask`
//   renders its answer with the sources underneath
//
// It also holds the small amount of logic that sits on the boundary: the
// "no documents means no index" rule, corpus statistics, a JSON-lines sink
// for the CLI, and rendering of source citations under an answer.
// =============================================================================

use async_trait::async_trait;
use serde::Serialize;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::document::{CrawlReport, Document};
use crate::error::IngestError;

/// How many sources are listed under an answer
pub const MAX_CITED_SOURCES: usize = 3;

/// Receives the documents of a finished crawl (chunk + embed + store)
#[async_trait]
pub trait IngestionSink: Send + Sync {
    async fn ingest(&self, documents: &[Document]) -> anyhow::Result<()>;
}

/// Answers questions against an index built from crawled documents
#[async_trait]
pub trait AnswerService: Send + Sync {
    async fn answer(&self, question: &str) -> anyhow::Result<Answer>;
}

/// An answer plus the source URLs it drew on
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Answer {
    pub text: String,
    pub sources: Vec<String>,
}

impl Answer {
    /// Up to three unique, non-empty sources in the order they were cited
    pub fn cited_sources(&self) -> Vec<&str> {
        let mut cited: Vec<&str> = Vec::new();
        for source in self.sources.iter().map(|s| s.trim()) {
            if !source.is_empty() && !cited.contains(&source) {
                cited.push(source);
            }
            if cited.len() == MAX_CITED_SOURCES {
                break;
            }
        }
        cited
    }

    /// The answer text followed by a "Sources:" list, if there are any
    pub fn render(&self) -> String {
        let cited = self.cited_sources();
        if cited.is_empty() {
            return self.text.clone();
        }

        let mut rendered = format!("{}\n\n---\nSources:\n", self.text);
        for source in cited {
            rendered.push_str(&format!("- {}\n", source));
        }
        rendered
    }
}

/// Asks `service` a question and renders its answer with the sources cited
pub async fn ask(service: &dyn AnswerService, question: &str) -> anyhow::Result<String> {
    let answer = service.answer(question).await?;
    tracing::debug!(question, sources = answer.sources.len(), "answer received");
    Ok(answer.render())
}

/// Summary numbers for a set of documents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CorpusStats {
    pub pages_scraped: usize,
    pub total_characters: usize,
    pub pages_with_code: usize,
}

impl CorpusStats {
    pub fn from_documents(documents: &[Document]) -> Self {
        CorpusStats {
            pages_scraped: documents.len(),
            total_characters: documents.iter().map(|d| d.length).sum(),
            pages_with_code: documents.iter().filter(|d| d.has_code).count(),
        }
    }
}

/// Hands a crawl's documents to `sink`.
///
/// A crawl that produced nothing is an error here: an empty index cannot
/// answer anything, so the sink is not called at all.
pub async fn ingest(
    report: &CrawlReport,
    sink: &dyn IngestionSink,
) -> Result<CorpusStats, IngestError> {
    if report.is_empty() {
        return Err(IngestError::NoDocuments {
            seed: report.seed_url.clone(),
        });
    }

    sink.ingest(&report.documents).await?;

    let stats = CorpusStats::from_documents(&report.documents);
    tracing::info!(
        pages = stats.pages_scraped,
        characters = stats.total_characters,
        with_code = stats.pages_with_code,
        "documents handed to ingestion sink"
    );
    Ok(stats)
}

/// Writes one JSON document per line to a file
#[derive(Debug, Clone)]
pub struct JsonLinesSink {
    path: PathBuf,
}

impl JsonLinesSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        JsonLinesSink { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write_all(&self, documents: &[Document]) -> Result<(), IngestError> {
        let file = std::fs::File::create(&self.path)?;
        let mut writer = std::io::BufWriter::new(file);
        for document in documents {
            serde_json::to_writer(&mut writer, document)?;
            writer.write_all(b"\n")?;
        }
        writer.flush()?;
        Ok(())
    }
}

#[async_trait]
impl IngestionSink for JsonLinesSink {
    async fn ingest(&self, documents: &[Document]) -> anyhow::Result<()> {
        // File writes block, keep them off the runtime threads
        let sink = self.clone();
        let documents = documents.to_vec();
        tokio::task::spawn_blocking(move || sink.write_all(&documents)).await??;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::CrawlOutcome;
    use std::sync::Mutex;

    struct RecordingSink {
        received: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl IngestionSink for RecordingSink {
        async fn ingest(&self, documents: &[Document]) -> anyhow::Result<()> {
            let mut received = self.received.lock().unwrap();
            received.extend(documents.iter().map(|d| d.source_url.clone()));
            Ok(())
        }
    }

    fn doc(url: &str, code: &[String]) -> Document {
        Document::new(url.to_string(), "T".to_string(), "p".repeat(100), code, 3)
    }

    fn report(documents: Vec<Document>) -> CrawlReport {
        CrawlReport::new(
            "https://example.com/".to_string(),
            documents,
            2,
            0,
            CrawlOutcome::Completed,
        )
    }

    #[tokio::test]
    async fn test_empty_crawl_is_rejected() {
        let sink = RecordingSink {
            received: Mutex::new(Vec::new()),
        };
        let err = ingest(&report(vec![]), &sink).await.unwrap_err();

        assert!(matches!(err, IngestError::NoDocuments { .. }));
        assert!(sink.received.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_documents_reach_the_sink_in_order() {
        let sink = RecordingSink {
            received: Mutex::new(Vec::new()),
        };
        let code = vec!["let answer = 42; // meaning".to_string()];
        let docs = vec![
            doc("https://example.com/", &[]),
            doc("https://example.com/a", &code),
        ];

        let stats = ingest(&report(docs), &sink).await.unwrap();

        assert_eq!(
            *sink.received.lock().unwrap(),
            vec!["https://example.com/", "https://example.com/a"]
        );
        assert_eq!(stats.pages_scraped, 2);
        assert_eq!(stats.pages_with_code, 1);
        assert!(stats.total_characters > 200);
    }

    #[tokio::test]
    async fn test_json_lines_sink() {
        let dir = tempfile::tempdir().unwrap();
        let sink = JsonLinesSink::new(dir.path().join("docs.jsonl"));
        let docs = vec![doc("https://example.com/", &[]), doc("https://example.com/b", &[])];

        sink.ingest(&docs).await.unwrap();

        let written = std::fs::read_to_string(sink.path()).unwrap();
        let parsed: Vec<Document> = written
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect();
        assert_eq!(parsed, docs);
    }

    #[test]
    fn test_render_lists_unique_sources() {
        let answer = Answer {
            text: "Use the builder.".to_string(),
            sources: vec![
                "https://example.com/a".to_string(),
                "".to_string(),
                "https://example.com/a".to_string(),
                "https://example.com/b".to_string(),
                "https://example.com/c".to_string(),
                "https://example.com/d".to_string(),
            ],
        };

        assert_eq!(
            answer.render(),
            "Use the builder.\n\n---\nSources:\n\
             - https://example.com/a\n\
             - https://example.com/b\n\
             - https://example.com/c\n"
        );
    }

    // Answers every question the same way, citing the same pages
    struct CannedAnswers {
        sources: Vec<String>,
        questions: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl AnswerService for CannedAnswers {
        async fn answer(&self, question: &str) -> anyhow::Result<Answer> {
            self.questions.lock().unwrap().push(question.to_string());
            Ok(Answer {
                text: "Call Client::builder() and set a timeout.".to_string(),
                sources: self.sources.clone(),
            })
        }
    }

    #[tokio::test]
    async fn test_ask_renders_cited_sources() {
        let service = CannedAnswers {
            sources: vec![
                "https://example.com/config".to_string(),
                "https://example.com/config".to_string(),
                "https://example.com/client".to_string(),
            ],
            questions: Mutex::new(Vec::new()),
        };

        let rendered = ask(&service, "How do I set a timeout?").await.unwrap();

        assert_eq!(
            rendered,
            "Call Client::builder() and set a timeout.\n\n---\nSources:\n\
             - https://example.com/config\n\
             - https://example.com/client\n"
        );
        assert_eq!(
            *service.questions.lock().unwrap(),
            vec!["How do I set a timeout?"]
        );
    }

    #[tokio::test]
    async fn test_json_lines_sink_reports_unwritable_path() {
        let dir = tempfile::tempdir().unwrap();
        let sink = JsonLinesSink::new(dir.path().join("missing").join("docs.jsonl"));

        let result = sink.ingest(&[doc("https://example.com/", &[])]).await;
        assert!(result.is_err());
    }

    #[test]
    fn test_render_without_sources() {
        let answer = Answer {
            text: "Not in the docs.".to_string(),
            sources: vec![],
        };
        assert_eq!(answer.render(), "Not in the docs.");
    }
}
