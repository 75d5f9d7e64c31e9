// src/extract/mod.rs
// =============================================================================
// This module pulls documentation text out of fetched HTML.
//
// Submodules:
// - rules: the selector tables (what to prune, where content lives, code)
// - tree: a pruned, read-only view over the parsed page
// - content: main-content detection, code samples, title, Document
//
// Everything here is pure: no network, no shared state.
// =============================================================================

mod content;
mod rules;
mod tree;

pub use content::{clean_title, extract_document, page_title, strip_artifacts, ContentExtractor};
pub use rules::{ExtractionRules, RuleSet};
pub use tree::{collapse_whitespace, PrunedTree};
