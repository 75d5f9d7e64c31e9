// src/extract/rules.rs
// =============================================================================
// The fixed selector tables the extractor works from.
//
// - PRUNE_PATTERNS: elements removed before anything else looks at the page
// - CONTENT_PATTERNS: candidate main-content containers, in priority order
// - CODE_PATTERNS: elements that hold code samples
// - ARTIFACTS: leftover UI strings stripped from the extracted text
//
// Patterns are compiled one at a time. A pattern that fails to parse is
// logged and dropped; the rest of the table still applies.
// =============================================================================

use scraper::Selector;

/// Removed outright: non-content tags, page chrome, then boilerplate blocks
pub const PRUNE_PATTERNS: &[&str] = &[
    // Non-content tags
    "script",
    "style",
    "link",
    "meta",
    // Structural chrome
    "nav",
    "header",
    "footer",
    "aside",
    // Navigation
    ".navigation",
    ".nav",
    ".navbar",
    ".menu",
    ".sidebar",
    "#navigation",
    "#nav",
    "#navbar",
    "#menu",
    "#sidebar",
    "[class*=\"nav-\"]",
    "[id*=\"nav-\"]",
    // Footer
    ".footer",
    "#footer",
    "[class*=\"footer\"]",
    "[id*=\"footer\"]",
    // Page headers, but not headers inside an article
    ".header:not(article .header)",
    "#header:not(article #header)",
    // Breadcrumbs and tables of contents
    ".breadcrumb",
    ".toc",
    ".table-of-contents",
    // Social
    ".social-links",
    ".social",
    ".share",
    // Ads
    ".advertisement",
    ".ads",
    ".ad",
    // Comments
    ".comments",
    ".comment-section",
    // Related content
    ".related-posts",
    ".related-articles",
    // Newsletter
    ".newsletter",
    ".subscribe",
    // Legal
    ".copyright",
    ".legal",
];

/// Main-content candidates; the first one with enough text wins
pub const CONTENT_PATTERNS: &[&str] = &[
    // Semantic containers
    "main",
    "article",
    "[role=\"main\"]",
    // Generic content areas
    ".main",
    "#main",
    ".main-content",
    "#main-content",
    ".content",
    "#content",
    ".page-content",
    "#page-content",
    // Documentation containers
    ".documentation",
    ".docs",
    "#documentation",
    "#docs",
    ".doc-content",
    "#doc-content",
    ".docs-content",
    "#docs-content",
    ".article",
    "#article",
    // Site generators
    ".rst-content",
    ".markdown-body",
    ".prose",
    ".md-content",
    // API reference and tutorials
    ".api-content",
    ".reference-content",
    ".tutorial-content",
    ".guide-content",
];

/// Code sample containers
pub const CODE_PATTERNS: &[&str] = &[
    "pre code",
    "pre",
    ".highlight pre",
    ".codehilite",
    ".code-block",
    "[class*=\"language-\"]",
    "[class*=\"highlight-\"]",
];

/// UI strings that survive extraction but carry no documentation
pub const ARTIFACTS: &[&str] = &[
    "Previous Next",
    "Table of Contents",
    "Edit on GitHub",
    "Copy to clipboard",
];

/// A compiled table: selectors that parsed, plus the patterns that did not
#[derive(Debug)]
pub struct RuleSet {
    pub selectors: Vec<(&'static str, Selector)>,
    pub rejected: Vec<&'static str>,
}

impl RuleSet {
    /// Compiles each pattern on its own so one bad pattern only loses itself
    pub fn compile(patterns: &[&'static str]) -> Self {
        patterns.iter().fold(
            RuleSet {
                selectors: Vec::with_capacity(patterns.len()),
                rejected: Vec::new(),
            },
            |mut rules, &pattern| {
                match Selector::parse(pattern) {
                    Ok(selector) => rules.selectors.push((pattern, selector)),
                    Err(e) => {
                        tracing::debug!(pattern, error = %e, "skipping selector");
                        rules.rejected.push(pattern);
                    }
                }
                rules
            },
        )
    }

    pub fn iter(&self) -> impl Iterator<Item = &Selector> {
        self.selectors.iter().map(|(_, selector)| selector)
    }
}

/// The three compiled tables the extractor needs
#[derive(Debug)]
pub struct ExtractionRules {
    pub prune: RuleSet,
    pub content: RuleSet,
    pub code: RuleSet,
}

impl ExtractionRules {
    pub fn new() -> Self {
        ExtractionRules {
            prune: RuleSet::compile(PRUNE_PATTERNS),
            content: RuleSet::compile(CONTENT_PATTERNS),
            code: RuleSet::compile(CODE_PATTERNS),
        }
    }
}

impl Default for ExtractionRules {
    fn default() -> Self {
        Self::new()
    }
}
