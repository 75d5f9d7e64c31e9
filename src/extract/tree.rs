// src/extract/tree.rs
// =============================================================================
// A read-only, pruned view over a parsed HTML document.
//
// Instead of deleting boilerplate nodes from the tree, we remember which
// nodes the prune rules matched and skip their whole subtree whenever we
// select elements or collect text. The parsed document itself is never
// mutated, so each extraction stage can be tested on its own.
// =============================================================================

use ego_tree::NodeId;
use scraper::{ElementRef, Html, Node, Selector};
use std::collections::HashSet;

use super::rules::RuleSet;

pub struct PrunedTree {
    document: Html,
    pruned: HashSet<NodeId>,
}

impl PrunedTree {
    /// Parses `html` and marks every element matched by `prune`
    pub fn new(html: &str, prune: &RuleSet) -> Self {
        let document = Html::parse_document(html);
        let pruned = prune
            .iter()
            .flat_map(|selector| document.select(selector).map(|el| el.id()))
            .collect();

        PrunedTree { document, pruned }
    }

    /// The untouched parsed document
    pub fn document(&self) -> &Html {
        &self.document
    }

    /// How many elements the prune rules matched
    pub fn pruned_count(&self) -> usize {
        self.pruned.len()
    }

    /// True if the element or any of its ancestors was pruned
    pub fn is_pruned(&self, element: ElementRef<'_>) -> bool {
        self.pruned.contains(&element.id())
            || element
                .ancestors()
                .any(|ancestor| self.pruned.contains(&ancestor.id()))
    }

    /// First element matching `selector` that survived pruning
    pub fn select_first(&self, selector: &Selector) -> Option<ElementRef<'_>> {
        self.document
            .select(selector)
            .find(|element| !self.is_pruned(*element))
    }

    /// All elements matching `selector` that survived pruning, in document order
    pub fn select_all<'a>(
        &'a self,
        selector: &'a Selector,
    ) -> impl Iterator<Item = ElementRef<'a>> + 'a {
        self.document
            .select(selector)
            .filter(move |element| !self.is_pruned(*element))
    }

    /// The `<body>` element, if it survived pruning
    pub fn body(&self) -> Option<ElementRef<'_>> {
        let selector = Selector::parse("body").ok()?;
        self.select_first(&selector)
    }

    /// Visible text of an element: each text node trimmed, joined with single
    /// spaces, then every whitespace run collapsed
    pub fn visible_text(&self, element: ElementRef<'_>) -> String {
        let mut pieces = Vec::new();
        if !self.is_pruned(element) {
            self.collect_text(element, &mut pieces);
        }
        collapse_whitespace(&pieces.join(" "))
    }

    /// Text of an element with its internal layout kept, only trimmed at the
    /// ends. Used for code samples, where newlines matter.
    pub fn raw_text(&self, element: ElementRef<'_>) -> String {
        let mut pieces = Vec::new();
        if !self.is_pruned(element) {
            self.collect_text(element, &mut pieces);
        }
        pieces.concat().trim().to_string()
    }

    fn collect_text<'a>(&self, element: ElementRef<'a>, pieces: &mut Vec<&'a str>) {
        for child in element.children() {
            match child.value() {
                Node::Text(text) => pieces.push(&text[..]),
                Node::Element(_) if !self.pruned.contains(&child.id()) => {
                    if let Some(child_element) = ElementRef::wrap(child) {
                        self.collect_text(child_element, pieces);
                    }
                }
                _ => {}
            }
        }
    }
}

/// Collapses every whitespace run to one space and trims the ends
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
