// src/crawl/links.rs
// =============================================================================
// Finds the next pages to crawl on a fetched page.
//
// How it works:
// 1. Look for anchors inside likely content regions first
//    (main, article, .content, .documentation); if the page has none of
//    those, search the whole document
// 2. Skip fragment-only, javascript: and mailto: hrefs
// 3. Resolve relative hrefs against the page URL
// 4. Normalize: drop ?query and #fragment
// 5. Keep the link only if the URL policy accepts it, it was not visited
//    yet, it was not already returned by this call, and the crawl still has
//    budget left
//
// Order matters: links come back in the order they first appear on the
// page, which decides the breadth-first order of the crawl.
// =============================================================================

use scraper::{ElementRef, Html, Selector};
use std::collections::HashSet;
use url::Url;

use super::policy::{is_documentation_url, normalize_url};

/// Regions searched for links before falling back to the whole page
const LINK_REGIONS: &str = "main, article, .content, .documentation";

/// What the discoverer needs to know about the crawl it feeds
#[derive(Debug, Clone, Copy)]
pub struct DiscoveryScope<'a> {
    /// Host (and port) the crawl is restricted to
    pub base_domain: &'a str,
    /// URLs already visited by the crawl
    pub visited: &'a HashSet<String>,
    /// Page budget of the crawl
    pub budget: usize,
}

impl DiscoveryScope<'_> {
    fn accepts(&self, url: &str) -> bool {
        is_documentation_url(url, self.base_domain)
            && !self.visited.contains(url)
            && self.visited.len() < self.budget
    }
}

/// Returns the crawlable links on a page, unique and in first-seen order.
///
/// Parameters:
///   html: the raw HTML of the page
///   page_url: the URL the page was fetched from (for relative links)
///   scope: domain, visited set and budget of the running crawl
pub fn discover_links(html: &str, page_url: &Url, scope: &DiscoveryScope<'_>) -> Vec<String> {
    let document = Html::parse_document(html);

    let mut links = Vec::new();
    let mut found = HashSet::new();

    for href in region_hrefs(&document) {
        let normalized = match resolve_link(page_url, href) {
            Some(url) => url,
            None => continue,
        };

        if scope.accepts(&normalized) && found.insert(normalized.clone()) {
            links.push(normalized);
        }
    }

    links
}

// Collects raw href values from the content regions, or from the whole page
// when there are no content regions.
fn region_hrefs(document: &Html) -> Vec<&str> {
    let anchors = match Selector::parse("a[href]") {
        Ok(selector) => selector,
        Err(_) => return Vec::new(),
    };

    let regions: Vec<ElementRef> = match Selector::parse(LINK_REGIONS) {
        Ok(selector) => document.select(&selector).collect(),
        Err(_) => Vec::new(),
    };

    if regions.is_empty() {
        return document
            .select(&anchors)
            .filter_map(|a| a.value().attr("href"))
            .collect();
    }

    regions
        .into_iter()
        .flat_map(|region| region.select(&anchors).collect::<Vec<_>>())
        .filter_map(|a| a.value().attr("href"))
        .collect()
}

/// Resolves an href against the page URL and normalizes it.
///
/// Returns None for fragment-only, javascript: and mailto: links, and for
/// hrefs that cannot be resolved.
///
/// Examples (page = https://example.com/docs/intro):
///   "setup"            -> Some("https://example.com/docs/setup")
///   "/api?v=2#top"     -> Some("https://example.com/api")
///   "#install"         -> None
pub fn resolve_link(page_url: &Url, href: &str) -> Option<String> {
    let href = href.trim();
    if href.is_empty()
        || href.starts_with('#')
        || href.starts_with("javascript:")
        || href.starts_with("mailto:")
    {
        return None;
    }

    page_url.join(href).ok().map(|url| normalize_url(&url))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page() -> Url {
        Url::parse("https://example.com/docs/intro").unwrap()
    }

    fn scope<'a>(visited: &'a HashSet<String>, budget: usize) -> DiscoveryScope<'a> {
        DiscoveryScope {
            base_domain: "example.com",
            visited,
            budget,
        }
    }

    #[test]
    fn test_resolve_relative_link() {
        assert_eq!(
            resolve_link(&page(), "setup"),
            Some("https://example.com/docs/setup".to_string())
        );
        assert_eq!(
            resolve_link(&page(), "/api?v=2#top"),
            Some("https://example.com/api".to_string())
        );
    }

    #[test]
    fn test_skip_special_links() {
        assert_eq!(resolve_link(&page(), "#install"), None);
        assert_eq!(resolve_link(&page(), "javascript:void(0)"), None);
        assert_eq!(resolve_link(&page(), "mailto:docs@example.com"), None);
        assert_eq!(resolve_link(&page(), "   "), None);
    }

    #[test]
    fn test_prefers_content_regions() {
        let html = r#"
            <nav><a href="/nav-only">Nav</a></nav>
            <main>
                <a href="/docs/a">A</a>
                <a href="/docs/b">B</a>
            </main>
        "#;
        let visited = HashSet::new();
        let links = discover_links(html, &page(), &scope(&visited, 50));
        assert_eq!(
            links,
            vec!["https://example.com/docs/a", "https://example.com/docs/b"]
        );
    }

    #[test]
    fn test_falls_back_to_whole_document() {
        let html = r#"<div><a href="/docs/a">A</a></div><p><a href="b">B</a></p>"#;
        let visited = HashSet::new();
        let links = discover_links(html, &page(), &scope(&visited, 50));
        assert_eq!(
            links,
            vec!["https://example.com/docs/a", "https://example.com/docs/b"]
        );
    }

    #[test]
    fn test_filters_policy_visited_and_duplicates() {
        let html = r#"
            <article>
                <a href="/docs/a">A</a>
                <a href="/docs/a?tab=2">A again</a>
                <a href="/docs/a#part">A fragment</a>
                <a href="https://other.com/docs">Elsewhere</a>
                <a href="/blog/post">Blog</a>
                <a href="/docs/seen">Seen</a>
                <a href="/docs/b">B</a>
            </article>
        "#;
        let visited: HashSet<String> = ["https://example.com/docs/seen".to_string()].into();
        let links = discover_links(html, &page(), &scope(&visited, 50));
        assert_eq!(
            links,
            vec!["https://example.com/docs/a", "https://example.com/docs/b"]
        );
    }

    #[test]
    fn test_nested_regions_do_not_duplicate() {
        let html = r#"
            <main><article><div class="content">
                <a href="/docs/a">A</a>
            </div></article></main>
        "#;
        let visited = HashSet::new();
        let links = discover_links(html, &page(), &scope(&visited, 50));
        assert_eq!(links, vec!["https://example.com/docs/a"]);
    }

    #[test]
    fn test_nothing_returned_once_budget_is_spent() {
        let html = r#"<main><a href="/docs/a">A</a></main>"#;
        let visited: HashSet<String> = ["https://example.com/docs/intro".to_string()].into();
        let links = discover_links(html, &page(), &scope(&visited, 1));
        assert!(links.is_empty());
    }
}
