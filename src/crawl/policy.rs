// src/crawl/policy.rs
// =============================================================================
// Decides which URLs the crawler is allowed to visit.
//
// A URL is eligible when:
// 1. Its host (and port, if any) is exactly the crawl's base domain
// 2. It contains none of the excluded patterns (login pages, downloads,
//    legal boilerplate, binary files, non-HTTP schemes, fragments)
//
// Everything here is a pure function of its inputs, so it can be tested
// with a plain table of (url, expected) pairs.
// =============================================================================

use url::{Position, Url};

/// Substrings that disqualify a URL, matched against the lower-cased URL
pub const EXCLUDE_PATTERNS: &[&str] = &[
    // Non-documentation sections
    "/search",
    "/login",
    "/register",
    "/download",
    "/community",
    "/news",
    "/events",
    "/jobs",
    "/blog",
    "/forum",
    "/support",
    // Binary and archive files
    ".pdf",
    ".zip",
    ".tar.gz",
    ".exe",
    ".dmg",
    // Non-HTTP schemes and fragments
    "javascript:",
    "mailto:",
    "#",
    // Legal boilerplate
    "/privacy",
    "/terms",
    "/cookies",
    "/legal",
];

/// Returns true if `candidate` should be crawled as part of `base_domain`.
///
/// `base_domain` is compared exactly (host plus explicit port), so
/// `docs.example.com` is NOT part of `example.com`.
///
/// Example:
///   is_documentation_url("https://example.com/guide", "example.com") -> true
///   is_documentation_url("https://example.com/blog/x", "example.com") -> false
pub fn is_documentation_url(candidate: &str, base_domain: &str) -> bool {
    let lowered = candidate.to_lowercase();
    if EXCLUDE_PATTERNS
        .iter()
        .any(|pattern| lowered.contains(pattern))
    {
        return false;
    }

    match Url::parse(candidate) {
        Ok(parsed) => authority(&parsed).as_deref() == Some(base_domain),
        Err(_) => false,
    }
}

/// The host of a URL plus its port when it is not the scheme default.
///
/// This is the "domain" a crawl is restricted to.
///   https://example.com/docs      -> "example.com"
///   http://127.0.0.1:8080/docs    -> "127.0.0.1:8080"
pub fn authority(url: &Url) -> Option<String> {
    let host = url.host_str()?;
    Some(match url.port() {
        Some(port) => format!("{}:{}", host, port),
        None => host.to_string(),
    })
}

/// Drops the query string and fragment, keeping scheme + host + path.
///
/// Two links that only differ in `?query` or `#fragment` normalize to the
/// same string and are therefore crawled once.
pub fn normalize_url(url: &Url) -> String {
    url[..Position::AfterPath].to_string()
}

/// Parses and normalizes a URL string, if it parses
pub fn normalize_str(url: &str) -> Option<String> {
    Url::parse(url).ok().map(|parsed| normalize_url(&parsed))
}
