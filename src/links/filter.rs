// src/links/filter.rs
// =============================================================================
// This module turns the raw links of one page into crawlable URLs.
//
// Three steps, always in this order:
// 1. Filter: keep root-relative links ("/about") and absolute links on our
//    domain ("https://example.com/about"), drop everything else
// 2. Normalize: "/about" becomes root_url + "/about"
// 3. Deduplicate: sort by href and drop repeated hrefs
//
// The domain check is a prefix check on "scheme://domain/", NOT a substring
// check, so "https://example.com.evil.com/" is rejected.
//
// Rust concepts:
// - Iterator adapters: filter/map/collect
// - Vec::dedup_by: Removes consecutive duplicates in place
// =============================================================================

use crate::error::{CrawlError, Result};
use crate::links::Link;
use url::Url;

// Schemes we accept in front of an absolute same-domain link
const SCHEMES: [&str; 2] = ["https://", "http://"];

// Filters, normalizes and deduplicates the links found on one page
//
// Parameters:
//   links: raw links straight from the extractor (we take ownership)
//   domain: two-label domain we crawl, e.g. "example.com"
//   root_url: where root-relative links are resolved, e.g. "https://www.example.com"
//
// Returns: same-domain absolute links, sorted by href, no repeated hrefs
pub fn process(links: Vec<Link>, domain: &str, root_url: &str) -> Vec<Link> {
    let normalized = links
        .into_iter()
        .filter(|link| is_same_domain(link.href.trim(), domain))
        .map(|link| normalize(link, root_url))
        .collect();

    purge_twins(normalized)
}

// Checks whether an href points into our domain
//
// Examples with domain "example.com":
//   "/about"                       -> true
//   "https://example.com/about"    -> true
//   "http://example.com/"          -> true
//   "https://notexample.com/page"  -> false
//   "https://example.com.evil.com" -> false
//   "/"                            -> false (too short)
pub fn is_same_domain(href: &str, domain: &str) -> bool {
    if href.len() < 2 {
        return false;
    }

    if href.starts_with('/') {
        return true;
    }

    let domain_prefix = format!("{}/", domain);
    SCHEMES.iter().any(|scheme| {
        href.strip_prefix(scheme)
            .is_some_and(|rest| rest.starts_with(&domain_prefix))
    })
}

// Resolves a root-relative link against the root URL
//
// Surrounding whitespace is dropped in both cases, so "/x" and
// "https://example.com/x " end up as the same URL.
fn normalize(link: Link, root_url: &str) -> Link {
    let href = link.href.trim();

    let href = if href.starts_with('/') {
        format!("{}{}", root_url, href)
    } else {
        href.to_string()
    };

    Link {
        href,
        text: link.text,
    }
}

// Sorts links by href and keeps one link per distinct href
//
// The sort is stable, so the survivor is the first of its twins in page order.
fn purge_twins(mut links: Vec<Link>) -> Vec<Link> {
    links.sort_by(|a, b| a.href.cmp(&b.href));
    links.dedup_by(|a, b| a.href == b.href);
    links
}

// Derives the crawl domain from the seed URL
//
// Takes the last two labels of the host name:
//   "https://www.example.com/start" -> "example.com"
//   "https://example.com"           -> "example.com"
//
// Multi-part public suffixes are not understood, so
// "https://www.example.co.uk" gives "co.uk".
pub fn extract_domain(seed: &str) -> Result<String> {
    let url = Url::parse(seed).map_err(|e| CrawlError::InvalidUrl(format!("{}: {}", seed, e)))?;

    let host = url
        .host_str()
        .ok_or_else(|| CrawlError::InvalidUrl(format!("{}: URL has no host", seed)))?;

    let labels: Vec<&str> = host.split('.').collect();
    let start = labels.len().saturating_sub(2);

    Ok(labels[start..].join("."))
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why sort before dedup?
//    - Vec::dedup_by only removes duplicates that sit next to each other
//    - After sorting by href, all twins are neighbours
//
// 2. What does strip_prefix return?
//    - Some(rest) if the string starts with the prefix, None otherwise
//    - is_some_and(...) then checks the rest without unwrapping
//
// 3. Why does process() take Vec<Link> by value?
//    - We rewrite hrefs and drop links, so owning the Vec avoids clones
// -----------------------------------------------------------------------------
