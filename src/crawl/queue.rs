// src/crawl/queue.rs
// =============================================================================
// This module walks a website, page by page, collecting every URL it visits.
//
// How it works:
// 1. Start with the seed link on the work stack (depth 0)
// 2. Take the next link; skip it if we already visited it
// 3. Mark it visited right away (before fetching it)
// 4. If the depth limit allows, fetch the page, extract its same-domain
//    links and push them as a new frame at depth + 1
// 5. Repeat until the stack is empty
//
// The stack holds frames (a list of links + their depth) instead of single
// URLs. This gives exactly the order of a recursive depth-first walk, without
// growing the call stack on deep sites.
//
// Errors are fatal: if any page fails to fetch, the whole crawl stops and
// the error is returned. Nothing is retried.
//
// Rust concepts:
// - Generics: Crawler<F> works with any type implementing Fetch
// - BTreeMap: Visited URLs, kept sorted by key
// - let-else: Early exit when a pattern doesn't match
// =============================================================================

use crate::crawl::fetch::Fetch;
use crate::error::{CrawlError, Result};
use crate::links::{self, Link};
use scraper::Html;
use std::collections::BTreeMap;
use tracing::{debug, info, trace};
use url::Url;

// Every URL visited during one crawl, mapped to the link that led us there
//
// Keys are absolute URLs (or the literal seed URL). It only grows.
pub type VisitedSet = BTreeMap<String, Link>;

// Settings fixed before the crawl starts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrawlConfig {
    /// Two-label domain, e.g. "example.com"
    pub domain: String,
    /// Origin used to resolve "/path" links, e.g. "https://www.example.com"
    pub root_url: String,
    /// Maximum hops from the seed page; None means no limit
    pub max_depth: Option<usize>,
}

impl CrawlConfig {
    // Can a link found at this depth be fetched and expanded?
    pub fn can_expand(&self, depth: usize) -> bool {
        match self.max_depth {
            None => true,
            Some(max) => depth < max,
        }
    }
}

// Links still to look at, all found at the same depth
struct Frame {
    links: std::vec::IntoIter<Link>,
    depth: usize,
}

pub struct Crawler<F> {
    fetcher: F,
    config: CrawlConfig,
}

impl<F: Fetch> Crawler<F> {
    pub fn new(fetcher: F, config: CrawlConfig) -> Self {
        Self { fetcher, config }
    }

    // Crawls the site starting from the seed link
    //
    // Parameters:
    //   seed: the first link; its href is stored as-is (never filtered)
    //
    // Returns: every visited URL, or the first error encountered
    pub async fn crawl(&self, seed: Link) -> Result<VisitedSet> {
        info!(
            seed = %seed.href,
            domain = %self.config.domain,
            max_depth = ?self.config.max_depth,
            "starting crawl"
        );

        let mut visited = VisitedSet::new();
        let mut stack = vec![Frame {
            links: vec![seed].into_iter(),
            depth: 0,
        }];

        while let Some(frame) = stack.last_mut() {
            let Some(link) = frame.links.next() else {
                stack.pop();
                continue;
            };
            let depth = frame.depth;

            if visited.contains_key(&link.href) {
                trace!(url = %link.href, "already visited");
                continue;
            }

            let url = link.href.clone();
            visited.insert(url.clone(), link);
            debug!(url = %url, depth, "visiting");

            if self.config.can_expand(depth) {
                let children = self.expand(&url).await?;
                stack.push(Frame {
                    links: children.into_iter(),
                    depth: depth + 1,
                });
            }
        }

        info!(pages = visited.len(), "crawl finished");
        Ok(visited)
    }

    // Fetches one page and returns its crawlable links
    async fn expand(&self, url: &str) -> Result<Vec<Link>> {
        let page = self.fetcher.fetch(url).await?;
        Ok(links_on_page(
            url,
            &page.body,
            &self.config.domain,
            &self.config.root_url,
        ))
    }
}

// Parses a page body and runs extract + filter on it
//
// Kept out of the async code: scraper's Html is not Send, so it must not
// live across an .await.
//
// html5ever accepts any text, so this never fails; a body that isn't HTML
// (a PDF, an image) simply yields no links.
fn links_on_page(url: &str, body: &str, domain: &str, root_url: &str) -> Vec<Link> {
    let document = Html::parse_document(body);
    let raw = links::extract_links(&document);
    let kept = links::process(raw, domain, root_url);

    debug!(url, found = kept.len(), "links extracted");
    kept
}

// Finds the root URL used to resolve "/path" links
//
// The seed is fetched once and the origin of the final URL (after redirects)
// is used, so "https://example.com" redirecting to "https://www.example.com/"
// gives "https://www.example.com".
pub async fn resolve_root<F: Fetch>(fetcher: &F, seed: &str) -> Result<String> {
    let page = fetcher.fetch(seed).await?;

    let final_url = Url::parse(&page.final_url)
        .map_err(|e| CrawlError::InvalidUrl(format!("{}: {}", page.final_url, e)))?;

    let origin = final_url.origin();
    if !origin.is_tuple() {
        return Err(CrawlError::InvalidUrl(format!(
            "{}: URL has no origin",
            page.final_url
        )));
    }

    let root_url = origin.ascii_serialization();
    info!(seed, root_url = %root_url, "resolved root URL");
    Ok(root_url)
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why mark a URL visited BEFORE fetching it?
//    - The same URL can show up on many pages
//    - Marking it first means it is fetched at most once, even if the fetch
//      is skipped because of the depth limit
//
// 2. Why a stack of frames instead of recursion?
//    - async recursion needs boxing, and deep sites would grow the stack
//    - Each frame is an iterator over one page's links, so popping an empty
//      frame is the same as "returning" from a recursive call
//
// 3. What is `let Some(x) = ... else { ... };`?
//    - let-else: bind x if the pattern matches, otherwise run the else block
//    - The else block must leave the scope (continue, return, break)
// -----------------------------------------------------------------------------
