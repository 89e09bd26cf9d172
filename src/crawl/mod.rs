// src/crawl/mod.rs
// =============================================================================
// This module handles website crawling.
//
// Features:
// - Depth-first crawling starting from a seed URL
// - Same-domain restriction (we never leave the target website)
// - Optional depth limit
// - Each URL is fetched at most once
//
// Submodules:
// - fetch: Downloads pages (the Fetch trait and its reqwest implementation)
// - queue: The crawl loop itself
//
// Rust concepts:
// - Async programming: HTTP requests are awaited one at a time
// - Collections: BTreeMap for visited URLs, Vec as a work stack
// =============================================================================

mod fetch;
mod queue;

pub use fetch::HttpFetcher;
pub use queue::{resolve_root, CrawlConfig, Crawler, VisitedSet};
