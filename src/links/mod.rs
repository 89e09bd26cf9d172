// src/links/mod.rs
// =============================================================================
// This module finds links in HTML and decides which ones we crawl.
//
// Submodules:
// - extract: Walks the HTML tree and collects every <a> link
// - filter: Keeps same-domain links, makes them absolute, removes duplicates
//
// Rust concepts:
// - pub use: Re-export items so callers can write `links::process()`
// =============================================================================

mod extract;
mod filter;

pub use extract::{extract_links, extract_links_from_html, Link};
pub use filter::{extract_domain, process};
