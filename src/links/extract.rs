// src/links/extract.rs
// =============================================================================
// This module finds the anchor links (<a> elements) in an HTML document.
//
// We use the `scraper` crate which:
// - Parses HTML into a DOM tree (nodes with children)
// - Is built on html5ever (Mozilla's HTML parser)
//
// Instead of a CSS selector we walk the tree ourselves, depth-first, so we
// control exactly which nodes are visited:
// - Every <a> element becomes one Link (href + all of its text)
// - We do NOT look inside an <a> for more anchors
// - Every other node (text, comment, doctype, ...) is just walked through
//
// Rust concepts:
// - Structs with derives: Our Link value type
// - Enums and match: scraper::Node tells us what kind of node we are on
// - Vec as a stack: An explicit stack instead of recursion
// =============================================================================

use scraper::{ElementRef, Html, Node};
use serde::{Deserialize, Serialize};
use tracing::trace;

// One hyperlink found in a page
//
// href is the raw attribute value, exactly as written in the HTML
// (it is only normalized later, in filter.rs).
// text is all the text inside the anchor, in document order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    pub href: String,
    pub text: String,
}

impl Link {
    pub fn new(href: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            href: href.into(),
            text: text.into(),
        }
    }
}

// Extracts every anchor link from a parsed document
//
// Parameters:
//   document: the parsed HTML tree (borrowed, we only read it)
//
// Returns: Vec<Link> in the order the anchors appear in the document
//
// Example:
//   <p><a href="/x">foo<b>bar</b></a></p>
//   -> [Link { href: "/x", text: "foobar" }]
pub fn extract_links(document: &Html) -> Vec<Link> {
    let mut links = Vec::new();

    // Pre-order walk: pop a node, handle it, then push its children
    let mut stack = vec![document.tree.root()];

    while let Some(node) = stack.pop() {
        log_node(node.value());

        if let Some(element) = ElementRef::wrap(node) {
            if element.value().name() == "a" {
                links.push(anchor_link(element));
                // Anchors don't nest, so the walk stops here
                continue;
            }
        }

        // Push children in reverse so the first child is popped first
        stack.extend(node.children().rev());
    }

    links
}

// Parses an HTML string and extracts its links in one step
pub fn extract_links_from_html(html: &str) -> Vec<Link> {
    let document = Html::parse_document(html);
    extract_links(&document)
}

// Builds a Link from an <a> element
//
// The href is the first href attribute on the element (empty if missing),
// the text is every text node below the element joined together.
fn anchor_link(element: ElementRef<'_>) -> Link {
    let href = element
        .value()
        .attrs()
        .find(|(name, _)| *name == "href")
        .map(|(_, value)| value)
        .unwrap_or_default();

    let text: String = element.text().collect();

    Link::new(href, text)
}

// Logs what kind of node the walk is on (visible with -vv or RUST_LOG=trace)
fn log_node(node: &Node) {
    match node {
        Node::Element(element) => trace!(
            tag = element.name(),
            attrs = ?element.attrs().collect::<Vec<_>>(),
            "element node"
        ),
        Node::Text(text) => trace!(data = &**text, "text node"),
        Node::Document => trace!("document node"),
        Node::Comment(comment) => trace!(data = &**comment, "comment node"),
        Node::Doctype(doctype) => trace!(name = doctype.name(), "doctype node"),
        other => trace!(node = ?other, "other node"),
    }
}
