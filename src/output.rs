// src/output.rs
// =============================================================================
// This module prints or saves the URLs found by the crawler.
//
// Three formats:
// - Plain listing: a count line, then one URL per line (stdout)
// - JSON listing: every link with its text, pretty-printed (stdout)
// - Sitemap XML: the standard sitemaps.org format, written to a file
//
// Every format lists URLs sorted lexicographically. The VisitedSet is a
// BTreeMap, so iterating it already gives that order.
//
// Rust concepts:
// - impl Write: Functions that write to stdout, a file or a Vec<u8> in tests
// - BufWriter: Batches many small writes into few system calls
// - match on char: escape_xml builds the escaped text in one pass
// =============================================================================

use crate::crawl::VisitedSet;
use crate::error::Result;
use crate::links::Link;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::info;

const SITEMAP_NAMESPACE: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";

// Writes the whole visited set as a sitemap file
//
// The file is only created here, after the crawl succeeded, so a failed
// crawl never leaves a partial sitemap behind.
pub fn write_sitemap<P: AsRef<Path>>(path: P, visited: &VisitedSet) -> Result<usize> {
    let path = path.as_ref();
    let file = File::create(path)?;

    let count = write_sitemap_to(BufWriter::new(file), visited)?;
    info!(path = %path.display(), urls = count, "sitemap written");
    Ok(count)
}

// Writes the sitemap document: one <url> entry per visited URL
//
// Returns: how many <url> entries were written
pub fn write_sitemap_to<W: Write>(mut writer: W, visited: &VisitedSet) -> Result<usize> {
    writeln!(writer, r#"<?xml version="1.0" encoding="UTF-8"?>"#)?;
    writeln!(writer, r#"<urlset xmlns="{}">"#, SITEMAP_NAMESPACE)?;

    for url in visited.keys() {
        writeln!(writer, "  <url>\n    <loc>{}</loc>\n  </url>", escape_xml(url))?;
    }

    writeln!(writer, "</urlset>")?;
    writer.flush()?;
    Ok(visited.len())
}

// Writes the plain listing: a count line, then one URL per line
pub fn write_listing<W: Write>(mut writer: W, visited: &VisitedSet) -> Result<()> {
    writeln!(writer, "Number of links : {}", visited.len())?;
    for url in visited.keys() {
        writeln!(writer, "{}", url)?;
    }
    writer.flush()?;
    Ok(())
}

// Writes every link (URL + anchor text) as a pretty JSON array
pub fn write_json<W: Write>(mut writer: W, visited: &VisitedSet) -> Result<()> {
    let entries: Vec<Link> = visited
        .iter()
        .map(|(url, link)| Link::new(url.clone(), link.text.clone()))
        .collect();

    serde_json::to_writer_pretty(&mut writer, &entries).map_err(std::io::Error::from)?;
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}

// Escapes the five characters XML gives special meaning to
fn escape_xml(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    fn visited() -> VisitedSet {
        let mut visited = VisitedSet::new();
        for (url, text) in [
            ("https://example.com/b", "B"),
            ("https://example.com/", "Root link"),
            ("https://example.com/a?x=1&y=2", "A"),
        ] {
            visited.insert(url.to_string(), Link::new(url, text));
        }
        visited
    }

    #[test]
    fn test_write_sitemap_file() {
        let temp = NamedTempFile::new().unwrap();

        let count = write_sitemap(temp.path(), &visited()).unwrap();
        assert_eq!(count, 3);

        let content = std::fs::read_to_string(temp.path()).unwrap();
        let expected = r#"<?xml version="1.0" encoding="UTF-8"?>
<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
  <url>
    <loc>https://example.com/</loc>
  </url>
  <url>
    <loc>https://example.com/a?x=1&amp;y=2</loc>
  </url>
  <url>
    <loc>https://example.com/b</loc>
  </url>
</urlset>
"#;
        assert_eq!(content, expected);
    }

    #[test]
    fn test_empty_sitemap() {
        let mut buf = Vec::new();
        let count = write_sitemap_to(&mut buf, &VisitedSet::new()).unwrap();

        assert_eq!(count, 0);
        let content = String::from_utf8(buf).unwrap();
        assert!(content.contains("<urlset"));
        assert!(content.ends_with("</urlset>\n"));
        assert!(!content.contains("<url>"));
    }

    #[test]
    fn test_sitemap_to_missing_directory_fails() {
        let result = write_sitemap("/nonexistent-dir/sitemap.xml", &visited());
        assert!(matches!(result, Err(crate::error::CrawlError::Io(_))));
    }

    #[test]
    fn test_write_listing() {
        let mut buf = Vec::new();
        write_listing(&mut buf, &visited()).unwrap();

        let content = String::from_utf8(buf).unwrap();
        assert_eq!(
            content,
            "Number of links : 3\n\
             https://example.com/\n\
             https://example.com/a?x=1&y=2\n\
             https://example.com/b\n"
        );
    }

    #[test]
    fn test_write_json() {
        let mut buf = Vec::new();
        write_json(&mut buf, &visited()).unwrap();

        let links: Vec<Link> = serde_json::from_slice(&buf).unwrap();
        assert_eq!(links.len(), 3);
        assert_eq!(links[0], Link::new("https://example.com/", "Root link"));
        assert_eq!(links[2].href, "https://example.com/b");
    }

    #[test]
    fn test_escape_xml() {
        assert_eq!(escape_xml("a&b<c>\"d'"), "a&amp;b&lt;c&gt;&quot;d&apos;");
    }
}
