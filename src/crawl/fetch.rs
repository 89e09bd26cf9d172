// src/crawl/fetch.rs
// =============================================================================
// This module downloads pages over HTTP.
//
// Key functionality:
// - The Fetch trait: "give me the page behind this URL"
// - HttpFetcher: the real implementation, built on reqwest
// - Redirects are followed, and we remember the URL we ended up on
//
// The crawler only talks to the Fetch trait, so tests can hand it a fake
// website that lives in memory.
//
// Rust concepts:
// - Traits: Describe behaviour that several types can share
// - impl Future in traits: An async method on a trait
// - Result<T, E>: Every failure becomes a CrawlError
// =============================================================================

use crate::error::{CrawlError, Result};
use reqwest::Client;
use std::future::Future;
use std::time::Duration;
use tracing::{debug, info};

// A downloaded page
#[derive(Debug, Clone)]
pub struct Page {
    /// Response body, decoded to text using the charset the server sent
    /// (UTF-8 when none); undecodable bytes become U+FFFD
    pub body: String,
    /// The URL we ended up on after following redirects
    pub final_url: String,
}

// Anything that can download a page
//
// Implementations must return an error for transport failures and for
// non-success HTTP statuses; the crawler never retries.
pub trait Fetch {
    fn fetch(&self, url: &str) -> impl Future<Output = Result<Page>> + Send;
}

// Fetches pages with a reqwest HTTP client
//
// We keep one client for the whole crawl (connection pooling).
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    // Creates a fetcher
    //
    // Parameters:
    //   timeout: optional limit for each request; None keeps reqwest's default
    //            (no timeout at all)
    pub fn new(timeout: Option<Duration>) -> Result<Self> {
        let mut builder = Client::builder()
            .user_agent(concat!("sitemap-crawler/", env!("CARGO_PKG_VERSION")))
            .redirect(reqwest::redirect::Policy::limited(10)); // Follow up to 10 redirects

        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        let client = builder.build().map_err(CrawlError::Client)?;

        Ok(Self { client })
    }
}

impl Fetch for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<Page> {
        info!(url, "fetching page");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|source| CrawlError::Fetch {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(CrawlError::Status {
                url: url.to_string(),
                status,
            });
        }

        // response.url() is the last URL in the redirect chain
        let final_url = response.url().to_string();

        // text() honours the Content-Type charset and never rejects bytes,
        // so a PDF or a windows-1252 page still reaches the HTML parser
        let body = response.text().await.map_err(|source| CrawlError::Fetch {
            url: url.to_string(),
            source,
        })?;

        debug!(url, final_url = %final_url, bytes = body.len(), "page fetched");

        Ok(Page { body, final_url })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::{
        matchers::{method, path},
        Mock, MockServer, ResponseTemplate,
    };

    #[tokio::test]
    async fn test_fetch_returns_body() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/"))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("content-type", "text/html")
                    .set_body_bytes(b"<html><body>Hello</body></html>".as_slice()),
            )
            .mount(&mock_server)
            .await;

        let fetcher = HttpFetcher::new(None).unwrap();
        let page = fetcher.fetch(&mock_server.uri()).await.unwrap();

        assert_eq!(page.body, "<html><body>Hello</body></html>");
        assert_eq!(page.final_url, format!("{}/", mock_server.uri()));
    }

    #[tokio::test]
    async fn test_fetch_follows_redirects() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/start"))
            .respond_with(
                ResponseTemplate::new(301)
                    .insert_header("location", format!("{}/landing", mock_server.uri()).as_str()),
            )
            .mount(&mock_server)
            .await;

        Mock::given(method("GET"))
            .and(path("/landing"))
            .respond_with(ResponseTemplate::new(200).set_body_string("landed"))
            .mount(&mock_server)
            .await;

        let fetcher = HttpFetcher::new(None).unwrap();
        let page = fetcher
            .fetch(&format!("{}/start", mock_server.uri()))
            .await
            .unwrap();

        assert_eq!(page.final_url, format!("{}/landing", mock_server.uri()));
        assert_eq!(page.body, "landed");
    }

    #[tokio::test]
    async fn test_fetch_not_found_is_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/missing"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&mock_server)
            .await;

        let fetcher = HttpFetcher::new(None).unwrap();
        let result = fetcher
            .fetch(&format!("{}/missing", mock_server.uri()))
            .await;

        match result {
            Err(CrawlError::Status { status, .. }) => assert_eq!(status.as_u16(), 404),
            other => panic!("expected a status error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_fetch_decodes_declared_charset() {
        let mock_server = MockServer::start().await;

        // "Café" in windows-1252: 0xE9 is not valid UTF-8 on its own
        Mock::given(method("GET"))
            .and(path("/latin"))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("content-type", "text/html; charset=windows-1252")
                    .set_body_bytes(b"<p>Caf\xe9</p>".as_slice()),
            )
            .mount(&mock_server)
            .await;

        let fetcher = HttpFetcher::new(None).unwrap();
        let page = fetcher
            .fetch(&format!("{}/latin", mock_server.uri()))
            .await
            .unwrap();

        assert_eq!(page.body, "<p>Caf\u{e9}</p>");
    }

    #[tokio::test]
    async fn test_fetch_binary_body_is_not_an_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/brochure.pdf"))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("content-type", "application/pdf")
                    .set_body_bytes(b"%PDF-1.4\n\xe2\xe3\xcf\xd3".as_slice()),
            )
            .mount(&mock_server)
            .await;

        let fetcher = HttpFetcher::new(None).unwrap();
        let page = fetcher
            .fetch(&format!("{}/brochure.pdf", mock_server.uri()))
            .await
            .unwrap();

        assert!(page.body.starts_with("%PDF-1.4\n"));
        assert!(page.body.contains('\u{fffd}'));
    }

    #[tokio::test]
    async fn test_fetch_connection_refused_is_error() {
        // Nothing listens on port 9 (discard) on a test machine
        let fetcher = HttpFetcher::new(Some(Duration::from_secs(5))).unwrap();
        let result = fetcher.fetch("http://127.0.0.1:9/").await;

        assert!(matches!(result, Err(CrawlError::Fetch { .. })));
    }
}
