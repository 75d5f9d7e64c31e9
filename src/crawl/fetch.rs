// src/crawl/fetch.rs
// =============================================================================
// Downloads pages.
//
// The scheduler only talks to the `PageFetcher` trait, so tests can hand it
// an in-memory site instead of a real network. `HttpFetcher` is the real
// implementation: one reqwest Client (one connection pool) for the whole
// crawl, a fixed timeout and a browser-like user agent.
//
// Any failure (bad URL, transport, timeout, non-2xx) comes back as a
// FetchError. The caller decides whether that is fatal; for the crawl loop
// it never is.
// =============================================================================

use async_trait::async_trait;
use reqwest::Client;
use url::Url;

use crate::config::CrawlConfig;
use crate::error::{CrawlError, FetchError};

/// A successfully downloaded page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedPage {
    /// Raw HTML body
    pub html: String,
    /// URL after redirects
    pub final_url: String,
}

/// Anything that can turn a URL into HTML
#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<FetchedPage, FetchError>;
}

/// reqwest-backed fetcher
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Builds the shared client from the crawl settings
    pub fn new(config: &CrawlConfig) -> Result<Self, CrawlError> {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .user_agent(config.user_agent.as_str())
            .redirect(reqwest::redirect::Policy::limited(10))
            .build()?;

        Ok(HttpFetcher { client })
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<FetchedPage, FetchError> {
        let parsed = Url::parse(url).map_err(|_| FetchError::InvalidUrl {
            url: url.to_string(),
        })?;

        let response = self
            .client
            .get(parsed)
            .send()
            .await
            .map_err(|e| FetchError::from_reqwest(url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let final_url = response.url().to_string();
        let html = response
            .text()
            .await
            .map_err(|e| FetchError::from_reqwest(url, e))?;

        Ok(FetchedPage { html, final_url })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_USER_AGENT;
    use mockito::Server;
    use std::time::Duration;
    use tokio::net::TcpListener;

    fn fetcher() -> HttpFetcher {
        HttpFetcher::new(&CrawlConfig::default()).unwrap()
    }

    #[tokio::test]
    async fn test_fetch_success_sends_user_agent() {
        let mut server = Server::new_async().await;
        let m = server
            .mock("GET", "/docs/intro")
            .match_header("user-agent", DEFAULT_USER_AGENT)
            .with_status(200)
            .with_header("content-type", "text/html")
            .with_body("<html><body>hello</body></html>")
            .expect(1)
            .create_async()
            .await;

        let url = format!("{}/docs/intro", server.url());
        let page = fetcher().fetch(&url).await.unwrap();

        assert_eq!(page.html, "<html><body>hello</body></html>");
        assert_eq!(page.final_url, url);
        m.assert_async().await;
    }

    #[tokio::test]
    async fn test_fetch_non_success_status_is_an_error() {
        let mut server = Server::new_async().await;
        let m = server
            .mock("GET", "/missing")
            .with_status(404)
            .create_async()
            .await;

        let url = format!("{}/missing", server.url());
        let err = fetcher().fetch(&url).await.unwrap_err();

        assert!(matches!(err, FetchError::Status { status: 404, .. }));
        m.assert_async().await;
    }

    #[tokio::test]
    async fn test_fetch_follows_redirects() {
        let mut server = Server::new_async().await;
        let _old = server
            .mock("GET", "/old")
            .with_status(301)
            .with_header("location", "/new")
            .create_async()
            .await;
        let _new = server
            .mock("GET", "/new")
            .with_status(200)
            .with_body("moved here")
            .create_async()
            .await;

        let page = fetcher()
            .fetch(&format!("{}/old", server.url()))
            .await
            .unwrap();

        assert_eq!(page.html, "moved here");
        assert_eq!(page.final_url, format!("{}/new", server.url()));
    }

    #[tokio::test]
    async fn test_fetch_connection_refused_is_an_error() {
        let config = CrawlConfig::builder()
            .request_timeout(Duration::from_secs(2))
            .build();
        let fetcher = HttpFetcher::new(&config).unwrap();

        // Port 1 is reserved and nothing listens there
        let err = fetcher.fetch("http://127.0.0.1:1/").await.unwrap_err();
        assert!(matches!(
            err,
            FetchError::Transport { .. } | FetchError::Timeout { .. }
        ));
    }

    #[tokio::test]
    async fn test_fetch_times_out_on_silent_server() {
        // Accepts the connection, then never answers
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let mut held = Vec::new();
            while let Ok((socket, _)) = listener.accept().await {
                held.push(socket);
            }
        });

        let config = CrawlConfig::builder()
            .request_timeout(Duration::from_millis(200))
            .build();
        let fetcher = HttpFetcher::new(&config).unwrap();

        let url = format!("http://{}/", addr);
        let err = fetcher.fetch(&url).await.unwrap_err();
        match err {
            FetchError::Timeout { url: failed } => assert_eq!(failed, url),
            other => panic!("expected a timeout, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_fetch_rejects_unparseable_url() {
        let err = fetcher().fetch("not a url").await.unwrap_err();
        assert!(matches!(err, FetchError::InvalidUrl { .. }));
    }
}
