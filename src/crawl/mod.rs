//! Catalog page fetching and capability probing
//!
//! This module provides:
//! - A single-shot page fetch with browser-like headers and a fixed timeout
//! - Persisting the raw response body for offline inspection
//! - Static vs. client-rendered content detection

mod detection;

pub use detection::*;

use crate::config::ScrapeConfig;
use crate::error::{Error, Result};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, CONNECTION};
use reqwest::Client;
use scraper::Html;
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info};
use url::Url;

/// A fetched page
#[derive(Debug, Clone)]
pub struct FetchedPage {
    pub url: String,
    pub status: u16,
    pub content_type: Option<String>,
    pub body: String,
}

impl FetchedPage {
    /// Parse the body into a navigable document tree
    pub fn document(&self) -> Html {
        Html::parse_document(&self.body)
    }
}

/// Header set a desktop browser sends for a top-level navigation
pub fn browser_headers(config: &ScrapeConfig) -> Result<HeaderMap> {
    let mut headers = HeaderMap::new();
    headers.insert(
        ACCEPT,
        HeaderValue::from_static(
            "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,*/*;q=0.8",
        ),
    );
    headers.insert(
        ACCEPT_LANGUAGE,
        HeaderValue::from_str(&config.accept_language)
            .map_err(|e| Error::Config(format!("Invalid accept_language: {}", e)))?,
    );
    headers.insert(CONNECTION, HeaderValue::from_static("keep-alive"));
    Ok(headers)
}

/// Single-request page fetcher. No retries.
pub struct Fetcher {
    client: Client,
}

impl Fetcher {
    /// Create a new fetcher
    pub fn new(config: &ScrapeConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(&config.user_agent)
            .default_headers(browser_headers(config)?)
            .timeout(Duration::from_secs(config.timeout_secs))
            .gzip(true)
            .brotli(true)
            .redirect(reqwest::redirect::Policy::limited(5))
            .build()
            .map_err(|e| Error::Fetch(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client })
    }

    /// GET a page; any transport failure or non-2xx status is an error
    pub async fn fetch(&self, url: &str) -> Result<FetchedPage> {
        let parsed_url = Url::parse(url)?;
        debug!("Fetching: {}", parsed_url);

        let response = self.client.get(parsed_url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Fetch(format!("HTTP {}: {}", status, url)));
        }

        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|s| s.to_string());
        let final_url = response.url().to_string();

        let body = response.text().await?;
        info!("Fetched {} ({} bytes)", final_url, body.len());

        Ok(FetchedPage {
            url: final_url,
            status: status.as_u16(),
            content_type,
            body,
        })
    }
}

/// Write the raw body to the side file, replacing any previous copy
pub fn save_raw_page(path: &Path, body: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    std::fs::write(path, body)?;
    info!("Saved raw page to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_config() -> ScrapeConfig {
        ScrapeConfig {
            timeout_secs: 5,
            ..ScrapeConfig::default()
        }
    }

    #[tokio::test]
    async fn test_fetch_sends_browser_headers() {
        let mock_server = MockServer::start().await;
        let config = test_config();

        Mock::given(method("GET"))
            .and(path("/templates"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_raw(b"<html><body>ok</body></html>".to_vec(), "text/html"),
            )
            .expect(1)
            .mount(&mock_server)
            .await;

        let fetcher = Fetcher::new(&config).expect("fetcher should build");
        let page = fetcher
            .fetch(&format!("{}/templates", mock_server.uri()))
            .await
            .expect("fetch should succeed");

        assert_eq!(page.status, 200);
        assert_eq!(page.body, "<html><body>ok</body></html>");
        assert!(page.content_type.unwrap().starts_with("text/html"));

        // Header values contain commas, so compare whole values on the recorded request
        let requests = mock_server.received_requests().await.unwrap();
        assert_eq!(requests.len(), 1);
        let headers = &requests[0].headers;
        assert_eq!(
            headers.get("user-agent").unwrap(),
            &HeaderValue::from_str(&config.user_agent).unwrap()
        );
        assert_eq!(
            headers.get("accept-language").unwrap(),
            &HeaderValue::from_static("en-US,en;q=0.5")
        );
    }

    #[tokio::test]
    async fn test_fetch_non_success_is_network_error() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&mock_server)
            .await;

        let fetcher = Fetcher::new(&test_config()).unwrap();
        let err = fetcher
            .fetch(&format!("{}/templates", mock_server.uri()))
            .await
            .unwrap_err();

        assert!(err.is_network());
        assert!(err.to_string().contains("503"));
    }

    #[tokio::test]
    async fn test_fetch_connection_refused_is_network_error() {
        let fetcher = Fetcher::new(&test_config()).unwrap();
        let err = fetcher.fetch("http://127.0.0.1:1/").await.unwrap_err();
        assert!(err.is_network());
    }

    #[test]
    fn test_save_raw_page_overwrites() {
        let tmp = TempDir::new().unwrap();
        let file = tmp.path().join("pages").join("raw.html");

        save_raw_page(&file, "first").unwrap();
        save_raw_page(&file, "second").unwrap();

        assert_eq!(std::fs::read_to_string(&file).unwrap(), "second");
    }
}
