//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the crawler:
//! - Building the HTTP client with a proper user agent string
//! - GET requests for listing and profile pages
//! - Error classification (transport failure vs. non-success status)
//!
//! There is no retry: any failure is returned to the caller, which aborts
//! the run.

use crate::config::UserAgentConfig;
use reqwest::Client;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use thiserror::Error;
use url::Url;

/// Errors that can occur while fetching a page
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Request to {url} failed: {source}")]
    Transport { url: String, source: reqwest::Error },

    #[error("HTTP {status} from {url}")]
    Status { url: String, status: u16 },
}

impl FetchError {
    /// The URL whose fetch failed
    pub fn url(&self) -> &str {
        match self {
            Self::Transport { url, .. } | Self::Status { url, .. } => url,
        }
    }
}

/// Builds an HTTP client with proper configuration
///
/// # Arguments
///
/// * `config` - The user agent configuration
///
/// # Example
///
/// ```no_run
/// use quote_crawler::config::UserAgentConfig;
/// use quote_crawler::crawler::build_http_client;
///
/// let client = build_http_client(&UserAgentConfig::default()).unwrap();
/// ```
pub fn build_http_client(config: &UserAgentConfig) -> Result<Client, reqwest::Error> {
    // Format: CrawlerName/Version (+ContactURL)
    let user_agent = format!(
        "{}/{} (+{})",
        config.crawler_name, config.crawler_version, config.contact_url
    );

    Client::builder()
        .user_agent(user_agent)
        .timeout(Duration::from_secs(30))
        .connect_timeout(Duration::from_secs(10))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Sequential page fetcher
///
/// Wraps the HTTP client and counts the requests it issues.
#[derive(Debug)]
pub struct Fetcher {
    client: Client,
    requests: AtomicU64,
}

impl Fetcher {
    /// Creates a fetcher over an existing client
    pub fn new(client: Client) -> Self {
        Self {
            client,
            requests: AtomicU64::new(0),
        }
    }

    /// Creates a fetcher with a client built from the user agent config
    pub fn from_config(config: &UserAgentConfig) -> Result<Self, reqwest::Error> {
        Ok(Self::new(build_http_client(config)?))
    }

    /// Fetches `url` and returns the response body
    ///
    /// # Returns
    ///
    /// * `Ok(String)` - Body of a 2xx response
    /// * `Err(FetchError::Status)` - The server answered with a non-success status
    /// * `Err(FetchError::Transport)` - Connection, timeout, or body read failure
    pub async fn get(&self, url: &Url) -> Result<String, FetchError> {
        self.requests.fetch_add(1, Ordering::Relaxed);
        tracing::trace!("GET {}", url);

        let response = self
            .client
            .get(url.as_str())
            .send()
            .await
            .map_err(|source| FetchError::Transport {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        response.text().await.map_err(|source| FetchError::Transport {
            url: url.to_string(),
            source,
        })
    }

    /// Number of requests issued so far, successful or not
    pub fn requests(&self) -> u64 {
        self.requests.load(Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_http_client() {
        let client = build_http_client(&UserAgentConfig::default());
        assert!(client.is_ok());
    }

    #[test]
    fn test_new_fetcher_has_no_requests() {
        let fetcher = Fetcher::from_config(&UserAgentConfig::default()).unwrap();
        assert_eq!(fetcher.requests(), 0);
    }

    #[tokio::test]
    async fn test_connection_refused_is_transport_error() {
        let fetcher = Fetcher::from_config(&UserAgentConfig::default()).unwrap();
        // Port 9 (discard) is not expected to be listening on loopback
        let url = Url::parse("http://127.0.0.1:9/").unwrap();

        let result = fetcher.get(&url).await;
        match result {
            Err(FetchError::Transport { url, .. }) => assert_eq!(url, "http://127.0.0.1:9/"),
            other => panic!("expected transport error, got {:?}", other),
        }
        assert_eq!(fetcher.requests(), 1);
    }
}
