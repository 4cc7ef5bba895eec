//! HTTP fetcher: client construction and page retrieval
//!
//! All traversal suspension points go through [`fetch_page`]; everything
//! else in the crawl is synchronous. Fetch failures are terminal for the
//! run, so there is no retry or error classification beyond the transport
//! vs HTTP-status split.

use crate::config::CrawlerConfig;
use crate::{HarvestError, Result};
use reqwest::Client;
use std::time::Duration;

/// Builds the HTTP client shared by the whole crawl
///
/// The client is the only shared resource of the traversal; it must support
/// many concurrent outstanding requests, which reqwest's pooled client does.
pub fn build_http_client(config: &CrawlerConfig) -> std::result::Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(&config.user_agent)
        .timeout(Duration::from_secs(config.request_timeout_secs))
        .connect_timeout(Duration::from_secs(10))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches a catalog page and returns its raw markup
///
/// # Errors
///
/// * [`HarvestError::Transport`] - network/DNS failure or timeout
/// * [`HarvestError::HttpStatus`] - non-success status code
pub async fn fetch_page(client: &Client, url: &str) -> Result<String> {
    let response = client
        .get(url)
        .send()
        .await
        .map_err(|source| HarvestError::Transport {
            url: url.to_string(),
            source,
        })?;

    let status = response.status();
    if !status.is_success() {
        return Err(HarvestError::HttpStatus {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    response
        .text()
        .await
        .map_err(|source| HarvestError::Transport {
            url: url.to_string(),
            source,
        })
}
