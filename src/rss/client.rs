//! HTTP client creation and request handling for news feeds.

use anyhow::Result;
use reqwest::{cookie::Jar, header};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;
use tracing::{debug, warn};

use crate::TARGET_WEB_REQUEST;

const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Create the shared HTTP client used for feeds, translation and speech requests.
pub fn create_http_client() -> Result<reqwest::Client> {
    let cookie_store = Jar::default();
    reqwest::Client::builder()
        .cookie_store(true)
        .cookie_provider(Arc::new(cookie_store))
        .gzip(true)
        .user_agent(USER_AGENT)
        .redirect(reqwest::redirect::Policy::default())
        .build()
        .map_err(|e| anyhow::anyhow!("Failed to build HTTP client: {}", e))
}

/// Fetch a feed document, failing on timeout or a non-success status.
pub async fn fetch_feed(client: &reqwest::Client, url: &str, limit: Duration) -> Result<String> {
    debug!(target: TARGET_WEB_REQUEST, "Requesting feed {}", url);

    let request = client
        .get(url)
        .header(
            header::ACCEPT,
            "application/rss+xml, application/atom+xml, application/xml, text/xml, */*;q=0.9",
        )
        .send();

    let response = match timeout(limit, request).await {
        Ok(Ok(resp)) => resp,
        Ok(Err(err)) => {
            warn!(target: TARGET_WEB_REQUEST, "Request to {} failed: {}", url, err);
            return Err(anyhow::anyhow!("Request failed: {}", err));
        }
        Err(_) => {
            warn!(target: TARGET_WEB_REQUEST, "Request to {} timed out", url);
            return Err(anyhow::anyhow!(
                "Request timed out after {} seconds",
                limit.as_secs()
            ));
        }
    };

    if !response.status().is_success() {
        warn!(
            target: TARGET_WEB_REQUEST,
            "Error: Status {} - Headers: {:#?}",
            response.status(),
            response.headers()
        );
        return Err(anyhow::anyhow!("HTTP error: {}", response.status()));
    }

    let body = response.text().await?;
    debug!(target: TARGET_WEB_REQUEST, "Received {} bytes from {}", body.len(), url);
    Ok(body)
}
