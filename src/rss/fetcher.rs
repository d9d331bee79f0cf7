//! Company news fetching.

use anyhow::Result;
use readability::extractor;
use tokio::task;
use tokio::time::timeout;
use tracing::{debug, info, warn};

use super::client::fetch_feed;
use super::parser::parse_feed;
use super::types::{RawArticle, ARTICLE_TIMEOUT, REQUEST_TIMEOUT};
use super::util::{is_valid_url, news_search_url};
use crate::TARGET_WEB_REQUEST;

/// Searches a news feed for a company and returns the newest entries in feed order.
#[derive(Clone, Debug)]
pub struct NewsFetcher {
    client: reqwest::Client,
    feed_url: String,
    max_articles: usize,
}

impl NewsFetcher {
    pub fn new(client: reqwest::Client, feed_url: impl Into<String>, max_articles: usize) -> Self {
        Self {
            client,
            feed_url: feed_url.into(),
            max_articles,
        }
    }

    pub async fn fetch_company_news(&self, company: &str) -> Result<Vec<RawArticle>> {
        let url = news_search_url(&self.feed_url, company)?;
        info!(target: TARGET_WEB_REQUEST, "Loading news feed for {:?} from {}", company, url);

        let body = fetch_feed(&self.client, url.as_str(), REQUEST_TIMEOUT).await?;
        let articles = parse_feed(&body, self.max_articles)?;

        info!(target: TARGET_WEB_REQUEST, "Found {} articles for {:?}", articles.len(), company);
        Ok(articles)
    }
}

/// Extracts the readable body text of an article page.
pub async fn fetch_article_text(url: &str) -> Result<String> {
    if !is_valid_url(url) {
        return Err(anyhow::anyhow!("Invalid article URL: {}", url));
    }

    debug!(target: TARGET_WEB_REQUEST, "Extracting article text from {}", url);
    let owned_url = url.to_string();
    let scrape = task::spawn_blocking(move || extractor::scrape(&owned_url));

    match timeout(ARTICLE_TIMEOUT, scrape).await {
        Ok(Ok(Ok(product))) => {
            let text = product.text.trim().to_string();
            if text.is_empty() {
                warn!(target: TARGET_WEB_REQUEST, "Extracted empty article from {}", url);
                return Err(anyhow::anyhow!("Could not extract article content"));
            }
            debug!(target: TARGET_WEB_REQUEST, "Extracted {} characters from {}", text.len(), url);
            Ok(text)
        }
        Ok(Ok(Err(e))) => {
            warn!(target: TARGET_WEB_REQUEST, "Error extracting {}: {:?}", url, e);
            Err(anyhow::anyhow!("Error extracting content: {:?}", e))
        }
        Ok(Err(e)) => Err(anyhow::anyhow!("Extraction task failed: {}", e)),
        Err(_) => {
            warn!(target: TARGET_WEB_REQUEST, "Extraction of {} timed out", url);
            Err(anyhow::anyhow!(
                "Article extraction timed out after {} seconds",
                ARTICLE_TIMEOUT.as_secs()
            ))
        }
    }
}
