//! Type definitions for the RSS module.

use chrono::{DateTime, Utc};
use tokio::time::Duration;

/// One feed entry before any text processing.
#[derive(Debug, Clone, PartialEq)]
pub struct RawArticle {
    pub title: String,
    /// Entry summary as published, usually an HTML fragment.
    pub summary: Option<String>,
    pub published: Option<DateTime<Utc>>,
    pub link: String,
}

// Constants
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
pub const ARTICLE_TIMEOUT: Duration = Duration::from_secs(10);
pub const DEFAULT_MAX_ARTICLES: usize = 10;
pub const DEFAULT_NEWS_FEED_URL: &str = "https://news.google.com/rss/search";
pub const UNTITLED: &str = "Untitled";
