//! News feed module for newslens.
//!
//! This module handles fetching and parsing the RSS/Atom search feeds that supply
//! articles, plus extraction of full article text.

mod client;
mod fetcher;
mod parser;
mod types;
mod util;

pub use self::client::{create_http_client, fetch_feed};
pub use self::fetcher::{fetch_article_text, NewsFetcher};
pub use self::parser::parse_feed;
pub use self::types::*;
pub use self::util::{cleanup_xml, is_valid_url, news_search_url};
