//! Feed parsing logic for RSS and Atom.

use anyhow::Result;
use feed_rs::model::Entry;
use feed_rs::parser;
use std::io::Cursor;
use tracing::{debug, error, warn};

use super::types::{RawArticle, UNTITLED};
use super::util::{body_preview, cleanup_xml};
use crate::TARGET_WEB_REQUEST;

/// Parses an RSS or Atom document into at most `limit` articles, in feed order.
pub fn parse_feed(body: &str, limit: usize) -> Result<Vec<RawArticle>> {
    let feed = match parser::parse(Cursor::new(body)) {
        Ok(feed) => feed,
        Err(first_err) => {
            let cleaned_xml = cleanup_xml(body);
            if !(cleaned_xml.contains("<rss") || cleaned_xml.contains("<feed")) {
                error!(
                    target: TARGET_WEB_REQUEST,
                    "Feed doesn't appear to be RSS or Atom. Content preview: {}",
                    body_preview(body)
                );
                return Err(anyhow::anyhow!("Content is not RSS or Atom feed"));
            }

            match parser::parse(Cursor::new(cleaned_xml)) {
                Ok(feed) => {
                    warn!(target: TARGET_WEB_REQUEST, "Feed parsed successfully after XML cleanup");
                    feed
                }
                Err(second_err) => {
                    error!(
                        target: TARGET_WEB_REQUEST,
                        "Failed to parse feed after cleanup. First error: {}. Second error: {}",
                        first_err,
                        second_err
                    );
                    return Err(anyhow::anyhow!("XML parsing error even after cleanup"));
                }
            }
        }
    };

    debug!(target: TARGET_WEB_REQUEST, "Parsed feed with {} entries", feed.entries.len());

    Ok(feed
        .entries
        .into_iter()
        .filter_map(entry_to_article)
        .take(limit)
        .collect())
}

fn entry_to_article(entry: Entry) -> Option<RawArticle> {
    let Some(link) = entry.links.first().map(|link| link.href.clone()) else {
        debug!(target: TARGET_WEB_REQUEST, "Skipping feed entry without a link");
        return None;
    };

    let title = entry
        .title
        .map(|t| t.content.trim().to_string())
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| UNTITLED.to_string());

    let summary = entry
        .summary
        .map(|s| s.content)
        .or_else(|| entry.content.and_then(|c| c.body))
        .filter(|s| !s.trim().is_empty());

    Some(RawArticle {
        title,
        summary,
        published: entry.published.or(entry.updated),
        link,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_RSS: &str = r##"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0">
  <channel>
    <title>"Apple" - Google News</title>
    <link>https://news.google.com</link>
    <description>Google News</description>
    <item>
      <title>Apple beats estimates - Reuters</title>
      <link>https://news.example.com/apple-beats</link>
      <pubDate>Mon, 14 Oct 2024 12:30:00 GMT</pubDate>
      <description>&lt;a href="https://news.example.com/apple-beats"&gt;Apple beats estimates&lt;/a&gt;&amp;nbsp;&amp;nbsp;&lt;font color="#6f6f6f"&gt;Reuters&lt;/font&gt;</description>
    </item>
    <item>
      <title>Apple faces probe</title>
      <link>https://news.example.com/apple-probe</link>
    </item>
    <item>
      <title>No link here</title>
      <description>Orphan entry</description>
    </item>
    <item>
      <title>Third story</title>
      <link>https://news.example.com/third</link>
      <description>Third summary.</description>
    </item>
  </channel>
</rss>"##;

    #[test]
    fn test_parse_rss_entries_in_order() {
        let articles = parse_feed(SAMPLE_RSS, 10).unwrap();
        assert_eq!(articles.len(), 3);
        assert_eq!(articles[0].title, "Apple beats estimates - Reuters");
        assert_eq!(articles[0].link, "https://news.example.com/apple-beats");
        assert!(articles[0].summary.as_deref().unwrap().contains("Apple beats estimates"));
        assert_eq!(
            articles[0].published.map(|d| d.to_rfc3339()),
            Some("2024-10-14T12:30:00+00:00".to_string())
        );
        assert_eq!(articles[1].summary, None);
        assert_eq!(articles[1].published, None);
        assert_eq!(articles[2].title, "Third story");
    }

    #[test]
    fn test_parse_respects_limit() {
        let articles = parse_feed(SAMPLE_RSS, 1).unwrap();
        assert_eq!(articles.len(), 1);
        assert_eq!(articles[0].link, "https://news.example.com/apple-beats");
    }

    #[test]
    fn test_parse_rejects_non_feed() {
        assert!(parse_feed("<html><body>Not a feed</body></html>", 10).is_err());
        assert!(parse_feed("", 10).is_err());
    }

    #[test]
    fn test_parse_empty_channel() {
        let body = r#"<rss version="2.0"><channel><title>Empty</title></channel></rss>"#;
        assert!(parse_feed(body, 10).unwrap().is_empty());
    }
}
