//! Utility functions for RSS feed processing.

use anyhow::Result;
use url::Url;

/// Helper function to validate a URL
pub fn is_valid_url(url: &str) -> bool {
    if let Ok(parsed) = Url::parse(url) {
        parsed.scheme() == "http" || parsed.scheme() == "https"
    } else {
        false
    }
}

/// Builds a news search feed URL for `query` (Google News RSS parameters).
pub fn news_search_url(base: &str, query: &str) -> Result<Url> {
    let url = Url::parse_with_params(
        base,
        &[
            ("q", query),
            ("hl", "en-US"),
            ("gl", "US"),
            ("ceid", "US:en"),
        ],
    )?;
    Ok(url)
}

/// Clean up malformed XML
pub fn cleanup_xml(xml: &str) -> String {
    let mut cleaned = xml.trim().trim_start_matches('\u{FEFF}').to_string();

    // Drop anything in front of the document itself.
    if let Some(xml_start) = cleaned.find("<?xml") {
        cleaned = cleaned[xml_start..].to_string();
    } else if let Some(rss_start) = cleaned.find("<rss") {
        cleaned = cleaned[rss_start..].to_string();
    } else if let Some(feed_start) = cleaned.find("<feed") {
        cleaned = cleaned[feed_start..].to_string();
    }

    // HTML entities that XML parsers reject
    cleaned = cleaned
        .replace("&nbsp;", "&#160;")
        .replace("&ndash;", "&#8211;")
        .replace("&mdash;", "&#8212;")
        .replace("&rsquo;", "&#8217;")
        .replace("&lsquo;", "&#8216;")
        .replace("&rdquo;", "&#8221;")
        .replace("&ldquo;", "&#8220;")
        .replace("&amp;amp;", "&amp;")
        .replace("&apos;", "&#39;");

    // Remove any invalid XML characters
    cleaned = cleaned
        .chars()
        .filter(|&c| {
            matches!(c,
                '\u{0009}' | // tab
                '\u{000A}' | // newline
                '\u{000D}' | // carriage return
                '\u{0020}'..='\u{D7FF}' |
                '\u{E000}'..='\u{FFFD}' |
                '\u{10000}'..='\u{10FFFF}'
            )
        })
        .collect();

    if !cleaned.starts_with("<?xml") {
        cleaned = format!("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n{}", cleaned);
    }

    cleaned
}

/// Short printable preview of a response body for log messages.
pub fn body_preview(body: &str) -> String {
    if body.chars().all(|c| c.is_ascii_graphic() || c.is_whitespace()) {
        body.chars().take(100).collect()
    } else {
        "[binary data]".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_valid_url() {
        assert!(is_valid_url("https://news.google.com/rss"));
        assert!(is_valid_url("http://example.com"));
        assert!(!is_valid_url("ftp://example.com"));
        assert!(!is_valid_url("not a url"));
    }

    #[test]
    fn test_news_search_url_encodes_query() {
        let url = news_search_url("https://news.google.com/rss/search", "AT&T Inc").unwrap();
        assert_eq!(
            url.as_str(),
            "https://news.google.com/rss/search?q=AT%26T+Inc&hl=en-US&gl=US&ceid=US%3Aen"
        );
    }

    #[test]
    fn test_cleanup_xml() {
        let cleaned = cleanup_xml("\u{FEFF}  junk<rss><title>A&nbsp;B</title></rss>");
        assert!(cleaned.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<rss>"));
        assert!(cleaned.contains("A&#160;B"));
    }
}
