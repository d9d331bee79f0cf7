use lazy_static::lazy_static;
use regex::Regex;
use scraper::Html;

lazy_static! {
    static ref TAG_RE: Regex = Regex::new(r"<.*?>").unwrap();
    static ref WHITESPACE_RE: Regex = Regex::new(r"\s+").unwrap();
    static ref URL_RE: Regex = Regex::new(r"https?://\S+|www\.\S+").unwrap();
    static ref SPECIAL_CHAR_RE: Regex = Regex::new(r"[^\w\s]").unwrap();
}

/// Normalizes text for sentiment and topic analysis.
///
/// Passes run in a fixed order: tags, whitespace, URLs, then non-word characters. A final
/// whitespace pass tidies the gaps left behind so the result is a fixed point.
pub fn normalize(text: &str) -> String {
    let text = TAG_RE.replace_all(text, "");
    let text = collapse_whitespace(&text);
    let text = URL_RE.replace_all(&text, "");
    let text = SPECIAL_CHAR_RE.replace_all(&text, "");
    collapse_whitespace(&text)
}

/// Converts an HTML fragment (an RSS summary, typically) into plain text.
pub fn clean_html(raw_html: &str) -> String {
    let fragment = Html::parse_fragment(raw_html);
    let text: String = fragment.root_element().text().collect();
    collapse_whitespace(&text)
}

fn collapse_whitespace(text: &str) -> String {
    WHITESPACE_RE.replace_all(text, " ").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_strips_markup_urls_and_symbols() {
        let raw = "<p>Apple   beats\n estimates!</p> See https://example.com/a?b=1 or www.apple.com.";
        assert_eq!(normalize(raw), "Apple beats estimates See or");
    }

    #[test]
    fn test_normalize_url_inside_tag() {
        assert_eq!(normalize("<a href=\"http://x.io\">Read</a> more"), "Read more");
    }

    #[test]
    fn test_normalize_is_idempotent() {
        for text in [
            "Shares rose 5% - a record, analysts said.",
            "Plain words only",
            "  leading and trailing  ",
            "Über-Café naïve résumé",
            "",
        ] {
            let once = normalize(text);
            assert_eq!(normalize(&once), once, "not idempotent for {:?}", text);
        }
    }

    #[test]
    fn test_clean_html_decodes_entities() {
        let raw = "<a href=\"https://news.example.com\">Apple &amp; Google</a>&nbsp;&nbsp;<font color=\"#6f6f6f\">Reuters</font>";
        assert_eq!(clean_html(raw), "Apple & Google Reuters");
    }

    #[test]
    fn test_clean_html_plain_text_passthrough() {
        assert_eq!(clean_html("No markup here."), "No markup here.");
    }
}
