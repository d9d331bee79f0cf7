use crate::prompt::common::{current_date, DONT_TELL_ME, MARKDOWN_ONLY};

/// Generate a prompt comparing how a set of articles covers a company.
///
/// `articles_json` is the pretty-printed JSON list of analyzed articles.
pub fn comparative_analysis_prompt(company: &str, articles_json: &str) -> String {
    format!(
        r#"{dont_tell_me}
Today's date: {date}

Given the following news articles about {company}, perform a detailed comparative analysis:

{articles}

1. Identify common and unique topics.
2. Compare sentiment variations across articles.
3. Provide a structured comparison, highlighting how different articles present the company.
4. Explain the impact of these differences on investors and public perception.

Output should be formatted with Markdown and structured as:
- Coverage Differences (Comparison & Impact)
- Topic Overlap (Common & Unique Topics)

{markdown_only}
"#,
        dont_tell_me = DONT_TELL_ME,
        date = current_date(),
        company = company,
        articles = articles_json,
        markdown_only = MARKDOWN_ONLY,
    )
}

/// Generate a prompt for the overall sentiment of a set of articles.
pub fn final_sentiment_prompt(company: &str, articles_json: &str) -> String {
    format!(
        r#"{dont_tell_me}
Today's date: {date}

Analyze the overall sentiment trend in the following news articles about {company}:

{articles}

Provide a well-reasoned final sentiment analysis explaining:
- The general tone of the news coverage.
- Whether it is likely to have a positive or negative impact on investors.
- Any risks or opportunities presented in the articles.

Output should be in Markdown format, structured into:
- Overall Sentiment
- Risks
- Opportunities

{markdown_only}
"#,
        dont_tell_me = DONT_TELL_ME,
        date = current_date(),
        company = company,
        articles = articles_json,
        markdown_only = MARKDOWN_ONLY,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_comparative_prompt_embeds_articles() {
        let prompt = comparative_analysis_prompt("Apple", r#"[{"Title": "Apple beats"}]"#);
        assert!(prompt.contains("news articles about Apple"));
        assert!(prompt.contains(r#"[{"Title": "Apple beats"}]"#));
        assert!(prompt.contains("Coverage Differences"));
        assert!(prompt.contains("Topic Overlap"));
        assert!(prompt.contains(MARKDOWN_ONLY));
    }

    #[test]
    fn test_final_sentiment_prompt_sections() {
        let prompt = final_sentiment_prompt("Tesla", "[]");
        for section in ["Overall Sentiment", "Risks", "Opportunities"] {
            assert!(prompt.contains(section), "missing {}", section);
        }
        assert!(prompt.contains("about Tesla"));
    }
}
