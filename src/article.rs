//! Processed article records and the text services that build them.

use chrono::{DateTime, Utc};
use serde::{Serialize, Serializer};

use crate::rss::RawArticle;
use crate::sentiment::{LexiconScorer, Sentiment, SentimentScorer};
use crate::summarizer::summarize;
use crate::text::{clean_html, normalize};
use crate::topics::{KeyphraseExtractor, TopicExtractor};

pub const NO_SUMMARY: &str = "No summary available";
pub const UNKNOWN_DATE: &str = "Unknown";

/// One analyzed news item. Built once by [`TextServices::build_article`] and not
/// modified afterwards.
#[derive(Debug, Clone, Serialize)]
pub struct Article {
    #[serde(rename = "Title")]
    pub title: String,
    #[serde(skip)]
    pub raw_summary: Option<String>,
    #[serde(rename = "Summary")]
    pub summary: String,
    #[serde(rename = "Key Sentences")]
    pub key_sentences: String,
    #[serde(skip)]
    pub normalized_text: String,
    #[serde(rename = "Sentiment")]
    pub sentiment: Sentiment,
    #[serde(rename = "Topics")]
    pub topics: Vec<String>,
    #[serde(rename = "Published Date", serialize_with = "serialize_published")]
    pub published: Option<DateTime<Utc>>,
    #[serde(rename = "Link")]
    pub link: String,
}

impl Article {
    /// Publication date as displayed, or "Unknown".
    pub fn published_display(&self) -> String {
        self.published
            .map(|date| date.to_rfc2822())
            .unwrap_or_else(|| UNKNOWN_DATE.to_string())
    }
}

fn serialize_published<S: Serializer>(
    published: &Option<DateTime<Utc>>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match published {
        Some(date) => serializer.serialize_str(&date.to_rfc2822()),
        None => serializer.serialize_str(UNKNOWN_DATE),
    }
}

/// Explicitly constructed sentiment, topic and summary services shared by every request.
pub struct TextServices {
    sentiment: Box<dyn SentimentScorer>,
    topics: Box<dyn TopicExtractor>,
}

impl Default for TextServices {
    fn default() -> Self {
        Self::new(
            Box::new(LexiconScorer::new()),
            Box::new(KeyphraseExtractor::new()),
        )
    }
}

impl TextServices {
    pub fn new(sentiment: Box<dyn SentimentScorer>, topics: Box<dyn TopicExtractor>) -> Self {
        Self { sentiment, topics }
    }

    /// Turns a feed entry into an [`Article`].
    ///
    /// `full_text`, when present, replaces the feed summary as the body that is
    /// summarized, scored and mined for topics.
    pub fn build_article(
        &self,
        raw: RawArticle,
        full_text: Option<&str>,
        summary_sentences: usize,
    ) -> Article {
        let summary = raw
            .summary
            .as_deref()
            .map(clean_html)
            .filter(|text| !text.is_empty())
            .unwrap_or_else(|| NO_SUMMARY.to_string());

        let body = full_text.unwrap_or(summary.as_str());
        let normalized_text = normalize(body);

        Article {
            sentiment: self.sentiment.label(&normalized_text),
            topics: self.topics.extract(&normalized_text),
            key_sentences: summarize(body, summary_sentences),
            title: raw.title,
            raw_summary: raw.summary,
            summary,
            normalized_text,
            published: raw.published,
            link: raw.link,
        }
    }
}
