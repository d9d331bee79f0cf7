//! The structured result of one company analysis and its tabular views.

use prettytable::{Cell, Row, Table};
use serde::Serialize;

use crate::article::Article;
use crate::sentiment::Sentiment;

pub const AUDIO_PLACEHOLDER: &str = "[Play Hindi Speech]";

#[derive(Debug, Clone, Serialize)]
pub struct CompanyReport {
    #[serde(rename = "Company")]
    pub company: String,
    #[serde(rename = "Articles")]
    pub articles: Vec<Article>,
    #[serde(rename = "Comparative Sentiment Score")]
    pub comparative_analysis: String,
    #[serde(rename = "Final Sentiment Analysis")]
    pub final_sentiment: String,
    #[serde(rename = "Translation", skip_serializing_if = "Option::is_none")]
    pub translation: Option<String>,
    /// Path of the synthesized audio, or the placeholder when none was produced.
    #[serde(rename = "Audio")]
    pub audio: String,
}

impl CompanyReport {
    pub fn sentiment_counts(&self) -> SentimentCounts {
        SentimentCounts::from_articles(&self.articles)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SentimentCounts {
    #[serde(rename = "Positive")]
    pub positive: usize,
    #[serde(rename = "Negative")]
    pub negative: usize,
    #[serde(rename = "Neutral")]
    pub neutral: usize,
}

impl SentimentCounts {
    pub fn from_articles(articles: &[Article]) -> Self {
        articles
            .iter()
            .fold(Self::default(), |mut counts, article| {
                match article.sentiment {
                    Sentiment::Positive => counts.positive += 1,
                    Sentiment::Negative => counts.negative += 1,
                    Sentiment::Neutral => counts.neutral += 1,
                }
                counts
            })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComparisonRow {
    #[serde(rename = "Title")]
    pub title: String,
    #[serde(rename = "Sentiment")]
    pub sentiment: String,
    #[serde(rename = "Topics")]
    pub topics: String,
    #[serde(rename = "Date")]
    pub date: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ComparisonTable {
    pub rows: Vec<ComparisonRow>,
}

impl ComparisonTable {
    pub fn to_table(&self) -> Table {
        let mut table = Table::new();
        table.set_titles(Row::new(vec![
            Cell::new("Title"),
            Cell::new("Sentiment"),
            Cell::new("Topics"),
            Cell::new("Date"),
        ]));
        for row in &self.rows {
            table.add_row(Row::new(vec![
                Cell::new(&row.title),
                Cell::new(&row.sentiment),
                Cell::new(&row.topics),
                Cell::new(&row.date),
            ]));
        }
        table
    }
}

/// One row per article: title, sentiment, comma-joined topics, date.
pub fn build_table(articles: &[Article]) -> ComparisonTable {
    ComparisonTable {
        rows: articles
            .iter()
            .map(|article| ComparisonRow {
                title: article.title.clone(),
                sentiment: article.sentiment.to_string(),
                topics: article.topics.join(", "),
                date: article.published_display(),
            })
            .collect(),
    }
}
