//! Sentiment labelling for article text.

mod lexicon;

use serde::{Deserialize, Serialize};
use std::fmt;

pub use self::lexicon::LexiconScorer;

const POLARITY_THRESHOLD: f64 = 0.2;
const SUBJECTIVITY_THRESHOLD: f64 = 0.4;

/// Polarity in [-1, 1] and subjectivity in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SentimentScore {
    pub polarity: f64,
    pub subjectivity: f64,
}

impl SentimentScore {
    pub fn new(polarity: f64, subjectivity: f64) -> Self {
        Self {
            polarity: polarity.clamp(-1.0, 1.0),
            subjectivity: subjectivity.clamp(0.0, 1.0),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sentiment {
    Positive,
    Negative,
    Neutral,
}

impl Sentiment {
    /// Only opinionated text (subjectivity above 0.4) can be labelled positive or negative.
    pub fn classify(score: SentimentScore) -> Self {
        if score.subjectivity > SUBJECTIVITY_THRESHOLD {
            if score.polarity > POLARITY_THRESHOLD {
                return Sentiment::Positive;
            }
            if score.polarity < -POLARITY_THRESHOLD {
                return Sentiment::Negative;
            }
        }
        Sentiment::Neutral
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Sentiment::Positive => "Positive",
            Sentiment::Negative => "Negative",
            Sentiment::Neutral => "Neutral",
        }
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Maps text to a polarity/subjectivity pair.
pub trait SentimentScorer: Send + Sync {
    fn score(&self, text: &str) -> SentimentScore;

    fn label(&self, text: &str) -> Sentiment {
        Sentiment::classify(self.score(text))
    }
}
