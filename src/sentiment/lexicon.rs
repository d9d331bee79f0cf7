use std::collections::{HashMap, HashSet};

use super::{SentimentScore, SentimentScorer};
use crate::text::word_tokens;

/// Tokens after a negator during which the next opinion word is flipped.
const NEGATION_WINDOW: usize = 3;
/// Negated opinions are flipped and damped rather than simply inverted.
const NEGATION_FACTOR: f64 = -0.5;

// (word, polarity, subjectivity)
const OPINION_WORDS: &[(&str, f64, f64)] = &[
    // Positive
    ("excellent", 1.0, 1.0),
    ("outstanding", 0.9, 0.9),
    ("exceptional", 0.8, 0.85),
    ("remarkable", 0.75, 0.75),
    ("impressive", 0.8, 0.9),
    ("amazing", 0.6, 0.9),
    ("fantastic", 0.4, 0.9),
    ("great", 0.8, 0.75),
    ("best", 1.0, 0.3),
    ("better", 0.5, 0.5),
    ("good", 0.7, 0.6),
    ("strong", 0.43, 0.73),
    ("stronger", 0.5, 0.7),
    ("robust", 0.5, 0.6),
    ("solid", 0.3, 0.6),
    ("positive", 0.23, 0.55),
    ("positively", 0.23, 0.55),
    ("successful", 0.75, 0.95),
    ("success", 0.6, 0.7),
    ("win", 0.8, 0.6),
    ("wins", 0.8, 0.6),
    ("gain", 0.4, 0.5),
    ("gains", 0.4, 0.5),
    ("growth", 0.3, 0.45),
    ("profitable", 0.6, 0.6),
    ("record", 0.3, 0.5),
    ("optimistic", 0.6, 0.8),
    ("optimism", 0.6, 0.8),
    ("confident", 0.5, 0.8),
    ("bullish", 0.6, 0.8),
    ("innovative", 0.5, 0.75),
    ("promising", 0.6, 0.7),
    ("praised", 0.6, 0.7),
    ("praise", 0.6, 0.7),
    ("happy", 0.8, 1.0),
    ("pleased", 0.5, 0.8),
    ("exciting", 0.3, 0.8),
    ("excited", 0.4, 0.75),
    ("favorable", 0.5, 0.65),
    ("healthy", 0.5, 0.5),
    ("boost", 0.45, 0.55),
    ("boosted", 0.45, 0.55),
    ("surge", 0.5, 0.6),
    ("surged", 0.5, 0.6),
    ("soar", 0.6, 0.65),
    ("soared", 0.6, 0.65),
    ("rally", 0.5, 0.6),
    ("rallied", 0.5, 0.6),
    ("beat", 0.35, 0.5),
    ("beats", 0.35, 0.5),
    ("upbeat", 0.6, 0.8),
    ("breakthrough", 0.6, 0.7),
    ("leading", 0.3, 0.5),
    ("love", 0.5, 0.6),
    ("welcome", 0.8, 0.9),
    ("valuable", 0.5, 0.6),
    ("effective", 0.6, 0.8),
    ("efficient", 0.5, 0.7),
    ("reliable", 0.5, 0.7),
    ("improved", 0.5, 0.6),
    ("improve", 0.4, 0.55),
    ("improvement", 0.4, 0.55),
    ("opportunity", 0.4, 0.5),
    ("opportunities", 0.4, 0.5),
    ("upgrade", 0.4, 0.5),
    ("upgraded", 0.4, 0.5),
    // Negative
    ("terrible", -1.0, 1.0),
    ("awful", -1.0, 1.0),
    ("horrible", -1.0, 1.0),
    ("worst", -1.0, 1.0),
    ("disastrous", -0.9, 0.9),
    ("disaster", -0.8, 0.8),
    ("bad", -0.7, 0.67),
    ("worse", -0.4, 0.6),
    ("poor", -0.4, 0.6),
    ("weak", -0.38, 0.63),
    ("weaker", -0.4, 0.6),
    ("negative", -0.3, 0.4),
    ("disappointing", -0.6, 0.7),
    ("disappointed", -0.75, 0.75),
    ("disappointment", -0.6, 0.7),
    ("failure", -0.6, 0.6),
    ("failed", -0.5, 0.5),
    ("fail", -0.5, 0.5),
    ("loss", -0.4, 0.35),
    ("losses", -0.4, 0.35),
    ("decline", -0.3, 0.45),
    ("declined", -0.3, 0.45),
    ("drop", -0.3, 0.45),
    ("dropped", -0.3, 0.45),
    ("plunge", -0.6, 0.6),
    ("plunged", -0.6, 0.6),
    ("slump", -0.55, 0.6),
    ("slumped", -0.55, 0.6),
    ("tumble", -0.5, 0.6),
    ("tumbled", -0.5, 0.6),
    ("crash", -0.7, 0.7),
    ("crisis", -0.6, 0.6),
    ("risky", -0.4, 0.7),
    ("risk", -0.2, 0.45),
    ("risks", -0.2, 0.45),
    ("concern", -0.3, 0.5),
    ("concerns", -0.3, 0.5),
    ("concerned", -0.35, 0.6),
    ("worried", -0.5, 0.8),
    ("worry", -0.4, 0.7),
    ("fear", -0.5, 0.7),
    ("fears", -0.5, 0.7),
    ("cautious", -0.1, 0.6),
    ("uncertain", -0.3, 0.7),
    ("uncertainty", -0.3, 0.6),
    ("bearish", -0.6, 0.8),
    ("pessimistic", -0.6, 0.8),
    ("lawsuit", -0.4, 0.4),
    ("scandal", -0.7, 0.7),
    ("fraud", -0.8, 0.7),
    ("fine", 0.4, 0.5),
    ("fined", -0.5, 0.5),
    ("penalty", -0.4, 0.4),
    ("layoffs", -0.5, 0.5),
    ("recall", -0.3, 0.4),
    ("recalls", -0.3, 0.4),
    ("downgrade", -0.45, 0.55),
    ("downgraded", -0.45, 0.55),
    ("struggle", -0.4, 0.6),
    ("struggling", -0.45, 0.65),
    ("troubled", -0.5, 0.6),
    ("problem", -0.3, 0.5),
    ("problems", -0.3, 0.5),
    ("criticized", -0.5, 0.7),
    ("criticism", -0.5, 0.7),
    ("angry", -0.5, 1.0),
    ("sad", -0.5, 1.0),
    ("slow", -0.3, 0.4),
    ("sluggish", -0.45, 0.6),
    ("volatile", -0.3, 0.6),
    ("dangerous", -0.6, 0.9),
];

// (word, multiplier)
const INTENSIFIERS: &[(&str, f64)] = &[
    ("very", 1.3),
    ("really", 1.3),
    ("extremely", 1.5),
    ("highly", 1.3),
    ("incredibly", 1.4),
    ("hugely", 1.4),
    ("deeply", 1.3),
    ("particularly", 1.2),
    ("remarkably", 1.3),
    ("quite", 1.1),
    ("somewhat", 0.6),
    ("slightly", 0.5),
    ("barely", 0.4),
];

const NEGATIONS: &[&str] = &[
    "not", "no", "never", "nor", "neither", "without", "hardly", "cannot", "can't", "cant",
    "don't", "dont", "doesn't", "doesnt", "didn't", "didnt", "isn't", "isnt", "wasn't", "wasnt",
    "aren't", "arent", "weren't", "werent", "won't", "wont", "wouldn't", "wouldnt", "n't",
];

/// Lexicon-based scorer: the mean polarity and subjectivity of the opinion words found,
/// with intensifiers scaling the adjacent word and negators flipping it.
#[derive(Debug, Clone)]
pub struct LexiconScorer {
    opinions: HashMap<&'static str, (f64, f64)>,
    intensifiers: HashMap<&'static str, f64>,
    negations: HashSet<&'static str>,
}

impl Default for LexiconScorer {
    fn default() -> Self {
        Self {
            opinions: OPINION_WORDS
                .iter()
                .map(|&(word, polarity, subjectivity)| (word, (polarity, subjectivity)))
                .collect(),
            intensifiers: INTENSIFIERS.iter().copied().collect(),
            negations: NEGATIONS.iter().copied().collect(),
        }
    }
}

impl LexiconScorer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces an opinion word.
    pub fn with_word(mut self, word: &'static str, polarity: f64, subjectivity: f64) -> Self {
        self.opinions.insert(word, (polarity, subjectivity));
        self
    }
}

impl SentimentScorer for LexiconScorer {
    fn score(&self, text: &str) -> SentimentScore {
        let mut hits: Vec<(f64, f64)> = Vec::new();
        let mut intensity = 1.0;
        let mut negation_left = 0usize;

        for token in word_tokens(text) {
            let token = token.as_str();

            if self.negations.contains(token) {
                negation_left = NEGATION_WINDOW;
                continue;
            }

            if let Some(&multiplier) = self.intensifiers.get(token) {
                intensity = multiplier;
                continue;
            }

            if let Some(&(polarity, subjectivity)) = self.opinions.get(token) {
                let mut polarity = polarity * intensity;
                if negation_left > 0 {
                    polarity *= NEGATION_FACTOR;
                    negation_left = 0;
                }
                hits.push((polarity, subjectivity * intensity));
            } else {
                negation_left = negation_left.saturating_sub(1);
            }
            intensity = 1.0;
        }

        if hits.is_empty() {
            return SentimentScore::default();
        }

        let count = hits.len() as f64;
        let polarity = hits.iter().map(|(p, _)| p).sum::<f64>() / count;
        let subjectivity = hits.iter().map(|(_, s)| s).sum::<f64>() / count;
        SentimentScore::new(polarity, subjectivity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sentiment::Sentiment;

    #[test]
    fn test_positive_text() {
        let scorer = LexiconScorer::new();
        let text = "Apple posted excellent results and a great quarter";
        assert_eq!(scorer.label(text), Sentiment::Positive);
    }

    #[test]
    fn test_negative_text() {
        let scorer = LexiconScorer::new();
        let text = "The company reported terrible losses amid a disappointing outlook";
        let score = scorer.score(text);
        assert!(score.polarity < -0.2);
        assert_eq!(scorer.label(text), Sentiment::Negative);
    }

    #[test]
    fn test_factual_text_is_neutral() {
        let scorer = LexiconScorer::new();
        let score = scorer.score("The company will hold its annual meeting on Tuesday");
        assert_eq!(score, SentimentScore::default());
        assert_eq!(
            scorer.label("The company will hold its annual meeting on Tuesday"),
            Sentiment::Neutral
        );
    }

    #[test]
    fn test_negation_flips_polarity() {
        let scorer = LexiconScorer::new();
        assert!(scorer.score("The results were good").polarity > 0.0);
        let negated = scorer.score("The results were not good");
        assert!((negated.polarity - (-0.35)).abs() < 1e-9);
    }

    #[test]
    fn test_contracted_negation() {
        let scorer = LexiconScorer::new();
        let negated = scorer.score("The results weren’t good");
        assert!((negated.polarity - (-0.35)).abs() < 1e-9);
    }

    #[test]
    fn test_negation_window_expires() {
        let scorer = LexiconScorer::new();
        let score = scorer.score("not that the new chip was ever good");
        assert!(score.polarity > 0.0);
    }

    #[test]
    fn test_intensifier_strengthens() {
        let scorer = LexiconScorer::new();
        let plain = scorer.score("a good quarter").polarity;
        let intense = scorer.score("a very good quarter").polarity;
        assert!(intense > plain);
    }

    #[test]
    fn test_custom_word() {
        let scorer = LexiconScorer::new().with_word("moonshot", 0.9, 0.9);
        assert_eq!(scorer.label("a moonshot"), Sentiment::Positive);
    }
}
