//! Keyphrase extraction for article topics.

use rust_stemmers::{Algorithm, Stemmer};
use std::collections::{HashMap, HashSet};

use crate::text::{is_stopword, split_sentences, word_tokens};

pub const DEFAULT_TOPIC_COUNT: usize = 3;

/// Maps text to a small, de-duplicated set of keyphrases.
pub trait TopicExtractor: Send + Sync {
    fn extract(&self, text: &str) -> Vec<String>;
}

struct Candidate {
    phrase: String,
    stems: Vec<String>,
    first_position: usize,
    occurrences: usize,
}

/// Frequency-based extractor for one and two word phrases.
///
/// Phrases are runs of adjacent content words. A phrase scores its occurrence count times
/// the summed frequency of its (stemmed) words, and a phrase sharing any word with a phrase
/// already chosen is skipped.
pub struct KeyphraseExtractor {
    top_n: usize,
    stemmer: Stemmer,
}

impl Default for KeyphraseExtractor {
    fn default() -> Self {
        Self {
            top_n: DEFAULT_TOPIC_COUNT,
            stemmer: Stemmer::create(Algorithm::English),
        }
    }
}

impl KeyphraseExtractor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_top_n(mut self, top_n: usize) -> Self {
        self.top_n = top_n;
        self
    }

    fn is_content_word(word: &str) -> bool {
        word.chars().next().is_some_and(char::is_alphanumeric)
            && word.chars().count() >= 2
            && !is_stopword(word)
            && !word.chars().all(|c| c.is_numeric() || c == '.' || c == ',')
    }

    fn candidates(&self, text: &str) -> (Vec<Candidate>, HashMap<String, usize>) {
        let mut candidates: Vec<Candidate> = Vec::new();
        let mut by_key: HashMap<String, usize> = HashMap::new();
        let mut stem_counts: HashMap<String, usize> = HashMap::new();
        let mut position = 0usize;

        let mut add = |words: &[(String, String)], position: usize| {
            let stems: Vec<String> = words.iter().map(|(_, stem)| stem.clone()).collect();
            let key = stems.join(" ");
            let existing = by_key.get(&key).copied();
            match existing {
                Some(index) => candidates[index].occurrences += 1,
                None => {
                    by_key.insert(key, candidates.len());
                    candidates.push(Candidate {
                        phrase: words
                            .iter()
                            .map(|(word, _)| word.as_str())
                            .collect::<Vec<_>>()
                            .join(" "),
                        stems,
                        first_position: position,
                        occurrences: 1,
                    });
                }
            }
        };

        for sentence in split_sentences(text) {
            let mut run: Vec<(String, String)> = Vec::new();
            for word in word_tokens(sentence) {
                position += 1;
                if !Self::is_content_word(&word) {
                    run.clear();
                    continue;
                }
                let stem = self.stemmer.stem(&word).into_owned();
                *stem_counts.entry(stem.clone()).or_insert(0) += 1;
                run.push((word, stem));

                let len = run.len();
                add(&run[len - 1..], position);
                if len >= 2 {
                    add(&run[len - 2..], position - 1);
                }
            }
        }

        (candidates, stem_counts)
    }
}

impl TopicExtractor for KeyphraseExtractor {
    fn extract(&self, text: &str) -> Vec<String> {
        let (candidates, stem_counts) = self.candidates(text);

        let score = |candidate: &Candidate| -> usize {
            let weight: usize = candidate
                .stems
                .iter()
                .map(|stem| stem_counts.get(stem).copied().unwrap_or(0))
                .sum();
            candidate.occurrences * weight
        };

        let mut ranked: Vec<&Candidate> = candidates.iter().collect();
        ranked.sort_by(|a, b| {
            score(b)
                .cmp(&score(a))
                .then(a.first_position.cmp(&b.first_position))
        });

        let mut covered: HashSet<&str> = HashSet::new();
        let mut topics = Vec::new();
        for candidate in ranked {
            if topics.len() >= self.top_n {
                break;
            }
            if candidate.stems.iter().any(|stem| covered.contains(stem.as_str())) {
                continue;
            }
            covered.extend(candidate.stems.iter().map(String::as_str));
            topics.push(candidate.phrase.clone());
        }
        topics
    }
}
