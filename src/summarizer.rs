//! Extractive summarization by word-frequency sentence scoring.
//!
//! Every non-stopword token of the input is counted once into a frequency table. Each
//! sentence then scores the sum of the table counts of its own tokens, the top sentences
//! are kept, and the survivors are returned in document order.
//!
//! Sentence tokens are looked up without the stopword filter. Stopwords still contribute
//! nothing because they never enter the table.

use std::collections::HashMap;

use crate::text::{is_stopword, split_sentences, word_tokens};

pub const DEFAULT_SUMMARY_SENTENCES: usize = 3;

/// Word to occurrence count over one text.
pub type FrequencyTable = HashMap<String, usize>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SentenceScore {
    /// Position of the sentence in the source text.
    pub index: usize,
    pub score: usize,
}

/// Counts the non-stopword tokens of the whole text.
pub fn frequency_table(text: &str) -> FrequencyTable {
    let mut table = FrequencyTable::new();
    for word in word_tokens(text).filter(|word| !is_stopword(word)) {
        *table.entry(word).or_insert(0) += 1;
    }
    table
}

/// Scores each sentence, in order, against the frequency table.
pub fn score_sentences(sentences: &[&str], table: &FrequencyTable) -> Vec<SentenceScore> {
    sentences
        .iter()
        .enumerate()
        .map(|(index, sentence)| SentenceScore {
            index,
            score: word_tokens(sentence)
                .filter_map(|word| table.get(&word))
                .sum(),
        })
        .collect()
}

/// Returns the `num_sentences` highest scoring sentences of `text`, joined by a single
/// space in their original order. Equal scores favor the earlier sentence.
///
/// A count of zero, an empty text, or a text without sentences yields an empty string.
pub fn summarize(text: &str, num_sentences: usize) -> String {
    if num_sentences == 0 {
        return String::new();
    }

    let sentences = split_sentences(text);
    if sentences.is_empty() {
        return String::new();
    }

    let table = frequency_table(text);
    let mut ranked = score_sentences(&sentences, &table);

    // sort_by is stable, so ties stay in document order.
    ranked.sort_by(|a, b| b.score.cmp(&a.score));
    ranked.truncate(num_sentences);
    ranked.sort_by_key(|scored| scored.index);

    ranked
        .iter()
        .map(|scored| sentences[scored.index])
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    const EARNINGS: &str = "Apple reported strong earnings. The CEO praised the team. \
        Investors reacted positively to the news. Analysts remain cautious about future growth.";

    #[test]
    fn test_earnings_scenario_picks_top_two_in_order() {
        assert_eq!(
            summarize(EARNINGS, 2),
            "Apple reported strong earnings. Analysts remain cautious about future growth."
        );
    }

    #[test]
    fn test_frequency_table_excludes_stopwords() {
        let table = frequency_table(EARNINGS);
        assert_eq!(table.get("apple"), Some(&1));
        assert_eq!(table.get("growth"), Some(&1));
        assert!(!table.contains_key("the"));
        assert!(!table.contains_key("about"));
        assert_eq!(table.len(), 16);
    }

    #[test]
    fn test_sentence_scores() {
        let sentences = split_sentences(EARNINGS);
        let table = frequency_table(EARNINGS);
        let scores: Vec<usize> = score_sentences(&sentences, &table)
            .iter()
            .map(|s| s.score)
            .collect();
        assert_eq!(scores, vec![4, 3, 4, 5]);
    }

    #[test]
    fn test_large_count_returns_every_sentence() {
        let expected = split_sentences(EARNINGS).join(" ");
        assert_eq!(summarize(EARNINGS, 4), expected);
        assert_eq!(summarize(EARNINGS, 50), expected);
    }

    #[test]
    fn test_zero_count_is_empty() {
        assert_eq!(summarize(EARNINGS, 0), "");
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(summarize("", 3), "");
        assert_eq!(summarize("   ", 3), "");
    }

    #[test]
    fn test_tie_prefers_earlier_sentence() {
        let text = "Markets rallied today. Bonds slipped lower.";
        assert_eq!(summarize(text, 1), "Markets rallied today.");
    }

    #[test]
    fn test_repeated_words_dominate() {
        let text = "Tesla shares fell. The weather was mild. Tesla recalled Tesla vehicles.";
        assert_eq!(summarize(text, 1), "Tesla recalled Tesla vehicles.");
    }

    #[test]
    fn test_zero_score_sentences_fill_remaining_slots() {
        let text = "It is what it is. Revenue climbed sharply.";
        assert_eq!(summarize(text, 1), "Revenue climbed sharply.");
        assert_eq!(summarize(text, 2), text);
    }

    #[test]
    fn test_single_letter_label_does_not_merge_sentences() {
        let text = "The company activated Plan B. Shares rose sharply. Revenue fell.";
        assert_eq!(summarize(text, 1), "The company activated Plan B.");
        assert_eq!(summarize(text, 3), text);
    }

    #[test]
    fn test_possessives_count_with_their_word() {
        let table = frequency_table("Apple's profits rose. Apple cut jobs. Apple's stock fell.");
        assert_eq!(table.get("apple"), Some(&3));
        assert!(!table.contains_key("apple's"));
    }

    #[test]
    fn test_deterministic() {
        let first = summarize(EARNINGS, 2);
        for _ in 0..10 {
            assert_eq!(summarize(EARNINGS, 2), first);
        }
    }

    #[test]
    fn test_concurrent_calls_agree() {
        let text: Arc<str> = Arc::from(EARNINGS);
        let expected = summarize(&text, 2);

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let text = Arc::clone(&text);
                thread::spawn(move || summarize(&text, 2))
            })
            .collect();

        for handle in handles {
            assert_eq!(handle.join().unwrap(), expected);
        }
    }

    #[test]
    fn test_input_is_not_mutated() {
        let text = String::from(EARNINGS);
        let _ = summarize(&text, 1);
        assert_eq!(text, EARNINGS);
    }
}
