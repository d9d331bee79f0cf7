use lazy_static::lazy_static;
use std::collections::HashSet;
use unicode_segmentation::UnicodeSegmentation;

lazy_static! {
    // Abbreviations that end in a period without ending the sentence.
    static ref ABBREVIATIONS: HashSet<&'static str> = [
        "mr", "mrs", "ms", "dr", "prof", "st", "jr", "sr", "gen", "gov", "sen", "rep", "lt",
        "col", "capt", "vs",
    ]
    .into_iter()
    .collect();

    // Words that take a single-letter label ("Plan B", "Class A") rather than a name.
    static ref LABEL_WORDS: HashSet<&'static str> = [
        "plan", "class", "vitamin", "series", "type", "grade", "phase", "category", "option",
        "section", "part", "appendix", "exhibit", "schedule", "figure", "model", "tier",
        "round", "stage", "level", "group", "block", "division", "team", "building", "gate",
        "terminal", "room", "item", "article", "chapter", "form", "unit", "line", "route",
        "zone", "area", "sector", "wing", "hall", "size", "point", "note", "step",
    ]
    .into_iter()
    .collect();
}

// Contraction suffixes split off a word, as in "apple's" -> "apple" + "'s".
const CLITICS: &[&str] = &["s", "m", "d", "ll", "re", "ve"];

/// Splits text into trimmed sentences using Unicode sentence boundaries.
///
/// A boundary directly after a title abbreviation ("Dr.") is not treated as the end of a
/// sentence. Neither is one after a middle initial ("John F. Kennedy"), but a single letter
/// that labels something ("Plan B.") still ends the sentence.
pub fn split_sentences(text: &str) -> Vec<&str> {
    let segments: Vec<(usize, &str)> = text.split_sentence_bound_indices().collect();
    let mut sentences = Vec::new();
    let mut pending: Option<usize> = None;

    for (i, &(offset, segment)) in segments.iter().enumerate() {
        let begin = pending.take().unwrap_or(offset);
        let end = offset + segment.len();
        let next = segments.get(i + 1).map(|&(_, next)| next);
        if continues_sentence(text[begin..end].trim_end(), next) {
            pending = Some(begin);
            continue;
        }
        let sentence = text[begin..end].trim();
        if !sentence.is_empty() {
            sentences.push(sentence);
        }
    }

    if let Some(begin) = pending {
        let sentence = text[begin..].trim();
        if !sentence.is_empty() {
            sentences.push(sentence);
        }
    }

    sentences
}

fn bare_word(word: &str) -> &str {
    word.trim_matches(|c: char| !c.is_alphanumeric())
}

fn is_initial(word: &str) -> bool {
    let Some(letter) = word.strip_suffix('.') else {
        return false;
    };
    let mut chars = letter.chars();
    matches!((chars.next(), chars.next()), (Some(c), None) if c.is_uppercase())
}

fn starts_uppercase(word: &str) -> bool {
    bare_word(word).chars().next().is_some_and(char::is_uppercase)
}

/// Whether the period ending `sentence` belongs to an abbreviation or initial, so the
/// sentence runs on into `next`.
fn continues_sentence(sentence: &str, next: Option<&str>) -> bool {
    let mut words = sentence.split_whitespace().rev();
    let Some(last) = words.next() else {
        return false;
    };
    let Some(body) = last.strip_suffix('.') else {
        return false;
    };
    let last_word = bare_word(body).to_lowercase();
    if last_word.chars().count() >= 2 {
        return ABBREVIATIONS.contains(last_word.as_str());
    }
    if !is_initial(last.trim_start_matches(|c: char| !c.is_alphanumeric())) {
        return false;
    }

    let Some(next_word) = next.and_then(|next| next.split_whitespace().next()) else {
        return false;
    };
    if is_initial(next_word) {
        return true;
    }

    // A middle initial sits between two capitalized name parts.
    match words.next() {
        Some(previous) => {
            starts_uppercase(previous)
                && !LABEL_WORDS.contains(bare_word(previous).to_lowercase().as_str())
                && starts_uppercase(next_word)
        }
        None => false,
    }
}

/// Byte offset where a trailing contraction starts ("n't", "'s", "'ll", ...), if any.
fn clitic_start(word: &str) -> Option<usize> {
    if let Some(stem) = word.strip_suffix("n't") {
        if !stem.is_empty() {
            return Some(stem.len());
        }
    }
    let apostrophe = word.rfind('\'')?;
    if apostrophe > 0 && CLITICS.contains(&&word[apostrophe + 1..]) {
        Some(apostrophe)
    } else {
        None
    }
}

fn split_clitic(word: String) -> impl Iterator<Item = String> {
    let (head, tail) = match clitic_start(&word) {
        Some(at) => (word[..at].to_string(), Some(word[at..].to_string())),
        None => (word, None),
    };
    std::iter::once(head).chain(tail)
}

/// Lowercased word tokens using Unicode word boundaries. Pure punctuation never
/// produces a token, and contractions are split off their word ("don't" -> "do", "n't").
pub fn word_tokens(text: &str) -> impl Iterator<Item = String> + '_ {
    text.unicode_words()
        .map(|word| word.replace('\u{2019}', "'").to_lowercase())
        .flat_map(split_clitic)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_basic_sentences() {
        let sentences = split_sentences("Shares rose. Did they fall? No! They held.");
        assert_eq!(sentences, vec!["Shares rose.", "Did they fall?", "No!", "They held."]);
    }

    #[test]
    fn test_split_keeps_abbreviations_together() {
        let sentences =
            split_sentences("Dr. Smith joined the board. John F. Kennedy was mentioned.");
        assert_eq!(
            sentences,
            vec!["Dr. Smith joined the board.", "John F. Kennedy was mentioned."]
        );
    }

    #[test]
    fn test_split_empty_and_whitespace() {
        assert!(split_sentences("").is_empty());
        assert!(split_sentences("   \n\t ").is_empty());
    }

    #[test]
    fn test_word_tokens_lowercase_without_punctuation() {
        let tokens: Vec<String> = word_tokens("Tim Cook, CEO, spoke!").collect();
        assert_eq!(tokens, vec!["tim", "cook", "ceo", "spoke"]);
    }

    #[test]
    fn test_word_tokens_split_contractions() {
        let tokens: Vec<String> = word_tokens("Apple’s chief didn't say they'll cut O'Neill's team").collect();
        assert_eq!(
            tokens,
            vec!["apple", "'s", "chief", "did", "n't", "say", "they", "'ll", "cut", "o'neill", "'s", "team"]
        );
    }

    #[test]
    fn test_split_single_letter_labels_end_sentences() {
        assert_eq!(
            split_sentences("The company activated Plan B. Shares rose sharply. Revenue fell."),
            vec!["The company activated Plan B.", "Shares rose sharply.", "Revenue fell."]
        );
        assert_eq!(
            split_sentences("Sales of Vitamin C. Profits doubled."),
            vec!["Sales of Vitamin C.", "Profits doubled."]
        );
        assert_eq!(
            split_sentences("The grade was a B. Nobody complained."),
            vec!["The grade was a B.", "Nobody complained."]
        );
    }

    #[test]
    fn test_split_keeps_runs_of_initials() {
        assert_eq!(
            split_sentences("Author J. K. Rowling spoke. Fans cheered."),
            vec!["Author J. K. Rowling spoke.", "Fans cheered."]
        );
    }
}
