//! Text preparation shared by the summarizer, sentiment scorer and topic extractor.

mod normalize;
mod stopwords;
mod tokenize;

pub use self::normalize::{clean_html, normalize};
pub use self::stopwords::is_stopword;
pub use self::tokenize::{split_sentences, word_tokens};
