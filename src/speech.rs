//! Translation and text-to-speech through the public Google Translate endpoints.

use anyhow::{Context, Result};
use chrono::Utc;
use lazy_static::lazy_static;
use regex::Regex;
use serde_json::Value;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::time::timeout;
use tracing::{debug, info};

use crate::TARGET_WEB_REQUEST;

pub const DEFAULT_SPEECH_LANGUAGE: &str = "hi";
pub const SPEECH_TIMEOUT: Duration = Duration::from_secs(20);
pub const TRANSLATION_CHUNK_CHARS: usize = 4500;
pub const SPEECH_CHUNK_CHARS: usize = 100;

const TRANSLATE_URL: &str = "https://translate.googleapis.com/translate_a/single";
const TTS_URL: &str = "https://translate.google.com/translate_tts";

lazy_static! {
    static ref MARKDOWN_LINK: Regex = Regex::new(r"\[([^\]]*)\]\([^)]*\)").unwrap();
    static ref MARKDOWN_MARKERS: Regex = Regex::new(r"[#*_`>~|]+").unwrap();
    static ref WHITESPACE: Regex = Regex::new(r"\s+").unwrap();
}

/// Splits text on whitespace into chunks of at most `max_chars` characters.
/// A single word longer than the limit is cut at character boundaries.
pub fn chunk_text(text: &str, max_chars: usize) -> Vec<String> {
    let max_chars = max_chars.max(1);
    let mut chunks = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for word in text.split_whitespace() {
        let word_len = word.chars().count();

        if word_len > max_chars {
            if !current.is_empty() {
                chunks.push(std::mem::take(&mut current));
                current_len = 0;
            }
            let chars: Vec<char> = word.chars().collect();
            for piece in chars.chunks(max_chars) {
                chunks.push(piece.iter().collect());
            }
            continue;
        }

        let needed = if current.is_empty() { word_len } else { current_len + 1 + word_len };
        if needed > max_chars {
            chunks.push(std::mem::take(&mut current));
            current_len = 0;
        }
        if !current.is_empty() {
            current.push(' ');
            current_len += 1;
        }
        current.push_str(word);
        current_len += word_len;
    }

    if !current.is_empty() {
        chunks.push(current);
    }
    chunks
}

/// Removes Markdown markers so they are not read aloud.
pub fn strip_markdown(text: &str) -> String {
    let text = MARKDOWN_LINK.replace_all(text, "$1");
    let text = MARKDOWN_MARKERS.replace_all(&text, " ");
    WHITESPACE.replace_all(&text, " ").trim().to_string()
}

/// Concatenates the translated segments of a `translate_a/single` response.
pub fn parse_translation(body: &str) -> Result<String> {
    let value: Value = serde_json::from_str(body).context("Translation response is not JSON")?;
    let segments = value
        .get(0)
        .and_then(Value::as_array)
        .ok_or_else(|| anyhow::anyhow!("Unexpected translation response format"))?;

    Ok(segments
        .iter()
        .filter_map(|segment| segment.get(0).and_then(Value::as_str))
        .collect())
}

async fn get_with_timeout(request: reqwest::RequestBuilder) -> Result<reqwest::Response> {
    match timeout(SPEECH_TIMEOUT, request.send()).await {
        Ok(Ok(response)) => Ok(response.error_for_status()?),
        Ok(Err(e)) => Err(anyhow::anyhow!("Request failed: {}", e.without_url())),
        Err(_) => Err(anyhow::anyhow!(
            "Request timed out after {} seconds",
            SPEECH_TIMEOUT.as_secs()
        )),
    }
}

#[derive(Clone, Debug)]
pub struct Translator {
    client: reqwest::Client,
}

impl Translator {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }

    /// Translates `text` into `target`, detecting the source language.
    pub async fn translate(&self, text: &str, target: &str) -> Result<String> {
        let mut translated = Vec::new();

        for chunk in chunk_text(text, TRANSLATION_CHUNK_CHARS) {
            debug!(target: TARGET_WEB_REQUEST, "Translating {} characters to {}", chunk.len(), target);
            let request = self.client.get(TRANSLATE_URL).query(&[
                ("client", "gtx"),
                ("sl", "auto"),
                ("tl", target),
                ("dt", "t"),
                ("q", chunk.as_str()),
            ]);
            let body = get_with_timeout(request).await?.text().await?;
            translated.push(parse_translation(&body)?);
        }

        info!(target: TARGET_WEB_REQUEST, "Translated {} chunks to {}", translated.len(), target);
        Ok(translated.join(" "))
    }
}

#[derive(Clone, Debug)]
pub struct SpeechSynthesizer {
    client: reqwest::Client,
}

impl SpeechSynthesizer {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }

    /// Renders `text` as MP3 speech into `<dir>/<stem>-<timestamp>.mp3` and returns the path.
    pub async fn synthesize(&self, text: &str, lang: &str, dir: &Path, stem: &str) -> Result<PathBuf> {
        let chunks = chunk_text(&strip_markdown(text), SPEECH_CHUNK_CHARS);
        if chunks.is_empty() {
            return Err(anyhow::anyhow!("No text to synthesize"));
        }

        let total = chunks.len().to_string();
        let mut audio = Vec::new();
        for (idx, chunk) in chunks.iter().enumerate() {
            let idx = idx.to_string();
            let textlen = chunk.chars().count().to_string();
            let request = self.client.get(TTS_URL).query(&[
                ("ie", "UTF-8"),
                ("client", "tw-ob"),
                ("tl", lang),
                ("q", chunk.as_str()),
                ("idx", idx.as_str()),
                ("total", total.as_str()),
                ("textlen", textlen.as_str()),
            ]);
            let bytes = get_with_timeout(request).await?.bytes().await?;
            audio.extend_from_slice(&bytes);
        }

        tokio::fs::create_dir_all(dir)
            .await
            .with_context(|| format!("Failed to create {}", dir.display()))?;
        let path = dir.join(format!("{}-{}.mp3", stem, Utc::now().format("%Y%m%d%H%M%S")));
        tokio::fs::write(&path, &audio)
            .await
            .with_context(|| format!("Failed to write {}", path.display()))?;

        info!("Wrote {} bytes of speech to {}", audio.len(), path.display());
        Ok(path)
    }
}

/// File-name friendly form of a company name.
pub fn file_stem(name: &str) -> String {
    let stem: String = name
        .chars()
        .map(|c| if c.is_alphanumeric() { c.to_ascii_lowercase() } else { '_' })
        .collect();
    let stem = stem.trim_matches('_').to_string();
    if stem.is_empty() {
        "speech".to_string()
    } else {
        stem
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chunk_text_respects_limit() {
        let text = "Apple reported strong earnings and the shares rose sharply";
        let chunks = chunk_text(text, 20);
        assert_eq!(
            chunks,
            vec!["Apple reported", "strong earnings and", "the shares rose", "sharply"]
        );
        assert!(chunks.iter().all(|c| c.chars().count() <= 20));
        assert_eq!(chunks.join(" "), text);
    }

    #[test]
    fn test_chunk_text_long_word() {
        assert_eq!(chunk_text("ab abcdefg c", 3), vec!["ab", "abc", "def", "g", "c"]);
    }

    #[test]
    fn test_chunk_text_empty() {
        assert!(chunk_text("   ", 100).is_empty());
        assert!(chunk_text("", 100).is_empty());
    }

    #[test]
    fn test_chunk_counts_characters() {
        let chunks = chunk_text("कंपनी ने मजबूत कमाई", 10);
        assert!(chunks.iter().all(|c| c.chars().count() <= 10));
        assert_eq!(chunks.join(" "), "कंपनी ने मजबूत कमाई");
    }

    #[test]
    fn test_strip_markdown() {
        assert_eq!(
            strip_markdown("## Overall Sentiment\n- **Positive** tone, see [report](https://x.y)"),
            "Overall Sentiment - Positive tone, see report"
        );
    }

    #[test]
    fn test_parse_translation() {
        let body = r#"[[["नमस्ते ","Hello ",null,null,10],["दुनिया","world",null,null,10]],null,"en"]"#;
        assert_eq!(parse_translation(body).unwrap(), "नमस्ते दुनिया");
    }

    #[test]
    fn test_parse_translation_rejects_other_shapes() {
        assert!(parse_translation("not json").is_err());
        assert!(parse_translation(r#"{"error":"quota"}"#).is_err());
    }

    #[test]
    fn test_file_stem() {
        assert_eq!(file_stem("AT&T Inc."), "at_t_inc");
        assert_eq!(file_stem("???"), "speech");
    }
}
