use anyhow::Result;
use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;
use tracing::warn;

use crate::llm::{DEFAULT_ANALYSIS_TIMEOUT, DEFAULT_GEMINI_ENDPOINT, DEFAULT_GEMINI_MODEL};
use crate::rss::{DEFAULT_MAX_ARTICLES, DEFAULT_NEWS_FEED_URL};
use crate::speech::DEFAULT_SPEECH_LANGUAGE;
use crate::summarizer::DEFAULT_SUMMARY_SENTENCES;

pub const DEFAULT_OUTPUT_DIR: &str = "out";
pub const DEFAULT_PORT: u16 = 8080;

/// Runtime settings, read once at startup.
#[derive(Clone)]
pub struct Config {
    pub api_key: String,
    pub model: String,
    pub endpoint: String,
    pub analysis_timeout: Duration,
    pub feed_url: String,
    pub max_articles: usize,
    pub summary_sentences: usize,
    pub speech_language: String,
    pub output_dir: PathBuf,
    pub port: u16,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Builds the configuration from any variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = lookup("GOOGLE_API_KEY")
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty())
            .ok_or_else(|| anyhow::anyhow!("GOOGLE_API_KEY environment variable is not set"))?;

        let string_or = |name: &str, default: &str| {
            lookup(name)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
                .unwrap_or_else(|| default.to_string())
        };

        Ok(Self {
            api_key,
            model: string_or("GEMINI_MODEL", DEFAULT_GEMINI_MODEL),
            endpoint: string_or("GEMINI_ENDPOINT", DEFAULT_GEMINI_ENDPOINT),
            analysis_timeout: Duration::from_secs(parse_or(
                "ANALYSIS_TIMEOUT_SECS",
                lookup("ANALYSIS_TIMEOUT_SECS"),
                DEFAULT_ANALYSIS_TIMEOUT.as_secs(),
            )),
            feed_url: string_or("NEWS_FEED_URL", DEFAULT_NEWS_FEED_URL),
            max_articles: parse_or("MAX_ARTICLES", lookup("MAX_ARTICLES"), DEFAULT_MAX_ARTICLES),
            summary_sentences: parse_or(
                "SUMMARY_SENTENCES",
                lookup("SUMMARY_SENTENCES"),
                DEFAULT_SUMMARY_SENTENCES,
            ),
            speech_language: string_or("SPEECH_LANGUAGE", DEFAULT_SPEECH_LANGUAGE),
            output_dir: PathBuf::from(string_or("OUTPUT_DIR", DEFAULT_OUTPUT_DIR)),
            port: parse_or("PORT", lookup("PORT"), DEFAULT_PORT),
        })
    }
}

/// Parses a variable, falling back to `default` with a warning when it is unparseable.
fn parse_or<T>(name: &str, value: Option<String>, default: T) -> T
where
    T: FromStr + std::fmt::Display,
{
    match value {
        None => default,
        Some(raw) => match raw.trim().parse() {
            Ok(parsed) => parsed,
            Err(_) => {
                warn!(
                    "Invalid value {:?} for {}, using default {}",
                    raw, name, default
                );
                default
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name: &str| map.get(name).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_lookup(lookup(&[("GOOGLE_API_KEY", "secret")])).unwrap();
        assert_eq!(config.api_key, "secret");
        assert_eq!(config.model, "gemini-1.5-pro");
        assert_eq!(config.endpoint, DEFAULT_GEMINI_ENDPOINT);
        assert_eq!(config.analysis_timeout, Duration::from_secs(20));
        assert_eq!(config.feed_url, "https://news.google.com/rss/search");
        assert_eq!(config.max_articles, 10);
        assert_eq!(config.summary_sentences, 3);
        assert_eq!(config.speech_language, "hi");
        assert_eq!(config.output_dir, PathBuf::from("out"));
        assert_eq!(config.port, 8080);
    }

    #[test]
    fn test_missing_key_is_an_error() {
        assert!(Config::from_lookup(lookup(&[])).is_err());
        assert!(Config::from_lookup(lookup(&[("GOOGLE_API_KEY", "  ")])).is_err());
    }

    #[test]
    fn test_overrides() {
        let config = Config::from_lookup(lookup(&[
            ("GOOGLE_API_KEY", "secret"),
            ("GEMINI_MODEL", "gemini-2.0-flash"),
            ("ANALYSIS_TIMEOUT_SECS", "45"),
            ("MAX_ARTICLES", "5"),
            ("PORT", "9000"),
            ("SPEECH_LANGUAGE", "fr"),
        ]))
        .unwrap();
        assert_eq!(config.model, "gemini-2.0-flash");
        assert_eq!(config.analysis_timeout, Duration::from_secs(45));
        assert_eq!(config.max_articles, 5);
        assert_eq!(config.port, 9000);
        assert_eq!(config.speech_language, "fr");
    }

    #[test]
    fn test_bad_numbers_fall_back() {
        let config = Config::from_lookup(lookup(&[
            ("GOOGLE_API_KEY", "secret"),
            ("MAX_ARTICLES", "ten"),
            ("PORT", "99999"),
            ("SUMMARY_SENTENCES", "-2"),
        ]))
        .unwrap();
        assert_eq!(config.max_articles, 10);
        assert_eq!(config.port, 8080);
        assert_eq!(config.summary_sentences, 3);
    }
}
