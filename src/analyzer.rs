//! The end-to-end company news pipeline.

use anyhow::Result;
use thiserror::Error;
use tracing::{info, warn};

use crate::article::{Article, TextServices};
use crate::environment::Config;
use crate::llm::{analysis_text, AnalysisClient};
use crate::prompt::{comparative_analysis_prompt, final_sentiment_prompt};
use crate::report::{CompanyReport, AUDIO_PLACEHOLDER};
use crate::rss::{create_http_client, fetch_article_text, NewsFetcher, RawArticle};
use crate::speech::{file_stem, SpeechSynthesizer, Translator};
use crate::TARGET_LLM_REQUEST;

pub const ANALYSIS_SKIPPED: &str = "Analysis skipped.";

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("No news articles found. Try another company name.")]
    NoArticles(String),
    #[error("Failed to fetch news: {0:#}")]
    Fetch(#[source] anyhow::Error),
}

/// Per-request switches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnalyzeOptions {
    pub summary_sentences: usize,
    pub full_text: bool,
    pub translate: bool,
    pub speech: bool,
    pub skip_analysis: bool,
}

impl AnalyzeOptions {
    pub fn new(summary_sentences: usize) -> Self {
        Self {
            summary_sentences,
            full_text: false,
            translate: false,
            speech: false,
            skip_analysis: false,
        }
    }
}

pub struct NewsAnalyzer {
    fetcher: NewsFetcher,
    services: TextServices,
    analysis: AnalysisClient,
    translator: Translator,
    speech: SpeechSynthesizer,
    config: Config,
}

impl NewsAnalyzer {
    pub fn new(config: Config) -> Result<Self> {
        let client = create_http_client()?;
        let analysis = AnalysisClient::new(
            client.clone(),
            config.endpoint.clone(),
            config.model.clone(),
            config.api_key.clone(),
            config.analysis_timeout,
        );

        Ok(Self {
            fetcher: NewsFetcher::new(client.clone(), config.feed_url.clone(), config.max_articles),
            services: TextServices::default(),
            analysis,
            translator: Translator::new(client.clone()),
            speech: SpeechSynthesizer::new(client),
            config,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn default_options(&self) -> AnalyzeOptions {
        AnalyzeOptions::new(self.config.summary_sentences)
    }

    pub async fn analyze_company(
        &self,
        company: &str,
        options: &AnalyzeOptions,
    ) -> Result<CompanyReport, PipelineError> {
        let company = company.trim();
        let raw = self
            .fetcher
            .fetch_company_news(company)
            .await
            .map_err(PipelineError::Fetch)?;

        if raw.is_empty() {
            info!("No articles found for {:?}", company);
            return Err(PipelineError::NoArticles(company.to_string()));
        }

        let articles = self.build_articles(raw, options).await;

        let (comparative_analysis, final_sentiment) = if options.skip_analysis {
            (ANALYSIS_SKIPPED.to_string(), ANALYSIS_SKIPPED.to_string())
        } else {
            self.remote_analysis(company, &articles).await
        };

        let mut report = CompanyReport {
            company: company.to_string(),
            articles,
            comparative_analysis,
            final_sentiment,
            translation: None,
            audio: AUDIO_PLACEHOLDER.to_string(),
        };

        if options.translate || options.speech {
            self.add_translation_and_speech(&mut report, options.speech).await;
        }

        Ok(report)
    }

    async fn build_articles(&self, raw: Vec<RawArticle>, options: &AnalyzeOptions) -> Vec<Article> {
        let mut articles = Vec::with_capacity(raw.len());
        for item in raw {
            let full_text = if options.full_text {
                match fetch_article_text(&item.link).await {
                    Ok(text) => Some(text),
                    Err(e) => {
                        warn!("Using feed summary for {}: {:#}", item.link, e);
                        None
                    }
                }
            } else {
                None
            };
            articles.push(self.services.build_article(
                item,
                full_text.as_deref(),
                options.summary_sentences,
            ));
        }
        articles
    }

    async fn remote_analysis(&self, company: &str, articles: &[Article]) -> (String, String) {
        let articles_json = match serde_json::to_string_pretty(articles) {
            Ok(json) => json,
            Err(e) => {
                warn!(target: TARGET_LLM_REQUEST, "Could not serialize articles: {}", e);
                let text = format!("Error: {}", e);
                return (text.clone(), text);
            }
        };

        let comparative = analysis_text(
            self.analysis
                .generate(&comparative_analysis_prompt(company, &articles_json))
                .await,
        );
        let final_sentiment = analysis_text(
            self.analysis
                .generate(&final_sentiment_prompt(company, &articles_json))
                .await,
        );
        (comparative, final_sentiment)
    }

    async fn add_translation_and_speech(&self, report: &mut CompanyReport, speech: bool) {
        let language = self.config.speech_language.as_str();
        let translated = match self.translator.translate(&report.final_sentiment, language).await {
            Ok(text) => text,
            Err(e) => {
                warn!("Translation failed: {:#}", e);
                report.translation = Some(format!("Translation Error: {}", e));
                return;
            }
        };

        if speech {
            match self
                .speech
                .synthesize(
                    &translated,
                    language,
                    &self.config.output_dir,
                    &file_stem(&report.company),
                )
                .await
            {
                Ok(path) => report.audio = path.display().to_string(),
                Err(e) => warn!("Speech synthesis failed: {:#}", e),
            }
        }

        report.translation = Some(translated);
    }
}
