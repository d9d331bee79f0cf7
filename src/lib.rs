pub mod analyzer;
pub mod app;
pub mod article;
pub mod environment;
pub mod llm;
pub mod logging;
pub mod prompt;
pub mod report;
pub mod rss;
pub mod sentiment;
pub mod speech;
pub mod summarizer;
pub mod text;
pub mod topics;

pub const TARGET_WEB_REQUEST: &str = "web_request";
pub const TARGET_LLM_REQUEST: &str = "llm_request";
