use anyhow::{Context, Result};
use axum::{
    extract::{Json, State},
    http::StatusCode,
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{info, warn};

use crate::analyzer::{AnalyzeOptions, NewsAnalyzer, PipelineError};
use crate::report::CompanyReport;

/// Request payload for an analysis.
#[derive(Debug, Deserialize)]
struct AnalyzeRequest {
    company: String,
    sentences: Option<usize>,
    #[serde(default)]
    full_text: bool,
    #[serde(default)]
    translate: bool,
    #[serde(default)]
    speech: bool,
}

impl AnalyzeRequest {
    fn options(&self, defaults: AnalyzeOptions) -> AnalyzeOptions {
        AnalyzeOptions {
            summary_sentences: self.sentences.unwrap_or(defaults.summary_sentences),
            full_text: self.full_text,
            translate: self.translate,
            speech: self.speech,
            skip_analysis: false,
        }
    }
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

#[derive(Serialize)]
struct StatusResponse {
    status: &'static str,
}

type ApiError = (StatusCode, Json<ErrorResponse>);

fn api_error(status: StatusCode, message: impl Into<String>) -> ApiError {
    (
        status,
        Json(ErrorResponse {
            error: message.into(),
        }),
    )
}

fn pipeline_error(err: &PipelineError) -> ApiError {
    match err {
        PipelineError::NoArticles(_) => api_error(StatusCode::NOT_FOUND, err.to_string()),
        PipelineError::Fetch(_) => api_error(StatusCode::BAD_GATEWAY, err.to_string()),
    }
}

pub fn router(analyzer: Arc<NewsAnalyzer>) -> Router {
    Router::new()
        .route("/status", get(status_check))
        .route("/analyze", post(analyze))
        .with_state(analyzer)
}

/// Runs the HTTP API until the process is stopped.
pub async fn serve(analyzer: Arc<NewsAnalyzer>, port: u16) -> Result<()> {
    let addr = format!("0.0.0.0:{}", port);
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    info!("Server running on http://{}", addr);

    axum::serve(listener, router(analyzer).into_make_service())
        .await
        .context("Server error")?;

    Ok(())
}

async fn status_check() -> Json<StatusResponse> {
    Json(StatusResponse { status: "ok" })
}

async fn analyze(
    State(analyzer): State<Arc<NewsAnalyzer>>,
    Json(payload): Json<AnalyzeRequest>,
) -> Result<Json<CompanyReport>, ApiError> {
    let company = payload.company.trim();
    if company.is_empty() {
        return Err(api_error(StatusCode::BAD_REQUEST, "Company name is required."));
    }

    info!("app::api analyze starting for company: {}", company);
    let options = payload.options(analyzer.default_options());

    match analyzer.analyze_company(company, &options).await {
        Ok(report) => Ok(Json(report)),
        Err(e) => {
            warn!("app::api analyze failed for {}: {}", company, e);
            Err(pipeline_error(&e))
        }
    }
}
