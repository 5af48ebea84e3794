use actix_web::{post, web, HttpResponse};
use tracing::info;

use crate::error::ApiError;
use crate::state::AppState;
use crate::types::{resolve_word_count, SummarizeTextRequest, SummaryResponse};

/// Summarize raw text sent as JSON
#[post("/summarize-text")]
pub async fn summarize_text(
    req: web::Json<SummarizeTextRequest>,
    state: web::Data<std::sync::Arc<AppState>>,
) -> actix_web::Result<HttpResponse> {
    let word_count = resolve_word_count(req.word_count, state.config.default_word_count)
        .map_err(ApiError::from)?;

    info!(
        "Summarize text request - Length: {} chars, Target: {} words",
        req.text.len(),
        word_count
    );

    let summary = state
        .summarizer
        .summarize(&req.text, word_count)
        .await
        .map_err(ApiError::from)?;

    Ok(HttpResponse::Ok().json(SummaryResponse {
        summary: summary.text,
    }))
}
