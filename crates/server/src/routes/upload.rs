use actix_multipart::{Field, Multipart};
use actix_web::{routes, web, HttpResponse};
use brevity_common::BrevityError;
use brevity_extract::extract_document;
use futures_util::StreamExt;
use tracing::info;
use uuid::Uuid;

use crate::error::ApiError;
use crate::state::AppState;
use crate::types::{resolve_word_count, SummaryResponse};

/// Upload a PDF (or text file) and summarize it
///
/// Multipart fields: `file` and an optional `wordCount`.
#[routes]
#[post("/upload")]
#[post("/upload/")]
pub async fn upload(
    mut payload: Multipart,
    state: web::Data<std::sync::Arc<AppState>>,
) -> actix_web::Result<HttpResponse> {
    let upload_id = Uuid::new_v4();
    let limit = state.config.max_upload_bytes;
    let mut filename = String::new();
    let mut document = None;
    let mut requested_words = None;

    while let Some(field) = payload.next().await {
        let mut field = field?;
        let content_disposition = field.content_disposition();
        let name = content_disposition.get_name().unwrap_or_default().to_string();

        match name.as_str() {
            "file" => {
                filename = content_disposition
                    .get_filename()
                    .unwrap_or("unknown")
                    .to_string();
                document = Some(read_field(&mut field, limit).await?);
            }
            "wordCount" => {
                let raw = read_field(&mut field, 32).await?;
                requested_words = Some(parse_word_count(&raw).map_err(ApiError::from)?);
            }
            _ => {
                // Drain fields we don't use
                read_field(&mut field, limit).await?;
            }
        }
    }

    let Some(bytes) = document else {
        return Err(ApiError::from(BrevityError::invalid_input("No file uploaded")).into());
    };

    let word_count = resolve_word_count(requested_words, state.config.default_word_count)
        .map_err(ApiError::from)?;

    info!(
        "Upload {} received - File: {}, Size: {} bytes, Target: {} words",
        upload_id,
        filename,
        bytes.len(),
        word_count
    );

    // PDF parsing is CPU bound
    let text = web::block(move || extract_document(&bytes))
        .await
        .map_err(|e| ApiError::from(BrevityError::internal(format!("Extraction task failed: {}", e))))?
        .map_err(ApiError::from)?;

    let summary = state
        .summarizer
        .summarize(&text, word_count)
        .await
        .map_err(ApiError::from)?;

    info!(
        "Upload {} summarized - Chunks: {}, Combined: {}",
        upload_id, summary.chunks, summary.combined
    );

    Ok(HttpResponse::Ok().json(SummaryResponse {
        summary: summary.text,
    }))
}

/// Read a whole multipart field, refusing more than `limit` bytes
async fn read_field(field: &mut Field, limit: usize) -> actix_web::Result<Vec<u8>> {
    let mut data = Vec::new();

    while let Some(chunk) = field.next().await {
        let chunk = chunk?;
        if data.len() + chunk.len() > limit {
            return Err(ApiError::from(BrevityError::payload_too_large(format!(
                "field exceeds {} bytes",
                limit
            )))
            .into());
        }
        data.extend_from_slice(&chunk);
    }

    Ok(data)
}

fn parse_word_count(raw: &[u8]) -> Result<i64, BrevityError> {
    std::str::from_utf8(raw)
        .ok()
        .and_then(|value| value.trim().parse().ok())
        .ok_or_else(|| BrevityError::invalid_input("wordCount must be an integer"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_word_count() {
        assert_eq!(parse_word_count(b"150").unwrap(), 150);
        assert_eq!(parse_word_count(b" 50\r\n").unwrap(), 50);
        assert_eq!(parse_word_count(b"-1").unwrap(), -1);
        assert!(parse_word_count(b"many").is_err());
        assert!(parse_word_count(&[0xff]).is_err());
    }
}
