use brevity_common::BrevityError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Direct text summarization request
#[derive(Debug, Deserialize)]
pub struct SummarizeTextRequest {
    /// Document text
    pub text: String,

    /// Requested summary length in words
    #[serde(rename = "wordCount")]
    pub word_count: Option<i64>,
}

/// Summarization response
#[derive(Debug, Serialize, Deserialize)]
pub struct SummaryResponse {
    pub summary: String,
}

/// Error body returned for every failed request
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub details: Option<String>,
}

/// Liveness probe response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

/// Service description for `/api/health`
#[derive(Debug, Serialize)]
pub struct ServiceHealth {
    pub ok: bool,
    pub service: &'static str,
    pub time: DateTime<Utc>,
}

/// Resolve a requested word count, falling back to the configured default
pub fn resolve_word_count(requested: Option<i64>, default: u32) -> Result<u32, BrevityError> {
    match requested {
        None => Ok(default),
        Some(count) if count >= 1 => u32::try_from(count)
            .map_err(|_| BrevityError::invalid_input(format!("wordCount {} is too large", count))),
        Some(count) => Err(BrevityError::invalid_input(format!(
            "wordCount must be at least 1, got {}",
            count
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_word_count() {
        assert_eq!(resolve_word_count(None, 150).unwrap(), 150);
        assert_eq!(resolve_word_count(Some(250), 150).unwrap(), 250);
        assert_eq!(resolve_word_count(Some(1), 150).unwrap(), 1);
        assert!(resolve_word_count(Some(0), 150).is_err());
        assert!(resolve_word_count(Some(-5), 150).is_err());
        assert!(resolve_word_count(Some(i64::MAX), 150).is_err());
    }

    #[test]
    fn test_request_uses_camel_case_word_count() {
        let req: SummarizeTextRequest =
            serde_json::from_str(r#"{"text": "abc", "wordCount": 100}"#).unwrap();
        assert_eq!(req.word_count, Some(100));

        let req: SummarizeTextRequest = serde_json::from_str(r#"{"text": "abc"}"#).unwrap();
        assert_eq!(req.word_count, None);
    }
}
