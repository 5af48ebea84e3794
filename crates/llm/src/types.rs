use serde::{Deserialize, Serialize};

use crate::error::SummarizationError;

/// Inference API request body
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InferencePayload {
    /// Text to summarize
    pub inputs: String,

    /// Generation parameters
    pub parameters: InferenceParameters,

    /// Request options
    pub options: InferenceOptions,
}

/// Length control for summarization models (in tokens)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InferenceParameters {
    pub max_length: u32,
    pub min_length: u32,

    /// Always false: greedy decoding keeps summaries deterministic
    pub do_sample: bool,
}

/// Request options
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InferenceOptions {
    /// Block until a cold model is loaded instead of failing fast
    pub wait_for_model: bool,
}

/// Raw HTTP outcome handed back by a transport
#[derive(Debug, Clone, PartialEq)]
pub struct TransportResponse {
    pub status: u16,
    pub body: String,
}

impl TransportResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Rate limited (429) or model still loading (503)
    pub fn is_retryable(&self) -> bool {
        self.status == 429 || self.status == 503
    }
}

/// Connection-level failure (connect, timeout, body read)
#[derive(Debug, Clone, thiserror::Error)]
#[error("transport failure: {0}")]
pub struct TransportError(pub String);

/// One element of an inference API response
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GeneratedItem {
    #[serde(default)]
    pub summary_text: Option<String>,

    #[serde(default)]
    pub generated_text: Option<String>,

    #[serde(default)]
    pub error: Option<serde_json::Value>,
}

/// Inference API response shapes
///
/// Summarization pipelines answer `[{"summary_text": ..}]`, text generation
/// pipelines `{"generated_text": ..}` or a list of those, and failures
/// `{"error": ..}`.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum InferenceResponse {
    List(Vec<GeneratedItem>),
    Object(GeneratedItem),
}

impl InferenceResponse {
    /// Parse a response body
    pub fn parse(body: &str) -> Result<Self, SummarizationError> {
        serde_json::from_str(body).map_err(|e| {
            SummarizationError::InvalidResponse(format!("{} (body: {})", e, preview(body)))
        })
    }

    /// Pick the output text, preferring `summary_text` over `generated_text`
    pub fn into_text(self) -> Result<String, SummarizationError> {
        let item = match self {
            Self::List(items) => items.into_iter().next().ok_or_else(|| {
                SummarizationError::InvalidResponse("empty result list".to_string())
            })?,
            Self::Object(item) => item,
        };

        if let Some(text) = item.summary_text {
            return Ok(text);
        }
        if let Some(text) = item.generated_text {
            return Ok(text);
        }
        if let Some(error) = item.error {
            return Err(SummarizationError::Remote(error_message(&error)));
        }

        Err(SummarizationError::InvalidResponse(
            "no summary_text or generated_text field".to_string(),
        ))
    }
}

fn error_message(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(message) => message.clone(),
        serde_json::Value::Array(items) => items
            .iter()
            .map(error_message)
            .collect::<Vec<_>>()
            .join("; "),
        other => other.to_string(),
    }
}

/// First 200 characters of a body, for error messages
pub(crate) fn preview(body: &str) -> String {
    body.chars().take(200).collect()
}

/// Summarization result
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    /// Final summary text
    pub text: String,

    /// Number of chunks the document was split into
    pub chunks: usize,

    /// Whether the partial summaries were summarized again
    pub combined: bool,
}

impl Summary {
    /// Create new summary
    pub fn new(text: String, chunks: usize, combined: bool) -> Self {
        Self {
            text,
            chunks,
            combined,
        }
    }
}
