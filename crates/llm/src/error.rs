use brevity_common::BrevityError;
use thiserror::Error;

/// Failures of a single remote summarization call
///
/// Kept separate from summary text so a caller can never mistake an error
/// message for model output.
#[derive(Debug, Error)]
pub enum SummarizationError {
    /// No API token configured; nothing was sent
    #[error("inference API token is not configured")]
    MissingCredential,

    /// Non-retryable HTTP status from the inference API
    #[error("inference API returned {status}: {body}")]
    Status { status: u16, body: String },

    /// The API answered 200 with an error object
    #[error("inference API reported an error: {0}")]
    Remote(String),

    /// Body did not match any known response shape
    #[error("malformed inference response: {0}")]
    InvalidResponse(String),

    /// Rate limiting, cold start or network failures outlasted every attempt
    #[error("inference API failed after {attempts} attempts: {last}")]
    RetriesExhausted { attempts: u32, last: String },
}

impl From<SummarizationError> for BrevityError {
    fn from(err: SummarizationError) -> Self {
        let message = err.to_string();
        match err {
            SummarizationError::MissingCredential => BrevityError::config(message),
            _ => BrevityError::upstream(message),
        }
    }
}
