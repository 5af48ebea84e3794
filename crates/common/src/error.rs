/// Brevity error types
#[derive(Debug, thiserror::Error)]
pub enum BrevityError {
    /// Remote inference endpoint returned an error or could not be reached
    #[error("Upstream error: {0}")]
    Upstream(String),

    /// Document text extraction error
    #[error("Extraction error: {0}")]
    Extraction(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Payload exceeds the configured limit
    #[error("Payload too large: {0}")]
    PayloadTooLarge(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// General error (anyhow integration)
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl BrevityError {
    /// Create upstream error
    pub fn upstream<S: Into<String>>(msg: S) -> Self {
        Self::Upstream(msg.into())
    }

    /// Create extraction error
    pub fn extraction<S: Into<String>>(msg: S) -> Self {
        Self::Extraction(msg.into())
    }

    /// Create config error
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Self::Config(msg.into())
    }

    /// Create invalid input error
    pub fn invalid_input<S: Into<String>>(msg: S) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Create payload too large error
    pub fn payload_too_large<S: Into<String>>(msg: S) -> Self {
        Self::PayloadTooLarge(msg.into())
    }

    /// Create internal error
    pub fn internal<S: Into<String>>(msg: S) -> Self {
        Self::Internal(msg.into())
    }
}

// HTTP response conversion (used by the actix-web transport)
impl BrevityError {
    /// Get HTTP status code
    pub fn status_code(&self) -> u16 {
        match self {
            Self::InvalidInput(_) => 400,
            Self::PayloadTooLarge(_) => 413,
            Self::Extraction(_) => 422,
            Self::Upstream(_) => 502,
            Self::Config(_) => 500,
            Self::Internal(_) => 500,
            Self::Io(_) => 500,
            Self::Json(_) => 400,
            Self::Other(_) => 500,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(BrevityError::invalid_input("wordCount").status_code(), 400);
        assert_eq!(BrevityError::payload_too_large("big").status_code(), 413);
        assert_eq!(BrevityError::extraction("broken pdf").status_code(), 422);
        assert_eq!(BrevityError::upstream("503").status_code(), 502);
        assert_eq!(BrevityError::config("no key").status_code(), 500);
    }

    #[test]
    fn test_display_includes_message() {
        let err = BrevityError::upstream("model loading");
        assert_eq!(err.to_string(), "Upstream error: model loading");
    }
}
