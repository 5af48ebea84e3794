use brevity_common::{AppConfig, Result};
use brevity_llm::Summarizer;
use std::sync::Arc;

/// Shared application state
pub struct AppState {
    /// Application configuration
    pub config: AppConfig,

    /// Summarization pipeline
    pub summarizer: Arc<Summarizer>,
}

impl AppState {
    /// Create application state with the Hugging Face backed summarizer
    pub fn new(config: AppConfig) -> Result<Self> {
        let summarizer = Summarizer::from_config(&config)?;
        Ok(Self::with_summarizer(config, Arc::new(summarizer)))
    }

    /// Create application state around an existing summarizer
    pub fn with_summarizer(config: AppConfig, summarizer: Arc<Summarizer>) -> Self {
        Self { config, summarizer }
    }
}
