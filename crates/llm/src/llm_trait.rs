use crate::error::SummarizationError;
use async_trait::async_trait;

/// Anything that can summarize one chunk of text to roughly `target_words` words
#[async_trait]
pub trait ChunkSummarizer: Send + Sync {
    /// Summarize a single chunk
    async fn summarize_chunk(
        &self,
        text: &str,
        target_words: u32,
    ) -> Result<String, SummarizationError>;
}
