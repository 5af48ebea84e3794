use brevity_common::{AppConfig, BrevityError, Result};
use futures::stream::{self, StreamExt, TryStreamExt};
use std::sync::Arc;
use tracing::{debug, info};

use crate::chunking::{chunk_words, DEFAULT_WORDS_PER_CHUNK};
use crate::client::{HfClient, HfClientConfig};
use crate::llm_trait::ChunkSummarizer;
use crate::normalize::normalize;
use crate::types::Summary;

/// Returned instead of a summary when the document has no text
pub const NO_EXTRACTABLE_TEXT: &str = "No extractable text found in the document.";

/// Smallest word target requested for a single chunk
const MIN_CHUNK_TARGET: u32 = 60;

/// Chunk summaries lose detail when summarized again; ask for a bit more up front
const CHUNK_TARGET_INFLATION: f64 = 1.3;

/// Word target for each chunk when `chunk_count` chunks share `target_words`
pub fn per_chunk_target(target_words: u32, chunk_count: usize) -> u32 {
    let chunks = chunk_count.max(1) as f64;
    let target = (f64::from(target_words) / chunks * CHUNK_TARGET_INFLATION).round() as u32;
    target.max(MIN_CHUNK_TARGET)
}

/// Summarizer for long text using a chunk-and-combine strategy
pub struct Summarizer {
    client: Arc<dyn ChunkSummarizer>,
    words_per_chunk: usize,
    concurrency: usize,
}

impl Summarizer {
    /// Create new summarizer with default chunking, one chunk at a time
    pub fn new(client: Arc<dyn ChunkSummarizer>) -> Self {
        Self {
            client,
            words_per_chunk: DEFAULT_WORDS_PER_CHUNK,
            concurrency: 1,
        }
    }

    /// Create summarizer backed by the Hugging Face client described by `config`
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let client = HfClient::new(HfClientConfig::from_app_config(config))?;

        Ok(Self::new(Arc::new(client))
            .with_words_per_chunk(config.words_per_chunk)
            .with_concurrency(config.chunk_concurrency))
    }

    pub fn with_words_per_chunk(mut self, words_per_chunk: usize) -> Self {
        self.words_per_chunk = words_per_chunk.max(1);
        self
    }

    /// Number of chunk requests allowed in flight at once
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    /// Summarize `text` to roughly `target_words` words
    ///
    /// Empty documents produce [`NO_EXTRACTABLE_TEXT`] without touching the
    /// remote API. Any failed chunk fails the whole summary.
    pub async fn summarize(&self, text: &str, target_words: u32) -> Result<Summary> {
        if target_words == 0 {
            return Err(BrevityError::invalid_input("target word count must be at least 1"));
        }

        let text = normalize(text);
        if text.is_empty() {
            info!("No text to summarize");
            return Ok(Summary::new(NO_EXTRACTABLE_TEXT.to_string(), 0, false));
        }

        let chunks = chunk_words(&text, self.words_per_chunk);
        let total = chunks.len();
        let chunk_target = per_chunk_target(target_words, total);

        info!(
            "Starting summarization - Length: {} chars, Chunks: {}, Target: {} words ({} per chunk)",
            text.len(),
            total,
            target_words,
            chunk_target
        );

        // buffered() yields in input order, whatever order the requests finish in
        let partials: Vec<String> = stream::iter(chunks.iter().enumerate())
            .map(|(i, chunk)| async move {
                debug!("Summarizing chunk {}/{}", i + 1, total);
                self.client.summarize_chunk(chunk, chunk_target).await
            })
            .buffered(self.concurrency)
            .try_collect()
            .await?;

        let joined = partials.join(" ");

        if total == 1 {
            return Ok(Summary::new(joined, 1, false));
        }

        info!(
            "Combining {} partial summaries - Length: {} chars",
            total,
            joined.len()
        );
        let combined = self.client.summarize_chunk(&joined, target_words).await?;

        Ok(Summary::new(combined, total, true))
    }
}
