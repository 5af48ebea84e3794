//! Brevity summarization core
//!
//! Text normalization, word chunking, the Hugging Face inference client
//! and the chunk-and-combine summarization pipeline

mod chunking;
mod client;
mod error;
mod llm_trait;
mod normalize;
mod summarize;
mod types;

pub use chunking::{chunk_words, DEFAULT_WORDS_PER_CHUNK};
pub use client::{HfClient, HfClientConfig, HttpTransport, InferenceTransport};
pub use error::SummarizationError;
pub use llm_trait::ChunkSummarizer;
pub use normalize::normalize;
pub use summarize::{per_chunk_target, Summarizer, NO_EXTRACTABLE_TEXT};
pub use types::{
    InferenceOptions, InferenceParameters, InferencePayload, InferenceResponse, Summary,
    TransportError, TransportResponse,
};
