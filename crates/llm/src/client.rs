use async_trait::async_trait;
use brevity_common::{AppConfig, Result};
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::error::SummarizationError;
use crate::llm_trait::ChunkSummarizer;
use crate::types::{
    preview, InferenceOptions, InferenceParameters, InferencePayload, InferenceResponse,
    TransportError, TransportResponse,
};

/// Approximate tokens per English word, used to turn word budgets into token lengths
const TOKENS_PER_WORD: f64 = 1.5;

/// Lower bound for `min_length` so very small targets still produce a sentence
const MIN_LENGTH_FLOOR: u32 = 20;

/// Sends one inference request
#[async_trait]
pub trait InferenceTransport: Send + Sync {
    /// POST the payload, returning the status and body of whatever came back
    async fn post(
        &self,
        api_key: &str,
        payload: &InferencePayload,
    ) -> std::result::Result<TransportResponse, TransportError>;
}

/// reqwest-backed transport for the Hugging Face Inference API
#[derive(Debug, Clone)]
pub struct HttpTransport {
    endpoint: String,
    client: Client,
}

impl HttpTransport {
    /// Create new HTTP transport; `timeout` bounds each attempt
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("brevity/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| anyhow::anyhow!("Failed to create HTTP client: {}", e))?;

        Ok(Self {
            endpoint: endpoint.into(),
            client,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl InferenceTransport for HttpTransport {
    async fn post(
        &self,
        api_key: &str,
        payload: &InferencePayload,
    ) -> std::result::Result<TransportResponse, TransportError> {
        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(api_key)
            .json(payload)
            .send()
            .await
            .map_err(|e| TransportError(format!("Failed to send request: {}", e)))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| TransportError(format!("Failed to read response body: {}", e)))?;

        Ok(TransportResponse { status, body })
    }
}

/// Settings for [`HfClient`]
#[derive(Debug, Clone)]
pub struct HfClientConfig {
    /// API token; `None` makes every call fail with `MissingCredential`
    pub api_key: Option<String>,

    /// Model identifier, e.g. `facebook/bart-large-cnn`
    pub model: String,

    /// API base URL
    pub api_base: String,

    /// Per-attempt timeout
    pub timeout: Duration,

    /// Attempts per call, including the first
    pub max_attempts: u32,

    /// Wait before retry `n` is `backoff * n`
    pub backoff: Duration,
}

impl HfClientConfig {
    pub fn from_app_config(config: &AppConfig) -> Self {
        Self {
            api_key: config.hf_api_key.clone(),
            model: config.hf_model.clone(),
            api_base: config.hf_api_base.clone(),
            timeout: config.hf_timeout(),
            max_attempts: config.hf_max_attempts,
            backoff: config.hf_backoff(),
        }
    }

    /// Full model endpoint URL
    pub fn endpoint(&self) -> String {
        format!("{}/models/{}", self.api_base.trim_end_matches('/'), self.model)
    }
}

impl Default for HfClientConfig {
    fn default() -> Self {
        Self::from_app_config(&AppConfig::default())
    }
}

/// Hugging Face Inference API summarization client
pub struct HfClient {
    config: HfClientConfig,
    transport: Arc<dyn InferenceTransport>,
}

impl HfClient {
    /// Create new client talking to the configured endpoint over HTTP
    pub fn new(config: HfClientConfig) -> Result<Self> {
        let transport = HttpTransport::new(config.endpoint(), config.timeout)?;

        info!(
            "Inference client initialized: {} (credential configured: {})",
            transport.endpoint(),
            config.api_key.is_some()
        );
        Ok(Self::with_transport(config, Arc::new(transport)))
    }

    /// Create client over an arbitrary transport
    pub fn with_transport(config: HfClientConfig, transport: Arc<dyn InferenceTransport>) -> Self {
        Self { config, transport }
    }

    /// Token bounds `(max_length, min_length)` for a word target
    pub fn length_bounds(target_words: u32) -> (u32, u32) {
        let target = f64::from(target_words);
        let max_length = (target * TOKENS_PER_WORD).round() as u32;
        let min_length = ((target * 0.6 * TOKENS_PER_WORD).round() as u32).max(MIN_LENGTH_FLOOR);

        // Never send an inverted range
        (max_length.max(min_length), min_length)
    }

    /// Build the request body for one chunk
    pub fn build_payload(text: &str, target_words: u32) -> InferencePayload {
        let (max_length, min_length) = Self::length_bounds(target_words);

        InferencePayload {
            inputs: text.to_string(),
            parameters: InferenceParameters {
                max_length,
                min_length,
                do_sample: false,
            },
            options: InferenceOptions {
                wait_for_model: true,
            },
        }
    }

    /// Send the payload, retrying rate limits, cold starts and transport failures
    async fn call_with_retry(
        &self,
        payload: &InferencePayload,
    ) -> std::result::Result<String, SummarizationError> {
        let Some(api_key) = self.config.api_key.as_deref() else {
            warn!("Inference API token not configured, refusing to call {}", self.config.model);
            return Err(SummarizationError::MissingCredential);
        };

        let max_attempts = self.config.max_attempts.max(1);
        let mut last_error = String::from("no attempt made");

        for attempt in 1..=max_attempts {
            match self.transport.post(api_key, payload).await {
                Ok(response) if response.is_success() => {
                    debug!(
                        "Received inference response - Status: {}, Length: {}",
                        response.status,
                        response.body.len()
                    );
                    return InferenceResponse::parse(&response.body)?.into_text();
                }
                Ok(response) if response.is_retryable() => {
                    last_error = format!("status {}", response.status);
                    warn!(
                        "Inference API busy (attempt {}/{}): status {}",
                        attempt, max_attempts, response.status
                    );
                }
                Ok(response) => {
                    return Err(SummarizationError::Status {
                        status: response.status,
                        body: preview(&response.body),
                    });
                }
                Err(e) => {
                    warn!(
                        "Inference request failed (attempt {}/{}): {}",
                        attempt, max_attempts, e
                    );
                    last_error = e.to_string();
                }
            }

            if attempt < max_attempts {
                let delay = self.config.backoff * attempt;
                debug!("Retrying in {:?}", delay);
                tokio::time::sleep(delay).await;
            }
        }

        Err(SummarizationError::RetriesExhausted {
            attempts: max_attempts,
            last: last_error,
        })
    }
}

#[async_trait]
impl ChunkSummarizer for HfClient {
    async fn summarize_chunk(
        &self,
        text: &str,
        target_words: u32,
    ) -> std::result::Result<String, SummarizationError> {
        let payload = Self::build_payload(text, target_words);

        debug!(
            "Sending summarization request - Model: {}, Input length: {}, max_length: {}, min_length: {}",
            self.config.model,
            text.len(),
            payload.parameters.max_length,
            payload.parameters.min_length
        );

        self.call_with_retry(&payload).await
    }
}
