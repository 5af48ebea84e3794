use crate::error::BrevityError;
use config::builder::{ConfigBuilder, DefaultState};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Brevity application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Hugging Face API token (summarization is refused without it)
    pub hf_api_key: Option<String>,

    /// Summarization model identifier
    pub hf_model: String,

    /// Inference API base URL
    pub hf_api_base: String,

    /// Per-attempt request timeout in seconds
    pub hf_timeout_secs: u64,

    /// Maximum attempts per remote call
    pub hf_max_attempts: u32,

    /// Base backoff in seconds, multiplied by the attempt number
    pub hf_backoff_secs: u64,

    /// Words per chunk sent to the model
    pub words_per_chunk: usize,

    /// Chunk summaries requested in parallel
    pub chunk_concurrency: usize,

    /// Target word count when the caller supplies none
    pub default_word_count: u32,

    /// Upload size limit in bytes
    pub max_upload_bytes: usize,

    /// Allowed CORS origins, comma separated ("*" allows any)
    pub cors_origins: String,

    /// Server bind address
    pub server_host: String,

    /// Server port
    pub server_port: u16,

    /// Log directory
    pub log_dir: PathBuf,

    /// Log level
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            hf_api_key: None,
            hf_model: "facebook/bart-large-cnn".to_string(),
            hf_api_base: "https://api-inference.huggingface.co".to_string(),
            hf_timeout_secs: 120,
            hf_max_attempts: 3,
            hf_backoff_secs: 5,
            words_per_chunk: 800,
            chunk_concurrency: 1,
            default_word_count: 150,
            max_upload_bytes: 20 * 1024 * 1024,
            cors_origins: "*".to_string(),
            server_host: "0.0.0.0".to_string(),
            server_port: 8000,
            log_dir: PathBuf::from("./log"),
            log_level: "info".to_string(),
        }
    }
}

/// Find project root by looking for .git directory
fn find_project_root() -> Option<PathBuf> {
    let mut current_dir = std::env::current_dir().ok()?;

    loop {
        if current_dir.join(".git").exists() {
            return Some(current_dir);
        }

        if !current_dir.pop() {
            return None;
        }
    }
}

/// Load `.env` from the project root, or the usual dotenv search outside a checkout
fn load_dotenv_from_project_root() {
    match find_project_root() {
        Some(root) => {
            let env_path = root.join(".env");
            if env_path.exists() {
                dotenv::from_path(&env_path).ok();
            }
        }
        None => {
            dotenv::dotenv().ok();
        }
    }
}

impl AppConfig {
    /// Load configuration from `.env`, an optional config file and environment variables
    ///
    /// Environment variables win over the file. The file defaults to `brevity.{toml,json,yaml}`
    /// in the working directory and can be moved with `BREVITY_CONFIG`.
    pub fn from_env() -> Result<Self, BrevityError> {
        load_dotenv_from_project_root();

        let file = std::env::var("BREVITY_CONFIG").unwrap_or_else(|_| "brevity".to_string());
        let builder = Config::builder()
            .add_source(File::with_name(&file).required(false))
            .add_source(Environment::default());

        Self::from_builder(builder)
    }

    /// Build configuration from prepared sources, then validate it
    pub fn from_builder(builder: ConfigBuilder<DefaultState>) -> Result<Self, BrevityError> {
        let settings = builder
            .build()
            .map_err(|e| BrevityError::config(format!("Failed to read configuration: {}", e)))?;

        let mut config: Self = settings
            .try_deserialize()
            .map_err(|e| BrevityError::config(format!("Invalid configuration: {}", e)))?;

        // An empty token in .env means "not configured"
        config.hf_api_key = config
            .hf_api_key
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty());

        config.validate()?;
        Ok(config)
    }

    /// Get log file path
    pub fn get_log_path(&self, filename: &str) -> PathBuf {
        self.log_dir.join(filename)
    }

    /// Get server bind address (host:port)
    pub fn server_bind_address(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }

    /// Per-attempt timeout for remote calls
    pub fn hf_timeout(&self) -> Duration {
        Duration::from_secs(self.hf_timeout_secs)
    }

    /// Base backoff between retries
    pub fn hf_backoff(&self) -> Duration {
        Duration::from_secs(self.hf_backoff_secs)
    }

    /// Parsed CORS origins
    pub fn cors_origin_list(&self) -> Vec<String> {
        self.cors_origins
            .split(',')
            .map(|origin| origin.trim())
            .filter(|origin| !origin.is_empty())
            .map(|origin| origin.to_string())
            .collect()
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), BrevityError> {
        if self.hf_model.trim().is_empty() {
            return Err(BrevityError::config("Model identifier cannot be empty"));
        }

        if !self.hf_api_base.starts_with("http://") && !self.hf_api_base.starts_with("https://") {
            return Err(BrevityError::config(
                "Inference API base URL must start with http:// or https://",
            ));
        }

        if self.hf_max_attempts == 0 {
            return Err(BrevityError::config("At least one attempt is required"));
        }

        if self.words_per_chunk == 0 {
            return Err(BrevityError::config("Words per chunk must be positive"));
        }

        if self.chunk_concurrency == 0 {
            return Err(BrevityError::config("Chunk concurrency must be positive"));
        }

        if self.default_word_count == 0 {
            return Err(BrevityError::config("Default word count must be positive"));
        }

        // Validate port range
        if self.server_port == 0 {
            return Err(BrevityError::config("Server port cannot be 0"));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::FileFormat;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.server_port, 8000);
        assert_eq!(config.hf_model, "facebook/bart-large-cnn");
        assert_eq!(config.words_per_chunk, 800);
        assert_eq!(config.hf_max_attempts, 3);
        assert_eq!(config.hf_backoff(), Duration::from_secs(5));
        assert_eq!(config.hf_timeout(), Duration::from_secs(120));
        assert!(config.hf_api_key.is_none());
    }

    #[test]
    fn test_server_bind_address() {
        let config = AppConfig::default();
        assert_eq!(config.server_bind_address(), "0.0.0.0:8000");
    }

    #[test]
    fn test_validate() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());

        let mut invalid_config = AppConfig::default();
        invalid_config.hf_api_base = "ftp://example.com".to_string();
        assert!(invalid_config.validate().is_err());

        let mut invalid_config = AppConfig::default();
        invalid_config.words_per_chunk = 0;
        assert!(invalid_config.validate().is_err());

        let mut invalid_config = AppConfig::default();
        invalid_config.hf_max_attempts = 0;
        assert!(invalid_config.validate().is_err());
    }

    #[test]
    fn test_from_builder_overrides_defaults() {
        let toml = r#"
            hf_model = "sshleifer/distilbart-cnn-12-6"
            hf_api_key = "  "
            server_port = 9001
            words_per_chunk = 500
        "#;
        let builder = Config::builder().add_source(File::from_str(toml, FileFormat::Toml));
        let config = AppConfig::from_builder(builder).unwrap();

        assert_eq!(config.hf_model, "sshleifer/distilbart-cnn-12-6");
        assert_eq!(config.server_port, 9001);
        assert_eq!(config.words_per_chunk, 500);
        assert!(config.hf_api_key.is_none());
        assert_eq!(config.hf_backoff_secs, 5);
    }

    #[test]
    fn test_from_builder_rejects_invalid_values() {
        let builder = Config::builder()
            .add_source(File::from_str("chunk_concurrency = 0", FileFormat::Toml));
        assert!(AppConfig::from_builder(builder).is_err());
    }

    #[test]
    fn test_cors_origin_list() {
        let mut config = AppConfig::default();
        assert_eq!(config.cors_origin_list(), vec!["*".to_string()]);

        config.cors_origins = "https://a.example, https://b.example,".to_string();
        assert_eq!(
            config.cors_origin_list(),
            vec!["https://a.example".to_string(), "https://b.example".to_string()]
        );
    }
}
