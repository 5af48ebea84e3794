use anyhow::{Context, Result};
use brevity_common::{logger, AppConfig};
use brevity_extract::extract_document;
use brevity_llm::Summarizer;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "brevity")]
#[command(about = "Brevity - length-targeted document summarization", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve {
        /// Host to bind to
        #[arg(long)]
        host: Option<String>,

        /// Port to bind to
        #[arg(long)]
        port: Option<u16>,
    },

    /// Summarize a local PDF or text file and print the result
    Summarize {
        /// Document to summarize
        file: PathBuf,

        /// Target summary length in words
        #[arg(long, short = 'w')]
        words: Option<u32>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = AppConfig::from_env()?;

    match cli.command {
        Some(Commands::Summarize { file, words }) => {
            logger::setup_console_logging(&config.log_level)?;
            let words = words.unwrap_or(config.default_word_count);
            summarize_file(&config, file, words).await?;
        }
        Some(Commands::Serve { host, port }) => {
            // Override with CLI arguments
            if let Some(host) = host {
                config.server_host = host;
            }
            if let Some(port) = port {
                config.server_port = port;
            }
            config.validate()?;
            serve(config).await?;
        }
        None => serve(config).await?,
    }

    Ok(())
}

async fn serve(config: AppConfig) -> Result<()> {
    logger::setup_logging(&config)?;

    tracing::info!("Brevity starting...");
    tracing::info!("  Bind: {}", config.server_bind_address());
    tracing::info!("  Model: {}", config.hf_model);
    if config.hf_api_key.is_none() {
        tracing::warn!("HF_API_KEY is not set; summarization requests will fail");
    }

    println!("Server listening on http://{}", config.server_bind_address());

    brevity_server::start_server(config).await?;
    Ok(())
}

async fn summarize_file(config: &AppConfig, file: PathBuf, words: u32) -> Result<()> {
    let bytes = tokio::fs::read(&file)
        .await
        .with_context(|| format!("Failed to read {}", file.display()))?;

    let text = tokio::task::spawn_blocking(move || extract_document(&bytes))
        .await
        .context("Extraction task panicked")??;

    let summarizer = Summarizer::from_config(config)?;
    let summary = summarizer.summarize(&text, words).await?;

    tracing::info!(
        "Summarized {} - Chunks: {}, Combined: {}",
        file.display(),
        summary.chunks,
        summary.combined
    );
    println!("{}", summary.text);

    Ok(())
}
