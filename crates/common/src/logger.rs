use crate::config::AppConfig;
use crate::error::BrevityError;
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter, Layer,
};

/// Log file name inside the configured log directory
pub const LOG_FILE_NAME: &str = "brevity.log";

/// Build the event filter (RUST_LOG env var takes precedence over the configured level)
pub fn env_filter(log_level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level))
}

/// Initialize logging for the server
///
/// Sets up logging to both console and `<log_dir>/brevity.log`
pub fn setup_logging(config: &AppConfig) -> Result<(), BrevityError> {
    let log_dir = &config.log_dir;
    if !log_dir.exists() {
        std::fs::create_dir_all(log_dir).map_err(|e| {
            BrevityError::config(format!(
                "Failed to create log directory {}: {}",
                log_dir.display(),
                e
            ))
        })?;
    }

    let log_file_path = config.get_log_path(LOG_FILE_NAME);
    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_file_path)
        .map_err(|e| {
            BrevityError::config(format!(
                "Failed to open log file {}: {}",
                log_file_path.display(),
                e
            ))
        })?;

    let filter = env_filter(&config.log_level);

    // Console output layer
    let console_layer = fmt::layer()
        .with_target(true)
        .with_thread_ids(true)
        .with_line_number(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_filter(filter.clone());

    // File output layer
    let file_layer = fmt::layer()
        .with_writer(log_file)
        .with_target(true)
        .with_thread_ids(true)
        .with_line_number(true)
        .with_ansi(false) // Remove ANSI color codes in files
        .with_span_events(FmtSpan::CLOSE)
        .with_filter(filter);

    tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .try_init()
        .map_err(|e| BrevityError::internal(format!("Failed to install log subscriber: {}", e)))?;

    tracing::info!(
        "Logging initialized: level={}, log_file={}",
        config.log_level,
        log_file_path.display()
    );

    Ok(())
}

/// Console-only logging for the CLI
///
/// Writes to stderr so stdout carries nothing but the summary
pub fn setup_console_logging(log_level: &str) -> Result<(), BrevityError> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_env_filter(env_filter(log_level))
        .try_init()
        .map_err(|e| BrevityError::internal(format!("Failed to install log subscriber: {}", e)))?;

    tracing::debug!("Console logging initialized: level={}", log_level);

    Ok(())
}
