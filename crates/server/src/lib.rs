//! Brevity HTTP server
//!
//! Actix-web REST API in front of the summarization pipeline

pub mod error;
pub mod routes;
pub mod state;
pub mod types;

use actix_cors::Cors;
use actix_web::{web, App, HttpServer};
use brevity_common::{AppConfig, BrevityError, Result};
use std::sync::Arc;
use tracing::info;
use tracing_actix_web::TracingLogger;

use crate::error::ApiError;
use crate::state::AppState;

/// Build the CORS policy for the configured origins
pub fn build_cors(origins: &[String]) -> Cors {
    let cors = Cors::default()
        .allow_any_method()
        .allow_any_header()
        .max_age(3600);

    if origins.is_empty() || origins.iter().any(|origin| origin == "*") {
        cors.allow_any_origin()
    } else {
        origins
            .iter()
            .fold(cors, |cors, origin| cors.allowed_origin(origin))
    }
}

/// JSON extractor settings: body limit and JSON error bodies
pub fn json_config(limit: usize) -> web::JsonConfig {
    web::JsonConfig::default().limit(limit).error_handler(|err, _req| {
        ApiError::from(BrevityError::invalid_input(err.to_string())).into()
    })
}

/// Start the HTTP server and run until shutdown
pub async fn start_server(config: AppConfig) -> Result<()> {
    let state = Arc::new(AppState::new(config)?);
    let bind_addr = state.config.server_bind_address();

    info!(
        "Starting HTTP server on {} - Model: {}, Words per chunk: {}",
        bind_addr, state.config.hf_model, state.config.words_per_chunk
    );

    HttpServer::new(move || {
        App::new()
            .wrap(build_cors(&state.config.cors_origin_list()))
            .wrap(TracingLogger::default())
            .app_data(json_config(state.config.max_upload_bytes))
            .app_data(web::Data::new(state.clone()))
            .configure(routes::configure)
    })
    .bind(&bind_addr)?
    .run()
    .await?;

    info!("HTTP server stopped");
    Ok(())
}
