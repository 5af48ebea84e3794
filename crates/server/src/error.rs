use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use brevity_common::BrevityError;
use std::fmt;
use tracing::{error, warn};

use crate::types::ErrorResponse;

/// Adapter turning [`BrevityError`] into a JSON HTTP response
#[derive(Debug)]
pub struct ApiError(pub BrevityError);

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl From<BrevityError> for ApiError {
    fn from(err: BrevityError) -> Self {
        Self(err)
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.0.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        if status.is_server_error() {
            error!("Request failed: {}", self.0);
        } else {
            warn!("Request rejected: {}", self.0);
        }

        HttpResponse::build(status).json(ErrorResponse {
            error: status.canonical_reason().unwrap_or("Error").to_string(),
            details: Some(self.0.to_string()),
        })
    }
}
