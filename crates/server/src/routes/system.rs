use actix_web::{get, http::header, HttpResponse};
use chrono::Utc;

use crate::types::{HealthResponse, ServiceHealth};

/// Landing page points at the health check
#[get("/")]
pub async fn root() -> HttpResponse {
    HttpResponse::TemporaryRedirect()
        .insert_header((header::LOCATION, "/health"))
        .finish()
}

#[get("/health")]
pub async fn health() -> HttpResponse {
    HttpResponse::Ok().json(HealthResponse { status: "ok" })
}

#[get("/api/health")]
pub async fn api_health() -> HttpResponse {
    HttpResponse::Ok().json(ServiceHealth {
        ok: true,
        service: "brevity",
        time: Utc::now(),
    })
}
