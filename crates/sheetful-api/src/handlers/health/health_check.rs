//! Liveness probe handler

use actix_web::{get, HttpResponse, Responder};

use super::models::HealthResponse;

/// GET /health
#[get("/health")]
pub async fn health_handler() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse::healthy(env!("CARGO_PKG_VERSION")))
}
