//! Service banner handler

use actix_web::{get, HttpResponse, Responder};

use super::models::ServiceInfoResponse;

/// GET /
#[get("/")]
pub async fn root_handler() -> impl Responder {
    HttpResponse::Ok().json(ServiceInfoResponse {
        message: "Sheetful API - Turn your spreadsheet into a RESTful API".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        docs: env!("CARGO_PKG_REPOSITORY").to_string(),
    })
}
