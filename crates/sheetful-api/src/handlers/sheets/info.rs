//! Sheet metadata handler

use actix_web::{get, web, HttpResponse};
use sheetful_core::SheetsService;
use std::sync::Arc;

use super::params::sheet_path;
use crate::error::ApiError;
use crate::extractors::AccessToken;

/// GET /{document}/{sheet}/info
#[get("/{document}/{sheet}/info")]
pub async fn sheet_info_handler(
    path: web::Path<(String, String)>,
    token: AccessToken,
    service: web::Data<Arc<SheetsService>>,
) -> Result<HttpResponse, ApiError> {
    let (document, sheet) = sheet_path(path.into_inner());
    let info = service
        .sheet_info(&document, &sheet, token.as_deref())
        .await?;
    Ok(HttpResponse::Ok().json(info))
}
