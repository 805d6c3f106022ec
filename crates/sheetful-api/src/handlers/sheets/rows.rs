//! Single-row handlers

use actix_web::{get, post, put, web, HttpResponse};
use sheetful_commons::models::Record;
use sheetful_core::SheetsService;
use std::sync::Arc;

use super::params::{parse_row_index, sheet_path};
use crate::error::ApiError;
use crate::extractors::AccessToken;

/// GET /{document}/{sheet}/{row}
#[get("/{document}/{sheet}/{row}")]
pub async fn get_row_handler(
    path: web::Path<(String, String, String)>,
    token: AccessToken,
    service: web::Data<Arc<SheetsService>>,
) -> Result<HttpResponse, ApiError> {
    let (document, sheet, row) = path.into_inner();
    let index = parse_row_index(&row)?;
    let (document, sheet) = sheet_path((document, sheet));

    let record = service
        .get_row(&document, &sheet, index, token.as_deref())
        .await?;
    Ok(HttpResponse::Ok().json(record))
}

/// PUT /{document}/{sheet}/{row}
///
/// Only keys matching a header are written; the response is the row as read
/// back after the write.
#[put("/{document}/{sheet}/{row}")]
pub async fn update_row_handler(
    path: web::Path<(String, String, String)>,
    body: web::Json<Record>,
    token: AccessToken,
    service: web::Data<Arc<SheetsService>>,
) -> Result<HttpResponse, ApiError> {
    let (document, sheet, row) = path.into_inner();
    let index = parse_row_index(&row)?;
    let (document, sheet) = sheet_path((document, sheet));

    let record = service
        .update_row(&document, &sheet, index, &body, token.as_deref())
        .await?;
    Ok(HttpResponse::Ok().json(record))
}

/// POST /{document}/{sheet}
///
/// Missing columns are written as empty strings. The response is the last
/// row of the sheet as read back after the append.
#[post("/{document}/{sheet}")]
pub async fn create_row_handler(
    path: web::Path<(String, String)>,
    body: web::Json<Record>,
    token: AccessToken,
    service: web::Data<Arc<SheetsService>>,
) -> Result<HttpResponse, ApiError> {
    let (document, sheet) = sheet_path(path.into_inner());

    let record = service
        .create_row(&document, &sheet, &body, token.as_deref())
        .await?;
    Ok(HttpResponse::Ok().json(record))
}
