//! Bulk handlers

use actix_web::{post, put, web, HttpResponse};
use sheetful_commons::models::Record;
use sheetful_core::SheetsService;
use std::sync::Arc;

use super::models::BulkOperationResponse;
use super::params::{parse_row_index, sheet_path};
use crate::error::ApiError;
use crate::extractors::AccessToken;

/// PUT /{document}/{sheet}/{row}/bulk
///
/// Element `i` of the body is written onto row `row + i`. Target rows are not
/// checked against the current extent. A failed write aborts the remainder.
#[put("/{document}/{sheet}/{row}/bulk")]
pub async fn update_rows_bulk_handler(
    path: web::Path<(String, String, String)>,
    body: web::Json<Vec<Record>>,
    token: AccessToken,
    service: web::Data<Arc<SheetsService>>,
) -> Result<HttpResponse, ApiError> {
    let (document, sheet, row) = path.into_inner();
    let start = parse_row_index(&row)?;
    let (document, sheet) = sheet_path((document, sheet));

    let count = service
        .update_rows_bulk(&document, &sheet, start, &body, token.as_deref())
        .await?;
    Ok(HttpResponse::Ok().json(BulkOperationResponse::updated(count)))
}

/// POST /{document}/{sheet}/bulk
#[post("/{document}/{sheet}/bulk")]
pub async fn create_rows_bulk_handler(
    path: web::Path<(String, String)>,
    body: web::Json<Vec<Record>>,
    token: AccessToken,
    service: web::Data<Arc<SheetsService>>,
) -> Result<HttpResponse, ApiError> {
    let (document, sheet) = sheet_path(path.into_inner());

    let count = service
        .create_rows_bulk(&document, &sheet, &body, token.as_deref())
        .await?;
    Ok(HttpResponse::Ok().json(BulkOperationResponse::created(count)))
}
