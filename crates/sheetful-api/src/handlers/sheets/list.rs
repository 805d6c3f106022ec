//! Listing handler

use actix_web::{get, web, HttpResponse};
use sheetful_core::{Filter, ListRequest, SheetsService};
use std::sync::Arc;

use super::models::ListRowsQuery;
use super::params::{parse_optional_int, sheet_path};
use crate::error::ApiError;
use crate::extractors::AccessToken;

/// GET /{document}/{sheet}
///
/// `offset` defaults to 0 and `limit` to the configured page size; `limit`
/// outside `[1, max]` or a negative `offset` is rejected with 400. `query` is
/// an optional JSON object of exact-match criteria applied before paging.
#[get("/{document}/{sheet}")]
pub async fn list_rows_handler(
    path: web::Path<(String, String)>,
    query: web::Query<ListRowsQuery>,
    token: AccessToken,
    service: web::Data<Arc<SheetsService>>,
) -> Result<HttpResponse, ApiError> {
    let (document, sheet) = sheet_path(path.into_inner());
    let query = query.into_inner();

    let page = service.page(
        parse_optional_int("offset", query.offset.as_deref())?,
        parse_optional_int("limit", query.limit.as_deref())?,
    )?;
    let filter = query
        .query
        .as_deref()
        .filter(|q| !q.trim().is_empty())
        .map(Filter::parse_json)
        .transpose()?;

    let records = service
        .list_rows(&document, &sheet, token.as_deref(), ListRequest { page, filter })
        .await?;

    Ok(HttpResponse::Ok().json(records))
}
