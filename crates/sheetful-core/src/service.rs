//! `SheetsService`: the request-level facade over resolver, mapper, query
//! engine and planner.
//!
//! Built once at startup and shared read-only by every handler. Each call
//! opens the document, resolves the sheet and runs one operation; nothing is
//! carried over between calls.

use sheetful_commons::models::{DocumentId, Record, SheetHandle, SheetInfo, SheetToken};
use sheetful_commons::{Result, SheetError};
use sheetful_gateway::{AccessGateway, Credential, DocumentStore};
use std::sync::Arc;

use crate::classify;
use crate::planner;
use crate::query::{self, Filter, Page, MAX_PAGE_LIMIT};
use crate::resolver;

/// Listing request after input validation.
#[derive(Debug, Clone)]
pub struct ListRequest {
    pub page: Page,
    pub filter: Option<Filter>,
}

pub struct SheetsService {
    gateway: Arc<dyn AccessGateway>,
    static_key: Option<String>,
    default_page_limit: usize,
    max_page_limit: usize,
}

impl SheetsService {
    pub fn new(gateway: Arc<dyn AccessGateway>, static_key: Option<String>) -> Self {
        Self {
            gateway,
            static_key: static_key.filter(|k| !k.trim().is_empty()),
            default_page_limit: 100,
            max_page_limit: MAX_PAGE_LIMIT,
        }
    }

    pub fn with_page_limits(mut self, default_limit: usize, max_limit: usize) -> Self {
        self.max_page_limit = max_limit.clamp(1, MAX_PAGE_LIMIT);
        self.default_page_limit = default_limit.clamp(1, self.max_page_limit);
        self
    }

    pub fn has_static_key(&self) -> bool {
        self.static_key.is_some()
    }

    /// Validate raw pagination values, applying defaults for missing ones.
    pub fn page(&self, offset: Option<i64>, limit: Option<i64>) -> Result<Page> {
        Page::new(
            offset.unwrap_or(0),
            limit.unwrap_or(self.default_page_limit as i64),
            self.max_page_limit,
        )
    }

    async fn open(
        &self,
        document: &DocumentId,
        access_token: Option<&str>,
    ) -> Result<Arc<dyn DocumentStore>> {
        let credential = Credential::resolve(access_token, self.static_key.as_deref())
            .ok_or_else(|| {
                SheetError::AuthenticationFailure(
                    "No access token provided and no API key configured".to_string(),
                )
            })?;

        self.gateway
            .open(document, &credential)
            .await
            .map_err(|e| classify::open_error(document, e))
    }

    async fn resolve(
        &self,
        document: &DocumentId,
        token: &SheetToken,
        access_token: Option<&str>,
    ) -> Result<(Arc<dyn DocumentStore>, SheetHandle)> {
        let store = self.open(document, access_token).await?;
        let sheet = resolver::resolve_sheet(store.as_ref(), token).await?;
        Ok((store, sheet))
    }

    /// Filtered, paginated records of a sheet.
    pub async fn list_rows(
        &self,
        document: &DocumentId,
        token: &SheetToken,
        access_token: Option<&str>,
        request: ListRequest,
    ) -> Result<Vec<Record>> {
        log::info!(
            "GET request - Document: {}, Sheet: {}, Params: offset={} limit={} filter={:?}",
            document,
            token,
            request.page.offset(),
            request.page.limit(),
            request.filter
        );

        let (store, sheet) = self.resolve(document, token, access_token).await?;
        let snapshot = planner::read_snapshot(store.as_ref(), &sheet).await?;
        let records = query::query(snapshot.records, request.filter.as_ref(), request.page);

        log_success("retrieved rows", store.as_ref(), &sheet);
        Ok(records)
    }

    /// Sheet metadata including the header row.
    pub async fn sheet_info(
        &self,
        document: &DocumentId,
        token: &SheetToken,
        access_token: Option<&str>,
    ) -> Result<SheetInfo> {
        log::info!("GET request - Document: {}, Sheet: {}, Params: info", document, token);

        let (store, sheet) = self.resolve(document, token, access_token).await?;
        let headers = if sheet.row_count > 0 {
            planner::read_headers(store.as_ref(), &sheet).await?
        } else {
            Vec::new()
        };

        log_success("retrieved sheet info", store.as_ref(), &sheet);
        Ok(SheetInfo::from_handle(&sheet, headers))
    }

    pub async fn get_row(
        &self,
        document: &DocumentId,
        token: &SheetToken,
        index: usize,
        access_token: Option<&str>,
    ) -> Result<Record> {
        log::info!("GET request - Document: {}, Sheet: {}, Params: row={}", document, token, index);

        let (store, sheet) = self.resolve(document, token, access_token).await?;
        let record = planner::get_one(store.as_ref(), &sheet, index).await?;

        log_success("retrieved row", store.as_ref(), &sheet);
        Ok(record)
    }

    pub async fn update_row(
        &self,
        document: &DocumentId,
        token: &SheetToken,
        index: usize,
        update: &Record,
        access_token: Option<&str>,
    ) -> Result<Record> {
        log::info!(
            "PUT request - Document: {}, Sheet: {}, Params: row={} fields={}",
            document,
            token,
            index,
            update.len()
        );

        let (store, sheet) = self.resolve(document, token, access_token).await?;
        let record = planner::update_one(store.as_ref(), &sheet, index, update).await?;

        log_success("updated row", store.as_ref(), &sheet);
        Ok(record)
    }

    pub async fn create_row(
        &self,
        document: &DocumentId,
        token: &SheetToken,
        record: &Record,
        access_token: Option<&str>,
    ) -> Result<Record> {
        log::info!(
            "POST request - Document: {}, Sheet: {}, Params: fields={}",
            document,
            token,
            record.len()
        );

        let (store, sheet) = self.resolve(document, token, access_token).await?;
        let created = planner::create_one(store.as_ref(), &sheet, record).await?;

        log_success("created row", store.as_ref(), &sheet);
        Ok(created)
    }

    /// Returns the number of submitted records.
    pub async fn update_rows_bulk(
        &self,
        document: &DocumentId,
        token: &SheetToken,
        start: usize,
        records: &[Record],
        access_token: Option<&str>,
    ) -> Result<usize> {
        log::info!(
            "PUT bulk request - Document: {}, Sheet: {}, Params: start={} rows={}",
            document,
            token,
            start,
            records.len()
        );

        let (store, sheet) = self.resolve(document, token, access_token).await?;
        let count = planner::update_bulk(store.as_ref(), &sheet, start, records).await?;

        log_success("bulk updated rows", store.as_ref(), &sheet);
        Ok(count)
    }

    /// Returns the number of submitted records.
    pub async fn create_rows_bulk(
        &self,
        document: &DocumentId,
        token: &SheetToken,
        records: &[Record],
        access_token: Option<&str>,
    ) -> Result<usize> {
        log::info!(
            "POST bulk request - Document: {}, Sheet: {}, Params: rows={}",
            document,
            token,
            records.len()
        );

        let (store, sheet) = self.resolve(document, token, access_token).await?;
        let count = planner::create_bulk(store.as_ref(), &sheet, records).await?;

        log_success("bulk created rows", store.as_ref(), &sheet);
        Ok(count)
    }
}

fn log_success(action: &str, store: &dyn DocumentStore, sheet: &SheetHandle) {
    log::info!(
        "Successfully {} - Document: {}, Sheet: {}",
        action,
        store.title(),
        sheet.title
    );
}
