//! In-process gateway.
//!
//! Mirrors the observable behavior of the Google gateway closely enough for
//! the service and HTTP test suites: sheet lookups by id, index and title,
//! sparse cell writes that grow the grid, appends after the last non-empty
//! row, and read results with trailing empty rows trimmed.

use async_trait::async_trait;
use parking_lot::RwLock;
use sheetful_commons::models::{CellValue, DocumentId, SheetHandle};
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use crate::credential::Credential;
use crate::error::{GatewayError, Result};
use crate::store::{AccessGateway, CellWrite, DocumentStore};

/// Gateway serving documents held in memory.
#[derive(Default)]
pub struct MemoryGateway {
    documents: RwLock<HashMap<DocumentId, Arc<MemoryDocument>>>,
    rejected_secrets: RwLock<HashSet<String>>,
}

impl MemoryGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an empty document and return it for seeding.
    pub fn add_document(&self, id: impl Into<DocumentId>, title: &str) -> Arc<MemoryDocument> {
        let id = id.into();
        let document = Arc::new(MemoryDocument::new(id.clone(), title));
        self.documents.write().insert(id, Arc::clone(&document));
        document
    }

    pub fn document(&self, id: &str) -> Option<Arc<MemoryDocument>> {
        self.documents.read().get(&DocumentId::new(id)).cloned()
    }

    /// Make `open` fail with `Unauthorized` for this secret.
    pub fn reject_credential(&self, secret: impl Into<String>) {
        self.rejected_secrets.write().insert(secret.into());
    }
}

#[async_trait]
impl AccessGateway for MemoryGateway {
    async fn open(
        &self,
        document: &DocumentId,
        credential: &Credential,
    ) -> Result<Arc<dyn DocumentStore>> {
        if self.rejected_secrets.read().contains(credential.secret()) {
            return Err(GatewayError::Unauthorized(
                "Request had invalid authentication credentials".to_string(),
            ));
        }

        let found = self.documents.read().get(document).cloned();
        match found {
            Some(doc) => Ok(doc as Arc<dyn DocumentStore>),
            None => Err(GatewayError::NotFound(format!(
                "Requested entity was not found: {}",
                document
            ))),
        }
    }
}

struct MemorySheet {
    id: i64,
    title: String,
    rows: Vec<Vec<CellValue>>,
}

impl MemorySheet {
    fn last_non_empty_row(&self) -> usize {
        self.rows
            .iter()
            .rposition(|row| row.iter().any(|cell| !is_blank(cell)))
            .map(|i| i + 1)
            .unwrap_or(0)
    }

    fn column_count(&self) -> usize {
        self.rows.iter().map(Vec::len).max().unwrap_or(0)
    }
}

/// A document held by [`MemoryGateway`].
pub struct MemoryDocument {
    id: DocumentId,
    title: String,
    sheets: RwLock<Vec<MemorySheet>>,
    lookups: AtomicUsize,
    fail_writes: AtomicBool,
}

impl MemoryDocument {
    fn new(id: DocumentId, title: &str) -> Self {
        Self {
            id,
            title: title.to_string(),
            sheets: RwLock::new(Vec::new()),
            lookups: AtomicUsize::new(0),
            fail_writes: AtomicBool::new(false),
        }
    }

    /// Append a sheet at the next position. `rows[0]` is the header row.
    pub fn add_sheet<R, C>(&self, id: i64, title: &str, rows: R) -> &Self
    where
        R: IntoIterator<Item = C>,
        C: IntoIterator,
        C::Item: Into<CellValue>,
    {
        let rows = rows
            .into_iter()
            .map(|row| row.into_iter().map(Into::into).collect())
            .collect();
        self.sheets.write().push(MemorySheet {
            id,
            title: title.to_string(),
            rows,
        });
        self
    }

    /// Current cells of a sheet, trailing empty rows trimmed.
    pub fn rows(&self, title: &str) -> Option<Vec<Vec<CellValue>>> {
        self.sheets
            .read()
            .iter()
            .find(|sheet| sheet.title == title)
            .map(|sheet| sheet.rows[..sheet.last_non_empty_row()].to_vec())
    }

    /// Number of sheet lookups served so far.
    pub fn lookup_count(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }

    /// Make every subsequent write or append fail.
    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    fn lookup<F>(&self, predicate: F) -> Option<SheetHandle>
    where
        F: Fn(usize, &MemorySheet) -> bool,
    {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        let sheets = self.sheets.read();
        sheets
            .iter()
            .enumerate()
            .find(|(index, sheet)| predicate(*index, *sheet))
            .map(|(index, sheet)| {
                SheetHandle::new(
                    sheet.id,
                    index,
                    sheet.title.clone(),
                    sheet.rows.len(),
                    sheet.column_count(),
                )
            })
    }

    fn check_writable(&self) -> Result<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(GatewayError::Rejected {
                status: 500,
                message: "Internal error encountered.".to_string(),
            });
        }
        Ok(())
    }

    fn with_sheet<T>(
        &self,
        handle: &SheetHandle,
        f: impl FnOnce(&mut MemorySheet) -> T,
    ) -> Result<T> {
        let mut sheets = self.sheets.write();
        let sheet = sheets
            .iter_mut()
            .find(|sheet| sheet.id == handle.id)
            .ok_or_else(|| {
                GatewayError::NotFound(format!("Unable to parse range: '{}'", handle.title))
            })?;
        Ok(f(sheet))
    }
}

fn is_blank(cell: &CellValue) -> bool {
    match cell {
        CellValue::Null => true,
        CellValue::String(s) => s.is_empty(),
        _ => false,
    }
}

fn empty_cell() -> CellValue {
    CellValue::String(String::new())
}

#[async_trait]
impl DocumentStore for MemoryDocument {
    fn document_id(&self) -> &DocumentId {
        &self.id
    }

    fn title(&self) -> &str {
        &self.title
    }

    async fn sheet_by_id(&self, id: i64) -> Result<Option<SheetHandle>> {
        Ok(self.lookup(|_, sheet| sheet.id == id))
    }

    async fn sheet_by_index(&self, index: usize) -> Result<Option<SheetHandle>> {
        Ok(self.lookup(|position, _| position == index))
    }

    async fn sheet_by_title(&self, title: &str) -> Result<Option<SheetHandle>> {
        Ok(self.lookup(|_, sheet| sheet.title == title))
    }

    async fn read_values(&self, sheet: &SheetHandle) -> Result<Vec<Vec<CellValue>>> {
        self.with_sheet(sheet, |sheet| {
            sheet.rows[..sheet.last_non_empty_row()].to_vec()
        })
    }

    async fn read_row(&self, sheet: &SheetHandle, row: usize) -> Result<Vec<CellValue>> {
        self.with_sheet(sheet, |sheet| {
            row.checked_sub(1)
                .and_then(|i| sheet.rows.get(i))
                .cloned()
                .unwrap_or_default()
        })
    }

    async fn write_cells(&self, sheet: &SheetHandle, writes: &[CellWrite]) -> Result<()> {
        self.check_writable()?;
        if let Some(bad) = writes.iter().find(|w| w.row == 0 || w.column == 0) {
            return Err(GatewayError::Rejected {
                status: 400,
                message: format!("Invalid cell coordinates ({}, {})", bad.row, bad.column),
            });
        }

        self.with_sheet(sheet, |sheet| {
            for write in writes {
                if sheet.rows.len() < write.row {
                    sheet.rows.resize_with(write.row, Vec::new);
                }
                let row = &mut sheet.rows[write.row - 1];
                if row.len() < write.column {
                    row.resize_with(write.column, empty_cell);
                }
                row[write.column - 1] = write.value.clone();
            }
        })
    }

    async fn append_rows(&self, sheet: &SheetHandle, rows: Vec<Vec<CellValue>>) -> Result<()> {
        self.check_writable()?;
        self.with_sheet(sheet, |sheet| {
            let end = sheet.last_non_empty_row();
            sheet.rows.truncate(end);
            sheet.rows.extend(rows);
        })
    }
}
