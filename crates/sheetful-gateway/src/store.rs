//! Access Gateway contract.
//!
//! Every method is one remote round trip. Nothing is cached: two consecutive
//! lookups of the same sheet hit the remote store twice.

use async_trait::async_trait;
use sheetful_commons::models::{CellValue, DocumentId, SheetHandle};
use std::sync::Arc;

use crate::credential::Credential;
use crate::error::Result;

/// One cell assignment with 1-based physical coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct CellWrite {
    pub row: usize,
    pub column: usize,
    pub value: CellValue,
}

impl CellWrite {
    pub fn new(row: usize, column: usize, value: impl Into<CellValue>) -> Self {
        Self {
            row,
            column,
            value: value.into(),
        }
    }
}

/// Opens documents on the remote store.
#[async_trait]
pub trait AccessGateway: Send + Sync {
    /// Open `document` with `credential`.
    ///
    /// Fails with `Unauthorized` when the credential is rejected and with
    /// `NotFound`/`Forbidden` when the document cannot be reached.
    async fn open(
        &self,
        document: &DocumentId,
        credential: &Credential,
    ) -> Result<Arc<dyn DocumentStore>>;
}

/// An opened document.
///
/// Lookups return `Ok(None)` when nothing matches so callers can fall through
/// to the next strategy; remote failures are errors.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    fn document_id(&self) -> &DocumentId;

    fn title(&self) -> &str;

    async fn sheet_by_id(&self, id: i64) -> Result<Option<SheetHandle>>;

    async fn sheet_by_index(&self, index: usize) -> Result<Option<SheetHandle>>;

    async fn sheet_by_title(&self, title: &str) -> Result<Option<SheetHandle>>;

    /// Every non-empty row of the sheet, header row first.
    ///
    /// Trailing empty cells of a row may be omitted.
    async fn read_values(&self, sheet: &SheetHandle) -> Result<Vec<Vec<CellValue>>>;

    /// One physical row (1-based). Empty when the row has no values.
    async fn read_row(&self, sheet: &SheetHandle, row: usize) -> Result<Vec<CellValue>>;

    /// Apply all writes as one batch.
    async fn write_cells(&self, sheet: &SheetHandle, writes: &[CellWrite]) -> Result<()>;

    /// Append rows after the last non-empty row, in order, in one call.
    async fn append_rows(&self, sheet: &SheetHandle, rows: Vec<Vec<CellValue>>) -> Result<()>;
}
