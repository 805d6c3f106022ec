//! Resolved sheet handle.

use serde::{Deserialize, Serialize};

/// One sheet inside a document, as reported by the remote store.
///
/// Handles are fetched fresh for every request and never cached: the remote
/// store is the source of truth and sheets may be renamed, reordered, or
/// resized between calls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SheetHandle {
    /// Stable numeric id assigned by the remote store.
    pub id: i64,
    /// Zero-based position of the sheet in the document.
    pub index: usize,
    pub title: String,
    /// Grid rows, including the header row and empty trailing rows.
    pub row_count: usize,
    /// Grid columns.
    pub column_count: usize,
}

impl SheetHandle {
    pub fn new(
        id: i64,
        index: usize,
        title: impl Into<String>,
        row_count: usize,
        column_count: usize,
    ) -> Self {
        Self {
            id,
            index,
            title: title.into(),
            row_count,
            column_count,
        }
    }
}
