//! Sheet metadata returned by the info endpoint.

use serde::{Deserialize, Serialize};

use super::SheetHandle;

/// Grid sheets are the only kind exposed.
pub const SHEET_TYPE_GRID: &str = "GRID";

/// Sheet metadata, serialized in the camelCase shape clients expect.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SheetInfo {
    pub sheet_id: i64,
    pub title: String,
    pub index: usize,
    pub header_values: Vec<String>,
    pub row_count: usize,
    pub column_count: usize,
    pub sheet_type: String,
    pub hidden: bool,
    pub right_to_left: bool,
}

impl SheetInfo {
    /// Build the info payload from a handle and its header row.
    ///
    /// `hidden` and `rightToLeft` are always reported as false.
    pub fn from_handle(sheet: &SheetHandle, header_values: Vec<String>) -> Self {
        Self {
            sheet_id: sheet.id,
            title: sheet.title.clone(),
            index: sheet.index,
            header_values,
            row_count: sheet.row_count,
            column_count: sheet.column_count,
            sheet_type: SHEET_TYPE_GRID.to_string(),
            hidden: false,
            right_to_left: false,
        }
    }
}
