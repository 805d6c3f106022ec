//! Path and query parameter parsing shared by the sheet handlers.

use sheetful_commons::models::{DocumentId, SheetToken};
use sheetful_commons::SheetError;

pub(crate) fn sheet_path((document, sheet): (String, String)) -> (DocumentId, SheetToken) {
    (DocumentId::new(document), SheetToken::new(sheet))
}

/// Zero-based logical row index from a path segment.
pub(crate) fn parse_row_index(raw: &str) -> Result<usize, SheetError> {
    raw.parse::<usize>().map_err(|_| {
        SheetError::InvalidInput(format!(
            "Row index must be a non-negative integer, got '{}'",
            raw
        ))
    })
}

/// Optional integer query parameter. Blank counts as absent.
pub(crate) fn parse_optional_int(name: &str, raw: Option<&str>) -> Result<Option<i64>, SheetError> {
    match raw.map(str::trim).filter(|v| !v.is_empty()) {
        Some(value) => value.parse::<i64>().map(Some).map_err(|_| {
            SheetError::InvalidInput(format!("{} must be an integer, got '{}'", name, value))
        }),
        None => Ok(None),
    }
}
