//! Record Mapper: positional rows ↔ keyed records.
//!
//! Physical row 1 is the header row, so logical row index `i` lives at
//! physical row `i + 2`. Columns are 1-based.

use sheetful_commons::models::{cell_to_string, CellValue, Record};
use sheetful_commons::{Result, SheetError};
use sheetful_gateway::CellWrite;
use std::collections::HashMap;

/// Physical row of the header.
pub const HEADER_ROW: usize = 1;

/// Physical row number of a logical (zero-based) row index.
///
/// `None` when the index has no physical row (overflow).
#[inline]
pub fn row_number_for(index: usize) -> Option<usize> {
    index.checked_add(HEADER_ROW + 1)
}

/// Physical column number of a zero-based header position.
#[inline]
pub fn column_number_for(index: usize) -> usize {
    index + 1
}

fn empty() -> CellValue {
    CellValue::String(String::new())
}

/// Stringify a raw header row.
pub fn headers_from_row(row: &[CellValue]) -> Vec<String> {
    row.iter().map(cell_to_string).collect()
}

/// Zip one positional row against the headers; missing cells become `""`.
///
/// A duplicated header name keeps the position of its first occurrence and
/// the value of its last.
pub fn to_record(row: &[CellValue], headers: &[String]) -> Record {
    let mut record = Record::with_capacity(headers.len());
    for (j, header) in headers.iter().enumerate() {
        let value = row.get(j).cloned().unwrap_or_else(empty);
        record.insert(header.as_str(), value);
    }
    record
}

pub fn to_records(raw_rows: &[Vec<CellValue>], headers: &[String]) -> Vec<Record> {
    raw_rows.iter().map(|row| to_record(row, headers)).collect()
}

/// Zero-based column of the first occurrence of each header name.
fn first_columns(headers: &[String]) -> HashMap<&str, usize> {
    let mut columns = HashMap::with_capacity(headers.len());
    for (j, header) in headers.iter().enumerate() {
        columns.entry(header.as_str()).or_insert(j);
    }
    columns
}

/// Cell writes applying a partial update to logical row `index`.
///
/// One write per key present in the headers, in the update's key order.
/// Keys not in the headers are dropped. An index with no physical row is
/// `InvalidInput`.
pub fn plan_cell_writes(
    headers: &[String],
    index: usize,
    update: &Record,
) -> Result<Vec<CellWrite>> {
    let columns = first_columns(headers);
    let row = row_number_for(index).ok_or_else(|| {
        SheetError::InvalidInput(format!("Row index {} is out of range", index))
    })?;

    Ok(update
        .iter()
        .filter_map(|(key, value)| {
            columns
                .get(key)
                .map(|&j| CellWrite::new(row, column_number_for(j), value.clone()))
        })
        .collect())
}

/// A full positional row in header order for appending.
///
/// Missing keys become `""`; a duplicated header name gets the value in its
/// first column only.
pub fn build_row(headers: &[String], record: &Record) -> Vec<CellValue> {
    let columns = first_columns(headers);

    headers
        .iter()
        .enumerate()
        .map(|(j, header)| {
            if columns.get(header.as_str()) == Some(&j) {
                record.get(header).cloned().unwrap_or_else(empty)
            } else {
                empty()
            }
        })
        .collect()
}

/// Headers and records from one read of the whole sheet.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Snapshot {
    pub headers: Vec<String>,
    pub records: Vec<Record>,
}

impl Snapshot {
    /// Split a raw grid into header row and records. An empty grid yields
    /// neither.
    pub fn from_grid(grid: &[Vec<CellValue>]) -> Self {
        match grid.split_first() {
            Some((header_row, data)) => {
                let headers = headers_from_row(header_row);
                let records = to_records(data, &headers);
                Self { headers, records }
            }
            None => Self::default(),
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
