//! Mutation Planner: single and bulk row mutations.
//!
//! Single-row operations return the post-mutation state through a fresh read
//! instead of echoing the input. Between the write and the re-read another
//! writer may change the sheet, so the returned record reflects whatever the
//! remote store holds at re-read time.

use sheetful_commons::models::{Record, SheetHandle};
use sheetful_commons::{Result, SheetError};
use sheetful_gateway::DocumentStore;

use crate::classify;
use crate::mapper::{self, Snapshot, HEADER_ROW};

/// Read the whole sheet once.
pub async fn read_snapshot(store: &dyn DocumentStore, sheet: &SheetHandle) -> Result<Snapshot> {
    let grid = store
        .read_values(sheet)
        .await
        .map_err(classify::read_error)?;
    Ok(Snapshot::from_grid(&grid))
}

/// Read only the header row.
pub async fn read_headers(store: &dyn DocumentStore, sheet: &SheetHandle) -> Result<Vec<String>> {
    let row = store
        .read_row(sheet, HEADER_ROW)
        .await
        .map_err(classify::read_error)?;
    Ok(mapper::headers_from_row(&row))
}

/// Record at logical `index`, or `RowNotFound`.
pub async fn get_one(
    store: &dyn DocumentStore,
    sheet: &SheetHandle,
    index: usize,
) -> Result<Record> {
    read_snapshot(store, sheet)
        .await?
        .records
        .into_iter()
        .nth(index)
        .ok_or(SheetError::RowNotFound(index))
}

/// Apply a partial update to logical row `index` and return the re-read row.
///
/// Keys missing from the headers are ignored; an update with no known keys
/// performs no write.
pub async fn update_one(
    store: &dyn DocumentStore,
    sheet: &SheetHandle,
    index: usize,
    update: &Record,
) -> Result<Record> {
    let snapshot = read_snapshot(store, sheet).await?;
    if index >= snapshot.len() {
        return Err(SheetError::RowNotFound(index));
    }

    let writes = mapper::plan_cell_writes(&snapshot.headers, index, update)?;
    if !writes.is_empty() {
        store
            .write_cells(sheet, &writes)
            .await
            .map_err(classify::write_error)?;
    }

    get_one(store, sheet, index).await
}

/// Append one row built from `record` and return the last row after re-read.
///
/// A sheet without a header row has no columns to fill and is rejected
/// before any write.
pub async fn create_one(
    store: &dyn DocumentStore,
    sheet: &SheetHandle,
    record: &Record,
) -> Result<Record> {
    let headers = read_headers(store, sheet).await?;
    if headers.is_empty() {
        return Err(missing_headers(sheet));
    }
    let row = mapper::build_row(&headers, record);

    store
        .append_rows(sheet, vec![row])
        .await
        .map_err(classify::write_error)?;

    read_snapshot(store, sheet)
        .await?
        .records
        .into_iter()
        .last()
        .ok_or_else(|| {
            SheetError::UnclassifiedFailure(format!(
                "Sheet '{}' has no rows after append",
                sheet.title
            ))
        })
}

fn missing_headers(sheet: &SheetHandle) -> SheetError {
    SheetError::MutationFailure(format!("Sheet '{}' has no header row", sheet.title))
}

/// Write `records[i]` onto logical row `start + i`, one batch per row.
///
/// Target rows are not checked against the current extent, only against
/// having a physical row at all. The first failed write aborts the rest and
/// fails the whole call; earlier rows stay written.
pub async fn update_bulk(
    store: &dyn DocumentStore,
    sheet: &SheetHandle,
    start: usize,
    records: &[Record],
) -> Result<usize> {
    let last = records.len().saturating_sub(1);
    if start.checked_add(last).and_then(mapper::row_number_for).is_none() {
        return Err(SheetError::InvalidInput(format!(
            "{} row(s) starting at {} are out of range",
            records.len(),
            start
        )));
    }

    let headers = read_headers(store, sheet).await?;

    for (i, record) in records.iter().enumerate() {
        let writes = mapper::plan_cell_writes(&headers, start + i, record)?;
        if writes.is_empty() {
            continue;
        }
        store.write_cells(sheet, &writes).await.map_err(|e| {
            log::warn!(
                "Bulk update aborted at row {} of '{}': {}",
                start + i,
                sheet.title,
                e
            );
            classify::write_error(e)
        })?;
    }

    Ok(records.len())
}

/// Append one row per record in a single call. Returns the submitted count.
pub async fn create_bulk(
    store: &dyn DocumentStore,
    sheet: &SheetHandle,
    records: &[Record],
) -> Result<usize> {
    if records.is_empty() {
        return Ok(0);
    }

    let headers = read_headers(store, sheet).await?;
    if headers.is_empty() {
        return Err(missing_headers(sheet));
    }
    let rows = records
        .iter()
        .map(|record| mapper::build_row(&headers, record))
        .collect();

    store
        .append_rows(sheet, rows)
        .await
        .map_err(classify::write_error)?;

    Ok(records.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use sheetful_commons::models::DocumentId;
    use sheetful_gateway::{AccessGateway, Credential, MemoryDocument, MemoryGateway};
    use std::sync::Arc;

    async fn setup() -> (Arc<MemoryDocument>, Arc<dyn DocumentStore>, SheetHandle) {
        let gateway = MemoryGateway::new();
        let doc = gateway.add_document("doc", "Doc");
        doc.add_sheet(
            0,
            "People",
            vec![vec!["name", "age"], vec!["A", "1"], vec!["B", "2"]],
        );
        let store = gateway
            .open(&DocumentId::new("doc"), &Credential::ApiKey("k".to_string()))
            .await
            .unwrap();
        let sheet = store.sheet_by_title("People").await.unwrap().unwrap();
        (doc, store, sheet)
    }

    fn record(value: serde_json::Value) -> Record {
        serde_json::from_value(value).unwrap()
    }

    #[tokio::test]
    async fn test_get_one() {
        let (_, store, sheet) = setup().await;
        let row = get_one(store.as_ref(), &sheet, 0).await.unwrap();
        assert_eq!(row, record(json!({"name": "A", "age": "1"})));

        let err = get_one(store.as_ref(), &sheet, 2).await.unwrap_err();
        assert_eq!(err, SheetError::RowNotFound(2));
    }

    #[tokio::test]
    async fn test_update_one() {
        let (doc, store, sheet) = setup().await;
        let updated = update_one(store.as_ref(), &sheet, 1, &record(json!({"age": "30", "x": 1})))
            .await
            .unwrap();
        assert_eq!(updated, record(json!({"name": "B", "age": "30"})));
        assert_eq!(doc.rows("People").unwrap()[2], vec![json!("B"), json!("30")]);
    }

    #[tokio::test]
    async fn test_update_one_out_of_range() {
        let (_, store, sheet) = setup().await;
        let err = update_one(store.as_ref(), &sheet, 5, &record(json!({"age": "1"})))
            .await
            .unwrap_err();
        assert_eq!(err.code(), "ROW_NOT_FOUND");
        assert!(err.to_string().contains('5'));
    }

    #[tokio::test]
    async fn test_update_one_without_known_keys_skips_write() {
        let (doc, store, sheet) = setup().await;
        doc.fail_writes(true);
        let row = update_one(store.as_ref(), &sheet, 0, &record(json!({"ghost": "x"})))
            .await
            .unwrap();
        assert_eq!(row.get_string("name"), "A");
    }

    #[tokio::test]
    async fn test_update_one_write_failure() {
        let (doc, store, sheet) = setup().await;
        doc.fail_writes(true);
        let err = update_one(store.as_ref(), &sheet, 0, &record(json!({"age": "9"})))
            .await
            .unwrap_err();
        assert_eq!(err.code(), "MUTATION_FAILURE");
    }

    #[tokio::test]
    async fn test_create_one_fills_missing_columns() {
        let (_, store, sheet) = setup().await;
        let created = create_one(store.as_ref(), &sheet, &record(json!({"name": "C"})))
            .await
            .unwrap();
        assert_eq!(created, record(json!({"name": "C", "age": ""})));

        let row = get_one(store.as_ref(), &sheet, 2).await.unwrap();
        assert_eq!(row.get_string("age"), "");
        assert_eq!(row.get_string("name"), "C");
    }

    #[tokio::test]
    async fn test_create_one_without_header_row() {
        let gateway = MemoryGateway::new();
        gateway
            .add_document("doc", "Doc")
            .add_sheet(4, "Blank", Vec::<Vec<&str>>::new());
        let store = gateway
            .open(&DocumentId::new("doc"), &Credential::ApiKey("k".to_string()))
            .await
            .unwrap();
        let sheet = store.sheet_by_title("Blank").await.unwrap().unwrap();

        let err = create_one(store.as_ref(), &sheet, &record(json!({"name": "C"})))
            .await
            .unwrap_err();
        assert_eq!(err.code(), "MUTATION_FAILURE");
        assert!(err.to_string().contains("Blank"));
        assert!(gateway.document("doc").unwrap().rows("Blank").unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_update_bulk_without_extent_check() {
        let (doc, store, sheet) = setup().await;
        let count = update_bulk(
            store.as_ref(),
            &sheet,
            1,
            &[record(json!({"age": "20"})), record(json!({"name": "Z"}))],
        )
        .await
        .unwrap();
        assert_eq!(count, 2);

        let rows = doc.rows("People").unwrap();
        assert_eq!(rows[2], vec![json!("B"), json!("20")]);
        // Row past the previous extent is created
        assert_eq!(rows[3], vec![json!("Z")]);
    }

    #[tokio::test]
    async fn test_update_bulk_rejects_rows_past_the_last_physical_row() {
        let (doc, store, sheet) = setup().await;
        let err = update_bulk(store.as_ref(), &sheet, usize::MAX, &[record(json!({"name": "X"}))])
            .await
            .unwrap_err();
        assert_eq!(err.code(), "INVALID_INPUT");

        let err = update_bulk(
            store.as_ref(),
            &sheet,
            usize::MAX - 3,
            &[record(json!({"name": "X"})), record(json!({"name": "Y"}))],
        )
        .await
        .unwrap_err();
        assert_eq!(err.code(), "INVALID_INPUT");

        // Header row untouched
        assert_eq!(doc.rows("People").unwrap()[0], vec![json!("name"), json!("age")]);
    }

    #[tokio::test]
    async fn test_update_bulk_aborts_on_failure() {
        let (doc, store, sheet) = setup().await;
        doc.fail_writes(true);
        let err = update_bulk(store.as_ref(), &sheet, 0, &[record(json!({"age": "5"}))])
            .await
            .unwrap_err();
        assert_eq!(err.code(), "MUTATION_FAILURE");
    }

    #[tokio::test]
    async fn test_create_bulk() {
        let (doc, store, sheet) = setup().await;
        let records = vec![
            record(json!({"name": "C"})),
            record(json!({"age": "4"})),
            record(json!({})),
        ];
        let count = create_bulk(store.as_ref(), &sheet, &records).await.unwrap();
        assert_eq!(count, 3);

        let rows = doc.rows("People").unwrap();
        assert_eq!(rows.len(), 5, "trailing all-empty row is not a data row");
        assert_eq!(rows[3], vec![json!("C"), json!("")]);
        assert_eq!(rows[4], vec![json!(""), json!("4")]);
    }

    #[tokio::test]
    async fn test_create_bulk_empty_makes_no_call() {
        let (doc, store, sheet) = setup().await;
        doc.fail_writes(true);
        assert_eq!(create_bulk(store.as_ref(), &sheet, &[]).await.unwrap(), 0);
    }
}
