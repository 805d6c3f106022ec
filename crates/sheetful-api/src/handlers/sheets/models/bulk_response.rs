use serde::{Deserialize, Serialize};

/// Result of a bulk update or bulk create.
///
/// `affected_rows` is the number of submitted records, not a count verified
/// against the remote store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkOperationResponse {
    pub message: String,
    pub affected_rows: usize,
    pub success: bool,
}

impl BulkOperationResponse {
    pub fn updated(count: usize) -> Self {
        Self {
            message: format!("Successfully updated {} rows", count),
            affected_rows: count,
            success: true,
        }
    }

    pub fn created(count: usize) -> Self {
        Self {
            message: format!("Successfully created {} rows", count),
            affected_rows: count,
            success: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialized_shape() {
        let json = serde_json::to_value(BulkOperationResponse::created(3)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "message": "Successfully created 3 rows",
                "affectedRows": 3,
                "success": true
            })
        );
    }
}
