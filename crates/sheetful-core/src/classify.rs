//! Gateway error → `SheetError` classification at operation boundaries.

use sheetful_commons::models::DocumentId;
use sheetful_commons::SheetError;
use sheetful_gateway::GatewayError;

/// Failure while opening a document.
///
/// A rejected credential is an authentication failure; anything else means
/// the document cannot be reached with this credential.
pub fn open_error(document: &DocumentId, err: GatewayError) -> SheetError {
    match err {
        GatewayError::Unauthorized(message) => SheetError::AuthenticationFailure(message),
        other => SheetError::document_inaccessible(document.as_str(), other.to_string()),
    }
}

/// Failure during a read (lookups, snapshots, header reads).
pub fn read_error(err: GatewayError) -> SheetError {
    match err {
        GatewayError::Unauthorized(message) => SheetError::AuthenticationFailure(message),
        other => SheetError::UnclassifiedFailure(other.to_string()),
    }
}

/// Failure during a cell write or append.
pub fn write_error(err: GatewayError) -> SheetError {
    match err {
        GatewayError::Unauthorized(message) => SheetError::AuthenticationFailure(message),
        other => SheetError::MutationFailure(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unauthorized_is_always_authentication() {
        let err = || GatewayError::Unauthorized("expired".to_string());
        let doc = DocumentId::new("d");
        assert_eq!(open_error(&doc, err()).code(), "AUTHENTICATION_FAILURE");
        assert_eq!(read_error(err()).code(), "AUTHENTICATION_FAILURE");
        assert_eq!(write_error(err()).code(), "AUTHENTICATION_FAILURE");
    }

    #[test]
    fn test_boundary_specific_mapping() {
        let doc = DocumentId::new("d");
        let err = || GatewayError::Transport("connection reset".to_string());

        let opened = open_error(&doc, GatewayError::NotFound("x".to_string()));
        assert_eq!(opened.code(), "DOCUMENT_INACCESSIBLE");
        assert!(opened.to_string().contains("'d'"));

        assert_eq!(read_error(err()).code(), "UNCLASSIFIED_FAILURE");
        assert_eq!(write_error(err()).code(), "MUTATION_FAILURE");
    }
}
