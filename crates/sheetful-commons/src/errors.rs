//! Error taxonomy shared by the core and the HTTP layer.
//!
//! Every failure that reaches a client is one of these variants. The HTTP
//! status mapping lives in `sheetful-api`; `code()` gives the machine-stable
//! identifier used in response bodies.

use thiserror::Error;

/// Errors surfaced by sheet and row operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SheetError {
    /// No credential was supplied, or the remote store rejected it.
    #[error("Authentication failed: {0}")]
    AuthenticationFailure(String),

    /// Bad document id or missing permission on the document.
    #[error("Cannot access document '{document}': {reason}")]
    DocumentInaccessible { document: String, reason: String },

    /// Request input rejected before reaching the remote store.
    #[error("Invalid request: {0}")]
    InvalidInput(String),

    /// Resolver exhausted id, index and title lookups.
    #[error("Sheet '{0}' not found")]
    SheetNotFound(String),

    /// Logical row index outside the current extent.
    #[error("Row {0} not found")]
    RowNotFound(usize),

    /// The remote store rejected a write.
    #[error("Mutation failed: {0}")]
    MutationFailure(String),

    #[error("{0}")]
    UnclassifiedFailure(String),
}

impl SheetError {
    /// Stable error code for API responses.
    pub fn code(&self) -> &'static str {
        match self {
            SheetError::AuthenticationFailure(_) => "AUTHENTICATION_FAILURE",
            SheetError::DocumentInaccessible { .. } => "DOCUMENT_INACCESSIBLE",
            SheetError::InvalidInput(_) => "INVALID_INPUT",
            SheetError::SheetNotFound(_) => "SHEET_NOT_FOUND",
            SheetError::RowNotFound(_) => "ROW_NOT_FOUND",
            SheetError::MutationFailure(_) => "MUTATION_FAILURE",
            SheetError::UnclassifiedFailure(_) => "UNCLASSIFIED_FAILURE",
        }
    }

    pub fn document_inaccessible(document: impl Into<String>, reason: impl Into<String>) -> Self {
        SheetError::DocumentInaccessible {
            document: document.into(),
            reason: reason.into(),
        }
    }
}

/// Result type for sheet operations
pub type Result<T> = std::result::Result<T, SheetError>;
