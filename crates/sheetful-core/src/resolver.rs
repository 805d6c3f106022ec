//! Identifier Resolver: sheet token → sheet handle.
//!
//! Resolution is an ordered chain of lookup strategies. Each strategy either
//! finds the sheet, reports not-found (fall through to the next), or fails
//! (stop). Integer-only strategies are skipped without a remote call when the
//! token is not an integer.

use sheetful_commons::models::{SheetHandle, SheetToken};
use sheetful_commons::{Result, SheetError};
use sheetful_gateway::{DocumentStore, GatewayError};

use crate::classify;

/// One way of reading a sheet token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupStrategy {
    /// Numeric sheet id assigned by the remote store.
    ById,
    /// Zero-based position in the document.
    ByIndex,
    /// Exact title.
    ByTitle,
}

/// Fixed precedence: id beats index beats title.
pub const RESOLUTION_ORDER: [LookupStrategy; 3] = [
    LookupStrategy::ById,
    LookupStrategy::ByIndex,
    LookupStrategy::ByTitle,
];

impl LookupStrategy {
    /// `Ok(None)` when the strategy does not apply or nothing matched.
    async fn attempt(
        self,
        store: &dyn DocumentStore,
        token: &SheetToken,
    ) -> std::result::Result<Option<SheetHandle>, GatewayError> {
        match self {
            LookupStrategy::ById => match token.as_integer() {
                Some(id) => store.sheet_by_id(id).await,
                None => Ok(None),
            },
            LookupStrategy::ByIndex => {
                // Negative integers can't be positions
                match token.as_integer().and_then(|i| usize::try_from(i).ok()) {
                    Some(index) => store.sheet_by_index(index).await,
                    None => Ok(None),
                }
            }
            LookupStrategy::ByTitle => store.sheet_by_title(token.as_str()).await,
        }
    }
}

/// Resolve `token` against the sheets of `store`.
///
/// A remote not-found falls through like a miss; any other remote failure
/// stops the chain.
pub async fn resolve_sheet(store: &dyn DocumentStore, token: &SheetToken) -> Result<SheetHandle> {
    for strategy in RESOLUTION_ORDER {
        match strategy.attempt(store, token).await {
            Ok(Some(sheet)) => {
                log::debug!(
                    "Resolved sheet token '{}' via {:?} to '{}' (id {})",
                    token,
                    strategy,
                    sheet.title,
                    sheet.id
                );
                return Ok(sheet);
            }
            Ok(None) => continue,
            Err(e) if e.is_not_found() => continue,
            Err(e) => return Err(classify::read_error(e)),
        }
    }

    Err(SheetError::SheetNotFound(token.to_string()))
}
