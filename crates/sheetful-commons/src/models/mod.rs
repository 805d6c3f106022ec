//! Type-safe wrappers and row models.
//!
//! Identifiers are newtypes around `String` so a document id can never be
//! passed where a sheet token is expected.

mod document_id;
mod record;
mod sheet_handle;
mod sheet_info;
mod sheet_token;

pub use document_id::DocumentId;
pub use record::{cell_to_string, CellValue, Record};
pub use sheet_handle::SheetHandle;
pub use sheet_info::SheetInfo;
pub use sheet_token::SheetToken;
