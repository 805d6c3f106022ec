//! # sheetful-commons
//!
//! Shared types used across all Sheetful crates (gateway, core, api, server).
//!
//! ## Type-Safe Wrappers
//!
//! - `DocumentId`: opaque identifier of a remote spreadsheet document
//! - `SheetToken`: caller-supplied sheet reference (numeric id, index, or title)
//! - `SheetHandle`: a concrete sheet resolved inside a document
//! - `Record`: one logical data row keyed by header name
//!
//! ## Example Usage
//!
//! ```rust
//! use sheetful_commons::models::{DocumentId, Record, SheetToken};
//!
//! let document = DocumentId::new("1BxiMVs0XRA5nFMdKvBdBZjgmUUqptlbs74OgvE2upms");
//! let token = SheetToken::new("Class Data");
//! assert_eq!(token.as_integer(), None);
//!
//! let mut record = Record::new();
//! record.insert("name", "Alexandra");
//! assert_eq!(record.get_string("name"), "Alexandra");
//! assert_eq!(record.get_string("missing"), "");
//! ```

pub mod errors;
pub mod models;

pub use errors::{Result, SheetError};
pub use models::{CellValue, DocumentId, Record, SheetHandle, SheetInfo, SheetToken};
