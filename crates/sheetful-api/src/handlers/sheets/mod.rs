//! Sheet and row handlers
//!
//! ## Endpoints
//! - GET  /{document}/{sheet}?offset=&limit=&query= - List records
//! - GET  /{document}/{sheet}/info - Sheet metadata
//! - GET  /{document}/{sheet}/{row} - One record (zero-based row index)
//! - PUT  /{document}/{sheet}/{row} - Partial update of one record
//! - POST /{document}/{sheet} - Append one record
//! - PUT  /{document}/{sheet}/{row}/bulk - Update consecutive rows starting at `row`
//! - POST /{document}/{sheet}/bulk - Append many records
//!
//! `{sheet}` may be a numeric sheet id, a zero-based sheet position or a
//! title. Every endpoint accepts an optional access token (see
//! [`AccessToken`](crate::extractors::AccessToken)).

pub mod models;

mod bulk;
mod info;
mod list;
mod params;
mod rows;

pub use bulk::{create_rows_bulk_handler, update_rows_bulk_handler};
pub use info::sheet_info_handler;
pub use list::list_rows_handler;
pub use rows::{create_row_handler, get_row_handler, update_row_handler};
