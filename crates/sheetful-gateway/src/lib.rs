//! # sheetful-gateway
//!
//! Authenticated access to the remote spreadsheet store.
//!
//! The core never talks HTTP itself; it goes through two traits:
//!
//! - [`AccessGateway`]: opens a document given a [`Credential`]
//! - [`DocumentStore`]: sheet lookups, value reads, cell writes and appends
//!
//! Two implementations ship with the crate:
//!
//! - [`GoogleSheetsGateway`]: Google Sheets v4 REST API over `reqwest`
//! - [`MemoryGateway`]: in-process store with the same observable behavior,
//!   used by the test suites

pub mod a1;
pub mod credential;
pub mod error;
pub mod google;
pub mod memory;
pub mod store;

pub use credential::Credential;
pub use error::{GatewayError, Result};
pub use google::{GoogleSheetsGateway, GoogleSheetsOptions};
pub use memory::{MemoryDocument, MemoryGateway};
pub use store::{AccessGateway, CellWrite, DocumentStore};
