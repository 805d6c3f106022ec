//! # sheetful-core
//!
//! The sheet/row resolution and mapping layer:
//!
//! - [`resolver`]: sheet token → sheet handle (id, then index, then title)
//! - [`mapper`]: header row + positional cells ↔ keyed records
//! - [`query`]: equality filters and offset/limit pagination
//! - [`planner`]: cell writes and appends for single and bulk mutations
//! - [`service`]: [`SheetsService`], the facade used by the HTTP handlers

pub mod classify;
pub mod mapper;
pub mod planner;
pub mod query;
pub mod resolver;
pub mod service;

pub use query::{Filter, Page};
pub use service::{ListRequest, SheetsService};
