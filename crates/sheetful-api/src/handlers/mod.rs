//! HTTP request handlers
//!
//! - `health`: service banner and liveness
//! - `sheets`: row listing, sheet info, single-row and bulk mutations

pub mod health;
pub mod sheets;
