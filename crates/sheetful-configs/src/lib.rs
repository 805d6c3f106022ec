//! sheetful-configs
//!
//! Server configuration types and loader for Sheetful.

pub mod config;

pub use config::*;
pub use config::defaults;
