//! Configuration types, defaults, and TOML/environment loading.

pub mod defaults;
mod loader;
mod types;

pub use types::*;
