//! Health check handlers
//!
//! ## Endpoints
//! - GET / - Service banner
//! - GET /health - Liveness probe
//!
//! Neither endpoint touches the remote store or requires a credential.

pub mod models;

mod health_check;
mod root;

pub use health_check::health_handler;
pub use root::root_handler;
