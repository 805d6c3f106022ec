//! # sheetful-api
//!
//! actix-web surface of Sheetful: handlers, routes, request extractors and
//! the mapping of `SheetError` onto HTTP responses.
//!
//! Handlers expect `web::Data<Arc<SheetsService>>` to be registered as app
//! data, and JSON bodies to be configured with [`json_config`] and query
//! strings with [`query_config`] so malformed input gets the standard error
//! body.

pub mod error;
pub mod extractors;
pub mod handlers;
pub mod routes;

pub use error::{json_config, query_config, ApiError, ErrorResponse};
pub use extractors::AccessToken;
pub use routes::configure_routes;
