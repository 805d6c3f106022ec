//! HTTP error mapping.

use actix_web::http::StatusCode;
use actix_web::{error, web, HttpRequest, HttpResponse, ResponseError};
use serde::{Deserialize, Serialize};
use sheetful_commons::SheetError;
use std::fmt;

/// Error body returned by every failing endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Machine-stable error code, e.g. `SHEET_NOT_FOUND`
    pub error: String,
    /// Human-readable detail including the offending identifier
    pub message: String,
    pub status: u16,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, message: impl Into<String>, status: StatusCode) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
            status: status.as_u16(),
        }
    }
}

/// Wraps `SheetError` so it can be returned from handlers.
#[derive(Debug)]
pub struct ApiError(SheetError);

impl ApiError {
    pub fn inner(&self) -> &SheetError {
        &self.0
    }
}

impl From<SheetError> for ApiError {
    fn from(error: SheetError) -> Self {
        Self(error)
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match &self.0 {
            SheetError::AuthenticationFailure(_) => StatusCode::UNAUTHORIZED,
            SheetError::DocumentInaccessible { .. } => StatusCode::BAD_REQUEST,
            SheetError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            SheetError::SheetNotFound(_) => StatusCode::NOT_FOUND,
            SheetError::RowNotFound(_) => StatusCode::NOT_FOUND,
            SheetError::MutationFailure(_) => StatusCode::INTERNAL_SERVER_ERROR,
            SheetError::UnclassifiedFailure(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        if status.is_server_error() {
            log::error!("{} ({})", self.0, self.0.code());
        } else {
            log::warn!("{} ({})", self.0, self.0.code());
        }

        HttpResponse::build(status).json(ErrorResponse::new(
            self.0.code(),
            self.0.to_string(),
            status,
        ))
    }
}

/// JSON body config: size limit plus the standard error body for payloads
/// that fail to parse.
pub fn json_config(limit: usize) -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(limit)
        .error_handler(json_error_handler)
}

fn json_error_handler(err: error::JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    let message = match &err {
        error::JsonPayloadError::ContentType => {
            "Content-Type must be application/json".to_string()
        }
        error::JsonPayloadError::Deserialize(e) => format!("Malformed JSON body: {}", e),
        other => other.to_string(),
    };
    ApiError::from(SheetError::InvalidInput(message)).into()
}

/// Query string config: the standard error body for unparsable query
/// strings.
pub fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(query_error_handler)
}

fn query_error_handler(err: error::QueryPayloadError, _req: &HttpRequest) -> actix_web::Error {
    ApiError::from(SheetError::InvalidInput(format!("Malformed query string: {}", err))).into()
}
