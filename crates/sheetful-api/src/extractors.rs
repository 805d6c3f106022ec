//! Request extractors.

use actix_web::{dev::Payload, http::header, FromRequest, HttpRequest};
use sheetful_commons::SheetError;
use std::future::{ready, Ready};

use crate::error::ApiError;

/// Header carrying a per-request Google access token.
pub const ACCESS_TOKEN_HEADER: &str = "x-google-access-token";

/// Optional per-request access token.
///
/// Read from `Authorization: Bearer <token>` first, then from the
/// `x-google-access-token` header. Other `Authorization` schemes are ignored.
/// When neither is present the service falls back to its static key.
///
/// ```rust,ignore
/// #[get("/{document}/{sheet}/{row}")]
/// async fn handler(token: AccessToken) -> impl Responder {
///     let token: Option<&str> = token.as_deref();
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AccessToken(Option<String>);

impl AccessToken {
    pub fn as_deref(&self) -> Option<&str> {
        self.0.as_deref()
    }

    pub fn is_present(&self) -> bool {
        self.0.is_some()
    }

    fn from_request_headers(req: &HttpRequest) -> Result<Self, SheetError> {
        if let Some(token) = bearer_token(req)? {
            return Ok(Self(Some(token)));
        }

        match req.headers().get(ACCESS_TOKEN_HEADER) {
            Some(value) => {
                let token = value.to_str().map_err(|_| {
                    SheetError::InvalidInput(format!(
                        "{} header contains invalid characters",
                        ACCESS_TOKEN_HEADER
                    ))
                })?;
                let token = token.trim();
                Ok(Self((!token.is_empty()).then(|| token.to_string())))
            }
            None => Ok(Self(None)),
        }
    }
}

fn bearer_token(req: &HttpRequest) -> Result<Option<String>, SheetError> {
    let Some(value) = req.headers().get(header::AUTHORIZATION) else {
        return Ok(None);
    };

    let value = value.to_str().map_err(|_| {
        SheetError::InvalidInput("Authorization header contains invalid characters".to_string())
    })?;

    let mut parts = value.trim().splitn(2, ' ');
    let scheme = parts.next().unwrap_or_default();
    let token = parts.next().map(str::trim).unwrap_or_default();

    if scheme.eq_ignore_ascii_case("bearer") && !token.is_empty() {
        Ok(Some(token.to_string()))
    } else {
        Ok(None)
    }
}

impl FromRequest for AccessToken {
    type Error = ApiError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(Self::from_request_headers(req).map_err(ApiError::from))
    }
}
