//! Per-request credential.

use std::fmt;

/// The secret used to open a document.
///
/// A per-request access token always takes precedence over the process-wide
/// static key.
#[derive(Clone, PartialEq, Eq)]
pub enum Credential {
    /// OAuth access token sent as `Authorization: Bearer`.
    AccessToken(String),
    /// Static API key sent as the `key` query parameter.
    ApiKey(String),
}

impl Credential {
    /// Pick the credential for a request, or `None` when neither is usable.
    ///
    /// Blank values count as absent.
    pub fn resolve(access_token: Option<&str>, static_key: Option<&str>) -> Option<Self> {
        let usable = |v: Option<&str>| {
            v.map(str::trim)
                .filter(|v| !v.is_empty())
                .map(str::to_string)
        };

        usable(access_token)
            .map(Credential::AccessToken)
            .or_else(|| usable(static_key).map(Credential::ApiKey))
    }

    pub fn secret(&self) -> &str {
        match self {
            Credential::AccessToken(s) | Credential::ApiKey(s) => s,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Credential::AccessToken(_) => "access_token",
            Credential::ApiKey(_) => "api_key",
        }
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Credential::{}([REDACTED])", self.kind())
    }
}
