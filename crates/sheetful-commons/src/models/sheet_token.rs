//! Caller-supplied sheet reference.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A loosely-typed sheet reference taken from the request path.
///
/// The same token may name a sheet by numeric id, by zero-based position in
/// the document, or by title. Which interpretation wins is decided by the
/// resolver in `sheetful-core`; this type only exposes the raw text and its
/// integer reading.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SheetToken(String);

impl SheetToken {
    #[inline]
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The token read as a signed integer, if it is one.
    ///
    /// Surrounding whitespace is not accepted: `" 1"` is a title, not an id.
    pub fn as_integer(&self) -> Option<i64> {
        self.0.parse::<i64>().ok()
    }
}

impl fmt::Display for SheetToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for SheetToken {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for SheetToken {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}
