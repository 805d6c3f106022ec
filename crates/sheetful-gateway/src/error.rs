/// Errors produced while talking to the remote sheet store.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GatewayError {
    /// The credential was rejected (HTTP 401).
    #[error("Credential rejected: {0}")]
    Unauthorized(String),

    /// The credential is valid but lacks permission (HTTP 403).
    #[error("Permission denied: {0}")]
    Forbidden(String),

    /// Document, sheet or range does not exist (HTTP 404).
    #[error("Not found: {0}")]
    NotFound(String),

    /// Any other non-success status.
    #[error("Remote store returned {status}: {message}")]
    Rejected { status: u16, message: String },

    /// Connection, TLS or timeout failure.
    #[error("Transport error: {0}")]
    Transport(String),

    /// Response body did not have the expected shape.
    #[error("Unexpected response: {0}")]
    Decode(String),
}

impl GatewayError {
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, GatewayError::Unauthorized(_))
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, GatewayError::NotFound(_))
    }

    /// Map an HTTP status and its error message to a variant.
    pub fn from_status(status: u16, message: impl Into<String>) -> Self {
        let message = message.into();
        match status {
            401 => GatewayError::Unauthorized(message),
            403 => GatewayError::Forbidden(message),
            404 => GatewayError::NotFound(message),
            _ => GatewayError::Rejected { status, message },
        }
    }
}

impl From<reqwest::Error> for GatewayError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            GatewayError::Decode(e.to_string())
        } else {
            GatewayError::Transport(e.to_string())
        }
    }
}

/// Result type for gateway calls
pub type Result<T> = std::result::Result<T, GatewayError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_status() {
        assert!(GatewayError::from_status(401, "bad token").is_unauthorized());
        assert!(GatewayError::from_status(404, "gone").is_not_found());
        assert_eq!(
            GatewayError::from_status(403, "nope"),
            GatewayError::Forbidden("nope".to_string())
        );
        assert_eq!(
            GatewayError::from_status(429, "slow down"),
            GatewayError::Rejected {
                status: 429,
                message: "slow down".to_string()
            }
        );
    }
}
