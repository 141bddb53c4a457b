//! Unified error type definition

use thiserror::Error;

/// Core layer error type
#[derive(Error, Debug, Clone)]
pub enum CoreError {
    /// Network error (connection refused, DNS, body read failure)
    #[error("Network error: {0}")]
    NetworkError(String),

    /// Request or fetch exceeded its time bound
    #[error("Timed out: {0}")]
    Timeout(String),

    /// Non-success HTTP status returned by the API
    #[error("API error ({status}): {message}")]
    ApiError { status: u16, message: String },

    /// Resource does not exist (HTTP 404)
    #[error("Not found: {0}")]
    NotFound(String),

    /// Credential missing or unreadable
    #[error("Credential error: {0}")]
    CredentialError(String),

    /// serialization error
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// Validation error
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Storage layer error (config / credential files)
    #[error("Storage error: {0}")]
    StorageError(String),

    /// A loader result was requested under an id that was never scheduled
    #[error("No fetch registered under id: {0}")]
    FetchMissing(String),

    /// A page load is already running for this list
    #[error("A page load is already in flight")]
    LoadInFlight,
}

impl CoreError {
    /// Whether it is expected behavior (user input, resource does not exist, etc.) is used for log classification.
    ///
    /// Level `warn` should be used when returning `true` and level `error` when returning `false`.
    /// **Please update this method simultaneously when new variants are added. **
    #[must_use]
    pub fn is_expected(&self) -> bool {
        match self {
            Self::NotFound(_) | Self::ValidationError(_) | Self::LoadInFlight => true,
            Self::ApiError { status, .. } => (400..500).contains(status),
            _ => false,
        }
    }

    /// 资源不存在（用于区分“尚未收藏”与真实错误）
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_) | Self::ApiError { status: 404, .. })
    }
}

impl From<serde_json::Error> for CoreError {
    fn from(e: serde_json::Error) -> Self {
        Self::SerializationError(e.to_string())
    }
}

/// Core layer Result type alias
pub type CoreResult<T> = std::result::Result<T, CoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_expected_classification() {
        assert!(CoreError::NotFound("subject 1".into()).is_expected());
        assert!(CoreError::ApiError {
            status: 400,
            message: "bad".into()
        }
        .is_expected());
        assert!(!CoreError::ApiError {
            status: 500,
            message: "boom".into()
        }
        .is_expected());
        assert!(!CoreError::NetworkError("reset".into()).is_expected());
    }

    #[test]
    fn test_is_not_found() {
        assert!(CoreError::NotFound("x".into()).is_not_found());
        assert!(CoreError::ApiError {
            status: 404,
            message: String::new()
        }
        .is_not_found());
        assert!(!CoreError::Timeout("x".into()).is_not_found());
    }
}
