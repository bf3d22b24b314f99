//! Error types for the beneficios admin client
//!
//! This module defines all error types used throughout the crate,
//! mirroring the failure taxonomy of the REST backend so controllers
//! can surface precise, user-visible messages.

use thiserror::Error;

/// Main error type for admin client operations
#[derive(Error, Debug)]
pub enum AdminError {
    /// Network failure: no response was received from the backend
    #[error("Network error: {0}")]
    Network(String),

    /// The requested record does not exist (HTTP 404)
    #[error("Beneficio not found: {0}")]
    NotFound(String),

    /// Optimistic-concurrency conflict: the record changed since it was
    /// loaded (HTTP 409, stale version token)
    #[error("Update conflict: {0}")]
    Conflict(String),

    /// Request rejected by server-side validation (HTTP 4xx with detail)
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Backend failure (HTTP 5xx)
    #[error("Server error (status {status}): {detail}")]
    Server { status: u16, detail: String },

    /// Response body could not be decoded into the expected shape
    #[error("Malformed response body: {0}")]
    Decode(String),

    /// Configuration error (bad base URL, missing settings)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Operation cancelled because the owning screen was torn down
    #[error("Operation cancelled")]
    Cancelled,
}

impl AdminError {
    /// Create a network error
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }

    /// Create a not-found error for a record id
    pub fn not_found_id(id: i64) -> Self {
        Self::NotFound(format!("id {id}"))
    }

    /// Create a server error
    pub fn server(status: u16, detail: impl Into<String>) -> Self {
        Self::Server {
            status,
            detail: detail.into(),
        }
    }

    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Check if this error is an optimistic-concurrency conflict
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::Conflict(_))
    }

    /// Check if this error is a missing-record failure
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }

    /// Check if the failure happened before any response was received
    pub fn is_network(&self) -> bool {
        matches!(self, Self::Network(_))
    }

    /// Short user-facing detail line, suitable for a notification
    pub fn detail(&self) -> String {
        self.to_string()
    }
}

/// Result type alias for admin client operations
pub type Result<T> = std::result::Result<T, AdminError>;

impl From<reqwest::Error> for AdminError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            AdminError::Decode(err.to_string())
        } else {
            AdminError::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for AdminError {
    fn from(err: serde_json::Error) -> Self {
        AdminError::Decode(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classification_predicates() {
        assert!(AdminError::Conflict("stale version".into()).is_conflict());
        assert!(AdminError::not_found_id(42).is_not_found());
        assert!(AdminError::network("connection refused").is_network());
        assert!(!AdminError::server(500, "boom").is_conflict());
    }

    #[test]
    fn test_display_messages() {
        let err = AdminError::server(503, "unavailable");
        assert_eq!(err.to_string(), "Server error (status 503): unavailable");

        let err = AdminError::not_found_id(7);
        assert_eq!(err.to_string(), "Beneficio not found: id 7");
    }

    #[test]
    fn test_json_error_maps_to_decode() {
        let bad: std::result::Result<i64, _> = serde_json::from_str("not json");
        let err: AdminError = bad.unwrap_err().into();
        assert!(matches!(err, AdminError::Decode(_)));
    }
}
