//! Error types for the catalog client and the favorites store
//!
//! This module defines the leaf error types used throughout the application.

use thiserror::Error;

/// Errors that can occur while talking to the remote catalog
#[derive(Error, Debug)]
pub enum FetchError {
    /// HTTP request error
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The requested name or id does not resolve to a catalog entry
    #[error("Not found: {0}")]
    NotFound(String),

    /// Non-success status code other than 404
    #[error("Server error: {0}")]
    ServerError(u16),

    /// Request timeout
    #[error("Request timeout")]
    Timeout,

    /// Response body could not be decoded into the expected payload
    #[error("Decoding error: {0}")]
    Decode(String),

    /// Invalid URL
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

impl FetchError {
    /// Whether retrying the same request later could succeed
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Timeout => true,
            Self::ServerError(status) => matches!(status, 429 | 500 | 502 | 503 | 504),
            Self::Http(e) => e.is_timeout() || e.is_connect(),
            Self::NotFound(_) | Self::Decode(_) | Self::InvalidUrl(_) => false,
        }
    }
}

/// Errors that can occur while reading or writing the favorites file
#[derive(Error, Debug)]
pub enum StoreError {
    /// Underlying I/O failure
    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The persisted favorites could not be parsed
    #[error("Corrupt favorites data: {0}")]
    Corrupt(#[source] serde_json::Error),

    /// The favorites could not be serialized
    #[error("Failed to serialize favorites: {0}")]
    Serialize(#[source] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transient_classification() {
        assert!(FetchError::Timeout.is_transient());
        assert!(FetchError::ServerError(503).is_transient());
        assert!(!FetchError::ServerError(400).is_transient());
        assert!(!FetchError::NotFound("missingno".to_string()).is_transient());
    }

    #[test]
    fn test_store_error_display() {
        let err = serde_json::from_str::<Vec<u32>>("not json").unwrap_err();
        let store_err = StoreError::Corrupt(err);
        assert!(store_err.to_string().starts_with("Corrupt favorites data"));
    }
}
