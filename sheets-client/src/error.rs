//! Client error types

use thiserror::Error;

/// Client error type
#[derive(Debug, Error)]
pub enum ClientError {
    /// Client misconfiguration
    #[error("Configuration error: {0}")]
    Config(String),

    /// HTTP request failed (connection, DNS, TLS, body read)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Per-attempt hard timeout elapsed
    #[error("Request timed out after {0}s")]
    Timeout(u64),

    /// Non-2xx HTTP status
    #[error("HTTP status {0}")]
    Status(u16),

    /// Backend answered `{success: false, error}`
    #[error("Backend error: {0}")]
    Backend(String),

    /// Network is down (connectivity probe failed)
    #[error("Network offline")]
    Offline,

    /// Invalid response format
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ClientError {
    /// Whether the retry loop should try again after this error.
    ///
    /// Transport failures, timeouts and bad statuses are worth retrying; a
    /// `{success: false}` answer is the backend's final word and is not.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::Http(_) | Self::Timeout(_) | Self::Status(_) | Self::Offline
        )
    }
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;
