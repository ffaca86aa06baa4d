//! Domain error types
//!
//! Error hierarchy for Prospect. Per-record validation issues are data, not
//! errors: they are carried on the stored profile and never surface here.
//! All errors are domain-specific and don't expose third-party types.

use thiserror::Error;

/// Main Prospect error type
///
/// This is the primary error type used throughout the application.
/// It wraps specific error types and provides context for error handling.
#[derive(Debug, Error)]
pub enum EtlError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Store-related errors (fatal to the current batch)
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Fetch API errors
    #[error("Fetch error: {0}")]
    Fetch(#[from] FetchError),

    /// Input that cannot be structurally parsed into records
    #[error("Malformed input: {0}")]
    MalformedInput(String),

    /// Run lifecycle violations (e.g. recording against a finalized run)
    #[error("Run error: {0}")]
    Run(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// Generic errors with context
    #[error("{0}")]
    Other(String),
}

/// Profile-store-specific errors
///
/// Errors raised by [`ProfileStore`](crate::adapters::store::ProfileStore)
/// implementations. A store error mid-batch finalizes the owning run as
/// failed; already-persisted records are not rolled back.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The backing store cannot be reached or written
    #[error("Store unavailable: {0}")]
    Unavailable(String),

    /// A write was rejected by the store
    #[error("Write failed: {0}")]
    WriteFailed(String),

    /// A read failed for reasons other than "not found"
    #[error("Read failed: {0}")]
    ReadFailed(String),

    /// Stored data could not be decoded
    #[error("Corrupt store data: {0}")]
    Corrupt(String),
}

/// Fetch-client-specific errors
///
/// Errors raised when fetching profiles from the external API. These
/// don't expose the underlying HTTP client types.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Failed to reach the fetch API
    #[error("Failed to connect to fetch API: {0}")]
    ConnectionFailed(String),

    /// The API rejected the credentials
    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    /// Server error (5xx)
    #[error("Server error: {status} - {message}")]
    ServerError { status: u16, message: String },

    /// Client error (4xx)
    #[error("Client error: {status} - {message}")]
    ClientError { status: u16, message: String },

    /// The response body was not a profile record
    #[error("Invalid response from fetch API: {0}")]
    InvalidResponse(String),

    /// Request timeout
    #[error("Request timeout: {0}")]
    Timeout(String),
}

// Conversion from std::io::Error
impl From<std::io::Error> for EtlError {
    fn from(err: std::io::Error) -> Self {
        EtlError::Io(err.to_string())
    }
}

// Conversion from serde_json::Error
impl From<serde_json::Error> for EtlError {
    fn from(err: serde_json::Error) -> Self {
        EtlError::Serialization(err.to_string())
    }
}

// Conversion from toml parse errors
impl From<toml::de::Error> for EtlError {
    fn from(err: toml::de::Error) -> Self {
        EtlError::Configuration(format!("TOML parse error: {err}"))
    }
}
