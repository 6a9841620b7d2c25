//! Error types for elbas.

use thiserror::Error;

/// Result type alias for elbas operations.
pub type Result<T> = std::result::Result<T, ElbasError>;

/// Errors that can occur while fetching and transforming price data.
#[derive(Error, Debug)]
pub enum ElbasError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(String),

    /// HTTP request timed out.
    #[error("Request timed out: {0}")]
    Timeout(String),

    /// Server returned a non-success status.
    #[error("Server error: {status}")]
    ServerError {
        /// HTTP status code.
        status: u16,
    },

    /// The response was priced in a different currency than requested.
    #[error("Currency mismatch: requested {expected}, response has {found}")]
    CurrencyMismatch {
        /// The configured currency.
        expected: String,
        /// The currency declared by the response.
        found: String,
    },

    /// A timestamp could not be parsed.
    #[error("Invalid timestamp: {0}")]
    InvalidTimestamp(String),

    /// A column value could not be converted to a number.
    #[error("Invalid number in column {column}: {value:?}")]
    InvalidNumber {
        /// The column the value belongs to.
        column: String,
        /// The raw value.
        value: String,
    },

    /// A date argument could not be parsed.
    #[error("Invalid date: {0}")]
    InvalidDate(String),

    /// JSON (de)serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
