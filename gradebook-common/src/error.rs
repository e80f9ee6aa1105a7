//! Common error types for the gradebook

use thiserror::Error;

/// Common result type for gradebook operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by gradebook operations
///
/// Missing or corrupt store files and malformed grade entries are not
/// errors: they recover to zero defaults before reaching this type.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error (wraps serde_json::Error)
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Requested course not present in the curriculum
    #[error("Course not found: {0}")]
    NotFound(String),

    /// Grade value present but not convertible to a number
    #[error("Invalid value: {0}")]
    InvalidValue(String),

    /// Unknown grade field selector
    #[error("Invalid field: {0}")]
    InvalidField(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}
