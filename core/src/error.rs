//! Error types for core phonebook operations.
//!
//! Covers field-name parsing, reading import sources, and configuration
//! loading.

use thiserror::Error;

/// Errors that can occur outside the storage layer.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Field name is not one of `first_name` or `phone_number`.
    #[error("unknown field '{0}': must be first_name or phone_number")]
    UnknownField(String),

    /// File I/O failure.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// YAML parsing or serialization failure.
    #[error("YAML error: {0}")]
    YamlError(#[from] serde_yaml::Error),
}

/// Convenience alias for results with [`CoreError`].
pub type Result<T> = std::result::Result<T, CoreError>;
