//! Error types for the sarfix core library.

use thiserror::Error;

use crate::types::FormKey;

/// Top-level error type for all sarfix operations.
///
/// Missing record data is never an error: such records are skipped by the
/// patcher. Errors only come from configuration and from the record store.
#[derive(Error, Debug)]
pub enum PatchError {
    /// Configuration could not be parsed or failed validation.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A form key string was not of the form `XXXXXX:Plugin.esp`.
    #[error("Invalid form key: {0}")]
    InvalidFormKey(String),

    /// The store has no record with the given key.
    #[error("Record not found: {0}")]
    RecordNotFound(FormKey),

    /// The output patch ran out of 24-bit local form ids.
    #[error("Form id space exhausted in {plugin}")]
    FormIdExhausted {
        /// Plugin whose id space is full.
        plugin: String,
    },

    /// Serialization or deserialization failure.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Generic I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<serde_json::Error> for PatchError {
    fn from(e: serde_json::Error) -> Self {
        Self::Serialization(e.to_string())
    }
}

/// Convenience Result type alias.
pub type Result<T> = std::result::Result<T, PatchError>;
