//! Error types for the wrapper model.

use thiserror::Error;

/// Result type for model operations.
pub type ModelResult<T> = Result<T, ModelError>;

/// Errors that can occur while building or converting wrappers.
#[derive(Debug, Error)]
pub enum ModelError {
    /// The raw entry lacks one or more required fields (`name`, `uuid`).
    #[error("index entry is missing required field(s): {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),

    /// A field is present but has an unusable type.
    #[error("index entry field '{field}' is invalid: {reason}")]
    InvalidField { field: &'static str, reason: String },

    /// A registered wrapper class refused the entry.
    #[error("index entry rejected by wrapper class '{doc_type}': {reason}")]
    Rejected { doc_type: String, reason: String },

    /// A serialized document did not decode to a JSON object.
    #[error("serialized wrapper is not a JSON object")]
    NotAnObject,

    /// Serialization/deserialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The document resolution service failed.
    #[error("could not resolve document {uuid}: {message}")]
    Resolve { uuid: String, message: String },
}

impl ModelError {
    /// Returns true if this error reports `field` as missing.
    pub fn is_missing(&self, field: &str) -> bool {
        matches!(self, ModelError::MissingFields(fields) if fields.iter().any(|f| *f == field))
    }
}
