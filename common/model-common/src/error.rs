//! Error handling for operator API models
//!
//! Every model shares the same error type so callers can treat encode,
//! decode and validation failures uniformly.

/// Error type for model operations
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    /// The in-memory model could not be encoded
    #[error("serialization error: {0}")]
    Serialization(#[source] serde_json::Error),

    /// Input bytes were not well-formed JSON or did not match the model shape
    #[error("deserialization error: {0}")]
    Deserialization(#[source] serde_json::Error),

    /// A field failed its format constraint
    #[error("{field} in body must be of type {reason}")]
    Validation { field: String, reason: String },

    /// The validation context was cancelled or its deadline passed
    #[error("validation cancelled")]
    Cancelled,

    /// Failure of a single element while validating a collection
    #[error("item {index}: {source}")]
    Item {
        index: usize,
        #[source]
        source: Box<ModelError>,
    },
}

impl ModelError {
    /// Create a validation error for a field
    pub fn validation(field: impl Into<String>, reason: impl Into<String>) -> Self {
        ModelError::Validation {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Wrap an error with the index of the collection element that produced it
    pub fn at_index(self, index: usize) -> Self {
        ModelError::Item {
            index,
            source: Box::new(self),
        }
    }

    /// Whether this error (or the error it wraps) came from decoding input
    pub fn is_deserialization(&self) -> bool {
        match self {
            ModelError::Deserialization(_) => true,
            ModelError::Item { source, .. } => source.is_deserialization(),
            _ => false,
        }
    }
}

/// Result type for model operations
pub type ModelResult<T> = Result<T, ModelError>;
