//! Catalog error types.

use thiserror::Error;

/// Errors that can occur while building or loading a catalog.
#[derive(Error, Debug)]
pub enum CatalogError {
    /// Category label is not part of the fixed set.
    #[error("Unknown category: {0}")]
    UnknownCategory(String),

    /// Two records share one id.
    #[error("Duplicate product id: {0}")]
    DuplicateProductId(String),

    /// Seed file could not be read.
    #[error("Failed to read catalog file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Serialization error.
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// Validation error.
    #[error("Validation error: {0}")]
    ValidationError(String),
}

impl From<serde_json::Error> for CatalogError {
    fn from(e: serde_json::Error) -> Self {
        CatalogError::SerializationError(e.to_string())
    }
}
