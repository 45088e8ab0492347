//! Error types for reading and analyzing uploaded images.

use std::path::PathBuf;

/// A selected file could not be turned into an encoded image.
#[derive(Debug, thiserror::Error)]
pub enum ReadError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("File is empty: {0}")]
    Empty(PathBuf),
}

/// The analyzer could not produce a result for an image.
#[derive(Debug, thiserror::Error)]
pub enum AnalyzeError {
    #[error("No API key configured for the image analyzer")]
    MissingApiKey,

    #[error("HTTP error: {status}: {message}")]
    Http { status: u16, message: String },

    #[error("Timeout: {0}")]
    Timeout(String),

    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Deserialization error: {0}")]
    Deserialization(String),

    #[error("Analyzer returned no result")]
    EmptyResult,

    #[error("Request error: {0}")]
    Request(String),
}

impl From<reqwest::Error> for AnalyzeError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            AnalyzeError::Timeout(e.to_string())
        } else if e.is_connect() {
            AnalyzeError::Connection(e.to_string())
        } else if e.is_decode() {
            AnalyzeError::Deserialization(e.to_string())
        } else {
            AnalyzeError::Request(e.to_string())
        }
    }
}

impl From<serde_json::Error> for AnalyzeError {
    fn from(e: serde_json::Error) -> Self {
        AnalyzeError::Deserialization(e.to_string())
    }
}
