//! Error types for the reqmodel library.
//!
//! The extraction pipeline itself is total; errors only arise when loading
//! documents or rendering models.

use std::io;
use thiserror::Error;

/// Result type alias for reqmodel operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur around the extraction pipeline.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The document format cannot be turned into plain text.
    #[error("Unsupported document format: {0}")]
    UnsupportedFormat(String),

    /// The document text could not be decoded.
    #[error("Encoding error: {0}")]
    Encoding(String),

    /// Error during rendering (JSON, Markdown).
    #[error("Rendering error: {0}")]
    Render(String),
}

/// Writer failures stay I/O errors; anything else is a rendering failure.
impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        if err.is_io() {
            Error::Io(err.into())
        } else {
            Error::Render(format!("JSON serialization error: {}", err))
        }
    }
}
