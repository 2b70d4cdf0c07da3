//! Error types for pdfsentences library.

use std::io;
use thiserror::Error;

/// Result type alias for pdfsentences operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while reading blocks or extracting sentences.
///
/// The sentence pipeline itself is total over well-formed block lists; every
/// variant here originates in a block source, the batch runner or the CLI.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The block source could not read the document at all.
    #[error("Source unreadable: {0}")]
    SourceUnreadable(String),

    /// The block source could not decode the document content.
    #[error("Malformed input: {0}")]
    MalformedInput(String),

    /// Error (de)serializing block or result JSON.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Invalid page range specification.
    #[error("Invalid page range: {0}")]
    InvalidPageRange(String),

    /// Generic error with message.
    #[error("{0}")]
    Other(String),
}
