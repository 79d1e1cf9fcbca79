//! Error types for slidegen library.

use std::io;
use thiserror::Error;

/// Result type alias for slidegen operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while loading, compiling or encoding a deck.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The input is not valid JSON or does not match the document shape.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The document is well-formed JSON but is missing required structure.
    #[error("Invalid document: {0}")]
    InvalidDocument(String),

    /// A content item carries a payload that cannot be drawn.
    #[error("Error creating {kind}: {message}")]
    Content {
        /// Content kind name (e.g. "table")
        kind: String,
        /// Human readable reason
        message: String,
    },

    /// Placement hints produced an unusable box.
    #[error("Geometry error: {0}")]
    Geometry(String),

    /// A whole page could not be compiled.
    #[error("Page {page} ({title}) failed: {message}")]
    PageFailed {
        /// 1-based page number
        page: usize,
        /// Page title, or a generated label
        title: String,
        /// Underlying reason
        message: String,
    },

    /// The output encoder rejected the deck.
    #[error("Encoder error: {0}")]
    Encoder(String),

    /// Generic error with message.
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Build a content error for the given kind.
    pub fn content(kind: impl Into<String>, message: impl Into<String>) -> Self {
        Error::Content {
            kind: kind.into(),
            message: message.into(),
        }
    }
}
