//! Error types for surface loading.

use std::io;

use thiserror::Error;

/// Result type alias for surface operations.
pub type SurfaceResult<T> = Result<T, SurfaceError>;

/// Errors that abort the processing of a single source document.
#[derive(Debug, Error)]
pub enum SurfaceError {
    /// The document is not well formed markup.
    #[error("malformed document: {0}")]
    MalformedDocument(String),

    /// A point element carries coordinate text that is not 2 or 3 numbers,
    /// or has no id.
    #[error("malformed point {id:?}: {text:?}")]
    MalformedPoint { id: String, text: String },

    /// The byte source has no entry for the identifier.
    #[error("source not found: {0}")]
    NotFound(String),

    /// Reading the source failed.
    #[error("failed to read {source_id}: {source}")]
    Io {
        source_id: String,
        #[source]
        source: io::Error,
    },

    /// Invalid load configuration.
    #[error("invalid configuration: {0}")]
    Config(String),
}

impl SurfaceError {
    pub fn malformed_document(details: impl Into<String>) -> Self {
        Self::MalformedDocument(details.into())
    }

    pub fn malformed_point(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self::MalformedPoint {
            id: id.into(),
            text: text.into(),
        }
    }

    /// Maps an I/O error for `source_id`, keeping `NotFound` distinguishable.
    pub fn from_io(source_id: impl Into<String>, err: io::Error) -> Self {
        let source_id = source_id.into();
        if err.kind() == io::ErrorKind::NotFound {
            Self::NotFound(source_id)
        } else {
            Self::Io {
                source_id,
                source: err,
            }
        }
    }
}
