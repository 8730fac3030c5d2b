//! Error types for resenha.

use std::path::PathBuf;

/// Result type alias for resenha operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in resenha operations.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// I/O error during file operations.
    #[error("I/O error at {path:?}: {source}")]
    Io {
        /// The path where the error occurred, if known.
        path: Option<PathBuf>,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Remote resource unreachable or returned a non-success status.
    #[error("Fetch error for '{url}': {message}")]
    Fetch {
        /// The URL that failed to fetch.
        url: String,
        /// Description of the failure.
        message: String,
    },

    /// Content does not match the expected tab-separated format.
    #[error("Parse error: {message}")]
    Parse {
        /// Description of the parse failure.
        message: String,
    },

    /// A mean was requested over zero records.
    #[error("Dataset is empty")]
    EmptyDataset,

    /// Backend storage error.
    #[error("Storage backend error: {message}")]
    Storage {
        /// Description of the storage error.
        message: String,
    },
}

impl Error {
    /// Create an I/O error with a path context.
    pub fn io(source: std::io::Error, path: impl Into<PathBuf>) -> Self {
        Self::Io {
            path: Some(path.into()),
            source,
        }
    }

    /// Create an I/O error without path context.
    pub fn io_no_path(source: std::io::Error) -> Self {
        Self::Io { path: None, source }
    }

    /// Create a fetch error.
    pub fn fetch(url: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Fetch {
            url: url.into(),
            message: message.into(),
        }
    }

    /// Create a parse error.
    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse {
            message: message.into(),
        }
    }

    /// Create a storage error.
    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
        }
    }
}
