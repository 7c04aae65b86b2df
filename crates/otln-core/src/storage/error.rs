//! Storage error handling
//!
//! Typed errors for project file, import, and export operations, with path
//! context so they can be shown to the user as-is.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Number of logical records (lines) in a project file
pub const PROJECT_LINES: usize = 4;

/// Errors that can occur reading or writing outline data
#[derive(Error, Debug)]
pub enum StorageError {
    /// The chosen path is not a project file
    #[error("'{path}' is not an outline project (.{expected}) file")]
    InvalidFileType { path: PathBuf, expected: &'static str },

    /// File not found (when expected to exist)
    #[error("file not found: '{path}'")]
    NotFound { path: PathBuf },

    /// Permission denied accessing path
    #[error("permission denied: cannot access '{path}'")]
    PermissionDenied {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Failed to read file
    #[error("failed to read '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Failed to write file
    #[error("failed to write '{path}': {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Project file has fewer records than the format requires
    #[error("project file ends after line {found}; expected {PROJECT_LINES} lines")]
    Truncated { found: usize },

    /// A project file line is not the JSON value the format requires
    #[error("line {line} of project file is not valid: {source}")]
    Parse {
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    /// Failed to encode the document
    #[error("failed to encode project: {source}")]
    Encode {
        #[source]
        source: serde_json::Error,
    },

    /// Atomic write failed during rename
    #[error("atomic write failed: could not rename '{from}' to '{to}': {source}")]
    AtomicWriteFailed {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Generic I/O error
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl StorageError {
    /// Classify an I/O error from a read, attaching path context
    pub fn from_read(error: io::Error, path: PathBuf) -> Self {
        match error.kind() {
            io::ErrorKind::NotFound => StorageError::NotFound { path },
            io::ErrorKind::PermissionDenied => StorageError::PermissionDenied {
                path,
                source: error,
            },
            _ => StorageError::Read {
                path,
                source: error,
            },
        }
    }

    /// Classify an I/O error from a write, attaching path context
    pub fn from_write(error: io::Error, path: PathBuf) -> Self {
        match error.kind() {
            io::ErrorKind::PermissionDenied => StorageError::PermissionDenied {
                path,
                source: error,
            },
            _ => StorageError::Write {
                path,
                source: error,
            },
        }
    }
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;
