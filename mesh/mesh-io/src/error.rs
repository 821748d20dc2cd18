//! Error types for STL I/O operations.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for STL I/O operations.
pub type IoResult<T> = Result<T, IoError>;

/// Errors that can occur while sniffing or decoding an STL file.
#[derive(Debug, Error)]
pub enum IoError {
    /// File not found.
    #[error("file not found: {path}")]
    FileNotFound {
        /// Path that was not found.
        path: PathBuf,
    },

    /// The source contains no bytes at all.
    #[error("empty file: no bytes available to classify")]
    EmptyFile,

    /// The binary preamble (80-byte header + triangle count) is incomplete.
    #[error("invalid STL header: expected {expected} bytes, got {got}")]
    InvalidHeader {
        /// Expected preamble size.
        expected: usize,
        /// Bytes actually available.
        got: usize,
    },

    /// The body ended inside, or before, a declared triangle record.
    #[error("truncated triangle record {index} of {declared} declared")]
    TruncatedRecord {
        /// Zero-based index of the record that could not be read in full.
        index: u32,
        /// Triangle count declared in the header.
        declared: u32,
    },

    /// More triangles than a binary STL count field can express.
    #[error("too many triangles for binary STL: {count}")]
    TooManyTriangles {
        /// Number of triangles that was requested to be written.
        count: usize,
    },

    /// The ASCII facet grammar failed to compile.
    #[error("invalid ASCII facet pattern: {0}")]
    Pattern(#[from] regex::Error),

    /// I/O error from the standard library.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl IoError {
    /// Create a `TruncatedRecord` error.
    #[must_use]
    pub const fn truncated(index: u32, declared: u32) -> Self {
        Self::TruncatedRecord { index, declared }
    }

    /// Map an `open` failure on `path`, keeping not-found distinct.
    pub(crate) fn from_open(err: std::io::Error, path: &std::path::Path) -> Self {
        if err.kind() == std::io::ErrorKind::NotFound {
            Self::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            Self::Io(err)
        }
    }
}
