//! Error types for file-backed stores.

use std::path::PathBuf;

use lastro_curves::CurveError;
use thiserror::Error;

/// A specialized Result type for file store operations.
pub type FileResult<T> = Result<T, FileError>;

/// Errors raised while loading store files.
#[derive(Debug, Error)]
pub enum FileError {
    /// The file could not be opened or read.
    #[error("IO error reading {path}: {message}")]
    Io {
        /// File being read.
        path: PathBuf,
        /// Underlying error.
        message: String,
    },

    /// A row could not be parsed.
    #[error("Parse error in {path} at line {line}: {message}")]
    Parse {
        /// File being read.
        path: PathBuf,
        /// One-based line number, header included.
        line: u64,
        /// What was wrong.
        message: String,
    },

    /// A parsed row was rejected by the store.
    #[error("Invalid data in {path}: {source}")]
    Data {
        /// File being read.
        path: PathBuf,
        /// Store error.
        source: CurveError,
    },
}

impl FileError {
    pub(crate) fn io(path: &std::path::Path, err: &csv::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            message: err.to_string(),
        }
    }

    pub(crate) fn parse(path: &std::path::Path, line: u64, message: impl Into<String>) -> Self {
        Self::Parse {
            path: path.to_path_buf(),
            line,
            message: message.into(),
        }
    }

    pub(crate) fn data(path: &std::path::Path, source: CurveError) -> Self {
        Self::Data {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Line of the record a csv error points at, or 0 when unknown.
pub(crate) fn error_line(err: &csv::Error) -> u64 {
    err.position().map_or(0, csv::Position::line)
}
