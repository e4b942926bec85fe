use crate::utils::format_file_size;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Every expected failure of a file operation or of tool dispatch.
///
/// These never escape as faults: [`crate::tools::OperationResult::failure`] turns
/// each one into a `success: false` result carrying [`FileOpError::kind`].
#[derive(Debug, Error)]
pub enum FileOpError {
    #[error("Path {0} is outside the allowed directory")]
    PathEscape(String),

    #[error("Invalid path '{path}': {reason}")]
    InvalidPath { path: String, reason: String },

    #[error("Path does not exist: {0}")]
    NotFound(String),

    #[error("Path is not a directory: {0}")]
    NotADirectory(String),

    #[error("Path is not a file: {0}")]
    NotAFile(String),

    #[error(
        "File content ({}) exceeds maximum size of {}",
        format_file_size(*size),
        format_file_size(*limit)
    )]
    SizeExceeded { size: u64, limit: u64 },

    #[error("Deletion of {0} not confirmed. Use confirm=true to delete.")]
    ConfirmationRequired(String),

    #[error("File {0} is not valid UTF-8 text")]
    Decode(String),

    #[error("I/O error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Unknown operation: {0}")]
    UnknownOperation(String),

    #[error("Invalid arguments for {operation}: {reason}")]
    InvalidArguments { operation: String, reason: String },
}

/// Machine-readable error tag carried in operation results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FileOpErrorKind {
    PathEscape,
    InvalidPath,
    NotFound,
    NotADirectory,
    NotAFile,
    SizeExceeded,
    ConfirmationRequired,
    Decode,
    Io,
    UnknownOperation,
    InvalidArguments,
}

impl FileOpError {
    pub fn kind(&self) -> FileOpErrorKind {
        match self {
            Self::PathEscape(_) => FileOpErrorKind::PathEscape,
            Self::InvalidPath { .. } => FileOpErrorKind::InvalidPath,
            Self::NotFound(_) => FileOpErrorKind::NotFound,
            Self::NotADirectory(_) => FileOpErrorKind::NotADirectory,
            Self::NotAFile(_) => FileOpErrorKind::NotAFile,
            Self::SizeExceeded { .. } => FileOpErrorKind::SizeExceeded,
            Self::ConfirmationRequired(_) => FileOpErrorKind::ConfirmationRequired,
            Self::Decode(_) => FileOpErrorKind::Decode,
            Self::Io { .. } => FileOpErrorKind::Io,
            Self::UnknownOperation(_) => FileOpErrorKind::UnknownOperation,
            Self::InvalidArguments { .. } => FileOpErrorKind::InvalidArguments,
        }
    }

    pub(crate) fn invalid_path(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidPath {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Map an I/O error, keeping `NotFound` distinct from other failures
    pub(crate) fn io(path: impl Into<String>, source: std::io::Error) -> Self {
        let path = path.into();
        if source.kind() == std::io::ErrorKind::NotFound {
            Self::NotFound(path)
        } else {
            Self::Io { path, source }
        }
    }
}
