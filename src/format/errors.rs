//! # Table File Errors

use std::io;

use thiserror::Error;

use crate::table::TableError;

/// Result type for table file operations
pub type FormatResult<T> = Result<T, FormatError>;

/// Table file errors
#[derive(Debug, Error)]
pub enum FormatError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Rows were read but do not form a valid table
    #[error("{0}")]
    Table(#[from] TableError),

    #[error("Invalid header: expected '{expected}', found '{found}'")]
    InvalidHeader { expected: String, found: String },

    #[error("Corrupted table file: {0}")]
    Corrupted(String),

    #[error("Checksum mismatch: stored {expected:#010x}, computed {actual:#010x}")]
    ChecksumMismatch { expected: u32, actual: u32 },

    #[error("Unsupported columnar version: {0}")]
    UnsupportedVersion(u16),

    #[error("Unknown table format: {0}")]
    UnknownFormat(String),
}

impl FormatError {
    /// Stable error code
    pub fn code(&self) -> &'static str {
        match self {
            FormatError::Io(_) => "TXN_FORMAT_IO",
            FormatError::Table(e) => e.code().code(),
            FormatError::InvalidHeader { .. } => "TXN_FORMAT_INVALID_HEADER",
            FormatError::Corrupted(_) => "TXN_FORMAT_CORRUPTED",
            FormatError::ChecksumMismatch { .. } => "TXN_FORMAT_CHECKSUM_MISMATCH",
            FormatError::UnsupportedVersion(_) => "TXN_FORMAT_UNSUPPORTED_VERSION",
            FormatError::UnknownFormat(_) => "TXN_FORMAT_UNKNOWN",
        }
    }

    /// True when the bytes were readable but their content is damaged
    pub fn is_corruption(&self) -> bool {
        matches!(
            self,
            FormatError::Corrupted(_)
                | FormatError::ChecksumMismatch { .. }
                | FormatError::UnsupportedVersion(_)
        )
    }

    pub(crate) fn truncated(what: &str) -> Self {
        FormatError::Corrupted(format!("truncated while reading {}", what))
    }
}
