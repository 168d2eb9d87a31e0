//! CLI-specific error types
//!
//! Library errors keep their own codes when they surface here, so a failed
//! command reports `TXN_INVALID_RANGE` rather than a generic CLI code.

use std::fmt;
use std::io;

use crate::format::FormatError;
use crate::query::{QueryError, QueryErrorCode};
use crate::table::{TableError, TableErrorCode};

/// CLI error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliErrorCode {
    /// Configuration file error
    ConfigError,
    /// I/O error (stdout, files)
    IoError,
    /// Argument that does not parse or is out of range
    InvalidArgument,
    /// Table construction failed
    Table(TableErrorCode),
    /// Query rejected or failed
    Query(QueryErrorCode),
    /// Table file could not be read or written
    Format(&'static str),
}

impl CliErrorCode {
    /// Get the error code string
    pub fn code(&self) -> &'static str {
        match self {
            Self::ConfigError => "TXN_CLI_CONFIG_ERROR",
            Self::IoError => "TXN_CLI_IO_ERROR",
            Self::InvalidArgument => "TXN_CLI_INVALID_ARGUMENT",
            Self::Table(code) => code.code(),
            Self::Query(code) => code.code(),
            Self::Format(code) => code,
        }
    }
}

/// CLI error
#[derive(Debug)]
pub struct CliError {
    code: CliErrorCode,
    message: String,
}

impl CliError {
    /// Create a new CLI error
    pub fn new(code: CliErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// Config error
    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::ConfigError, msg)
    }

    /// I/O error
    pub fn io_error(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::IoError, msg)
    }

    /// Invalid argument
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::InvalidArgument, msg)
    }

    /// Get the error code
    pub fn code(&self) -> CliErrorCode {
        self.code
    }

    /// Get the error code string
    pub fn code_str(&self) -> &'static str {
        self.code.code()
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.code(), self.message)
    }
}

impl std::error::Error for CliError {}

impl From<io::Error> for CliError {
    fn from(e: io::Error) -> Self {
        Self::io_error(e.to_string())
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        Self::io_error(format!("JSON error: {}", e))
    }
}

impl From<TableError> for CliError {
    fn from(e: TableError) -> Self {
        Self::new(CliErrorCode::Table(e.code()), e.message())
    }
}

impl From<QueryError> for CliError {
    fn from(e: QueryError) -> Self {
        Self::new(CliErrorCode::Query(e.code()), e.message())
    }
}

impl From<FormatError> for CliError {
    fn from(e: FormatError) -> Self {
        match e {
            FormatError::Table(inner) => inner.into(),
            other => Self::new(CliErrorCode::Format(other.code()), other.to_string()),
        }
    }
}

/// CLI result type
pub type CliResult<T> = Result<T, CliError>;
