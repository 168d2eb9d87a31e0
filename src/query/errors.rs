//! Query error types
//!
//! Error codes:
//! - TXN_INVALID_RANGE (REJECT)
//! - TXN_EMPTY_INPUT (REJECT)
//! - TXN_INVALID_ARGUMENT (REJECT)
//! - TXN_ARITHMETIC_OVERFLOW (ERROR)

use std::fmt;

use chrono::NaiveDateTime;

/// Severity levels for query errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Caller passed something the engine will not answer
    Reject,
    /// Inputs were acceptable but the computation could not complete
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Reject => write!(f, "REJECT"),
            Severity::Error => write!(f, "ERROR"),
        }
    }
}

/// Query-specific error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryErrorCode {
    /// Range whose start is after its end
    InvalidRange,
    /// Aggregate with no defined answer on zero rows
    EmptyInput,
    /// Parameter outside its accepted domain
    InvalidArgument,
    /// Decimal arithmetic left the representable range
    ArithmeticOverflow,
}

impl QueryErrorCode {
    /// Returns the stable string code
    pub fn code(&self) -> &'static str {
        match self {
            QueryErrorCode::InvalidRange => "TXN_INVALID_RANGE",
            QueryErrorCode::EmptyInput => "TXN_EMPTY_INPUT",
            QueryErrorCode::InvalidArgument => "TXN_INVALID_ARGUMENT",
            QueryErrorCode::ArithmeticOverflow => "TXN_ARITHMETIC_OVERFLOW",
        }
    }

    /// Returns the severity level for this error
    pub fn severity(&self) -> Severity {
        match self {
            QueryErrorCode::ArithmeticOverflow => Severity::Error,
            _ => Severity::Reject,
        }
    }
}

impl fmt::Display for QueryErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Query error type with full context
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryError {
    code: QueryErrorCode,
    message: String,
}

impl QueryError {
    /// Create an invalid range error
    pub fn invalid_range(start: NaiveDateTime, end: NaiveDateTime) -> Self {
        Self {
            code: QueryErrorCode::InvalidRange,
            message: format!("Range start {} is after end {}", start, end),
        }
    }

    /// Create an empty input error
    pub fn empty_input(operation: &str) -> Self {
        Self {
            code: QueryErrorCode::EmptyInput,
            message: format!("{} is undefined over zero rows", operation),
        }
    }

    /// Create an invalid argument error
    pub fn invalid_argument(reason: impl Into<String>) -> Self {
        Self {
            code: QueryErrorCode::InvalidArgument,
            message: reason.into(),
        }
    }

    /// Create an arithmetic overflow error
    pub fn arithmetic_overflow(reason: impl Into<String>) -> Self {
        Self {
            code: QueryErrorCode::ArithmeticOverflow,
            message: reason.into(),
        }
    }

    /// Returns the error code
    pub fn code(&self) -> QueryErrorCode {
        self.code
    }

    /// Returns the severity level
    pub fn severity(&self) -> Severity {
        self.code.severity()
    }

    /// Returns the error message
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for QueryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {}: {}",
            self.code.severity(),
            self.code.code(),
            self.message
        )
    }
}

impl std::error::Error for QueryError {}

/// Result type for query operations
pub type QueryResult<T> = Result<T, QueryError>;
