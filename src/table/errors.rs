//! Table error types
//!
//! Error codes:
//! - TXN_SCHEMA_VIOLATION (REJECT)
//! - TXN_EMPTY_INPUT (REJECT)
//! - TXN_UNKNOWN_COLUMN (REJECT)
//! - TXN_ROW_OUT_OF_BOUNDS (REJECT)
//! - TXN_MASK_LENGTH_MISMATCH (REJECT)

use std::fmt;

/// Table-specific error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableErrorCode {
    /// A row failed to convert to its typed column
    SchemaViolation,
    /// Construction from zero records
    EmptyInput,
    /// Column name not part of the fixed schema
    UnknownColumn,
    /// Row index past the end of the table
    RowOutOfBounds,
    /// Boolean mask length differs from row count
    MaskLengthMismatch,
}

impl TableErrorCode {
    /// Returns the stable string code
    pub fn code(&self) -> &'static str {
        match self {
            TableErrorCode::SchemaViolation => "TXN_SCHEMA_VIOLATION",
            TableErrorCode::EmptyInput => "TXN_EMPTY_INPUT",
            TableErrorCode::UnknownColumn => "TXN_UNKNOWN_COLUMN",
            TableErrorCode::RowOutOfBounds => "TXN_ROW_OUT_OF_BOUNDS",
            TableErrorCode::MaskLengthMismatch => "TXN_MASK_LENGTH_MISMATCH",
        }
    }

    /// Returns true for errors raised while building a table
    pub fn is_construction_error(&self) -> bool {
        matches!(
            self,
            TableErrorCode::SchemaViolation | TableErrorCode::EmptyInput
        )
    }
}

impl fmt::Display for TableErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Where and why a row failed conversion
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldViolation {
    /// Zero-based row index in source order
    pub row: usize,
    /// Column name
    pub column: String,
    /// Expected type or condition
    pub expected: String,
    /// Actual value found
    pub actual: String,
}

impl FieldViolation {
    pub fn new(
        row: usize,
        column: impl Into<String>,
        expected: impl Into<String>,
        actual: impl Into<String>,
    ) -> Self {
        Self {
            row,
            column: column.into(),
            expected: expected.into(),
            actual: actual.into(),
        }
    }

    pub fn missing_field(row: usize, column: impl Into<String>) -> Self {
        Self::new(row, column, "field to be present", "missing")
    }
}

impl fmt::Display for FieldViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "row {}, column '{}': expected {}, got {}",
            self.row, self.column, self.expected, self.actual
        )
    }
}

/// Table error with full context
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableError {
    code: TableErrorCode,
    message: String,
    violation: Option<FieldViolation>,
}

impl TableError {
    /// Create a schema violation error for a single field
    pub fn schema_violation(violation: FieldViolation) -> Self {
        Self {
            code: TableErrorCode::SchemaViolation,
            message: format!("Schema violation at {}", violation),
            violation: Some(violation),
        }
    }

    /// Create a schema violation for a row with the wrong field count
    pub fn wrong_field_count(row: usize, expected: usize, actual: usize) -> Self {
        Self {
            code: TableErrorCode::SchemaViolation,
            message: format!(
                "Schema violation at row {}: expected {} fields, got {}",
                row, expected, actual
            ),
            violation: None,
        }
    }

    /// Create an empty input error
    pub fn empty_input() -> Self {
        Self {
            code: TableErrorCode::EmptyInput,
            message: "A transaction table requires at least one record".into(),
            violation: None,
        }
    }

    /// Create an unknown column error
    pub fn unknown_column(name: impl Into<String>) -> Self {
        Self {
            code: TableErrorCode::UnknownColumn,
            message: format!("Unknown column '{}'", name.into()),
            violation: None,
        }
    }

    /// Create a row out of bounds error
    pub fn row_out_of_bounds(index: usize, row_count: usize) -> Self {
        Self {
            code: TableErrorCode::RowOutOfBounds,
            message: format!("Row index {} out of bounds for {} rows", index, row_count),
            violation: None,
        }
    }

    /// Create a mask length mismatch error
    pub fn mask_length_mismatch(mask_len: usize, row_count: usize) -> Self {
        Self {
            code: TableErrorCode::MaskLengthMismatch,
            message: format!(
                "Mask has {} entries but table has {} rows",
                mask_len, row_count
            ),
            violation: None,
        }
    }

    /// Returns the error code
    pub fn code(&self) -> TableErrorCode {
        self.code
    }

    /// Returns the error message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the offending field, if the error is about one
    pub fn violation(&self) -> Option<&FieldViolation> {
        self.violation.as_ref()
    }
}

impl fmt::Display for TableError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code.code(), self.message)
    }
}

impl std::error::Error for TableError {}

/// Result type for table operations
pub type TableResult<T> = Result<T, TableError>;
