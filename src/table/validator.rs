//! Record validation and conversion
//!
//! Converts raw text rows into typed records. Conversion is all-or-nothing:
//! the first failing field aborts construction with the row and column that
//! failed. There is no coercion beyond what is listed here:
//!
//! - ids: base-10 `i64`
//! - quantity: base-10 non-negative integer fitting `u32`
//! - unit_price: non-negative decimal literal
//! - timestamp: `YYYY-MM-DD[T ]HH:MM[:SS[.fff]]`

use chrono::NaiveDateTime;
use rust_decimal::Decimal;

use super::errors::{FieldViolation, TableError, TableResult};
use super::record::{ColumnName, TransactionRecord};

const TIMESTAMP_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Validates raw rows and typed records against the fixed schema.
pub struct RecordValidator;

impl RecordValidator {
    /// Converts one raw row into a typed record.
    ///
    /// `row` is the zero-based source position, used for error reporting.
    pub fn convert_row<S: AsRef<str>>(row: usize, fields: &[S]) -> TableResult<TransactionRecord> {
        if fields.len() != ColumnName::ALL.len() {
            return Err(TableError::wrong_field_count(
                row,
                ColumnName::ALL.len(),
                fields.len(),
            ));
        }

        let field = |column: ColumnName| fields[column as usize].as_ref().trim();

        Ok(TransactionRecord {
            transaction_id: parse_id(row, ColumnName::TransactionId, field(ColumnName::TransactionId))?,
            user_id: parse_id(row, ColumnName::UserId, field(ColumnName::UserId))?,
            product_id: parse_id(row, ColumnName::ProductId, field(ColumnName::ProductId))?,
            quantity: parse_quantity(row, field(ColumnName::Quantity))?,
            unit_price: parse_price(row, field(ColumnName::UnitPrice))?,
            timestamp: parse_timestamp(row, field(ColumnName::Timestamp))?,
        })
    }

    /// Checks the invariants the types alone cannot carry.
    pub fn check_record(row: usize, record: &TransactionRecord) -> TableResult<()> {
        if record.unit_price.is_sign_negative() && !record.unit_price.is_zero() {
            return Err(TableError::schema_violation(FieldViolation::new(
                row,
                ColumnName::UnitPrice.as_str(),
                "non-negative decimal",
                record.unit_price.to_string(),
            )));
        }
        Ok(())
    }
}

fn violation(row: usize, column: ColumnName, expected: &str, actual: &str) -> TableError {
    if actual.is_empty() {
        return TableError::schema_violation(FieldViolation::missing_field(row, column.as_str()));
    }
    TableError::schema_violation(FieldViolation::new(
        row,
        column.as_str(),
        expected,
        format!("'{}'", actual),
    ))
}

fn parse_id(row: usize, column: ColumnName, raw: &str) -> TableResult<i64> {
    raw.parse::<i64>()
        .map_err(|_| violation(row, column, "integer", raw))
}

fn parse_quantity(row: usize, raw: &str) -> TableResult<u32> {
    raw.parse::<u32>()
        .map_err(|_| violation(row, ColumnName::Quantity, "non-negative integer", raw))
}

fn parse_price(row: usize, raw: &str) -> TableResult<Decimal> {
    let price = raw
        .parse::<Decimal>()
        .map_err(|_| violation(row, ColumnName::UnitPrice, "decimal", raw))?;
    if price.is_sign_negative() && !price.is_zero() {
        return Err(violation(row, ColumnName::UnitPrice, "non-negative decimal", raw));
    }
    Ok(price)
}

/// Parses a timestamp in any of the accepted text forms.
pub fn parse_timestamp_str(raw: &str) -> Option<NaiveDateTime> {
    TIMESTAMP_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw.trim(), fmt).ok())
}

fn parse_timestamp(row: usize, raw: &str) -> TableResult<NaiveDateTime> {
    parse_timestamp_str(raw)
        .ok_or_else(|| violation(row, ColumnName::Timestamp, "timestamp", raw))
}
