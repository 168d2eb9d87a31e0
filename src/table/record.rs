//! Transaction record and column definitions
//!
//! The schema is fixed. Column order is also the field order of raw rows:
//!
//! ```text
//! transaction_id | user_id | product_id | quantity | unit_price | timestamp
//! ```

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::errors::TableError;

pub type TransactionId = i64;
pub type UserId = i64;
pub type ProductId = i64;

/// One purchase event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionRecord {
    /// Assumed unique by source data, never enforced
    pub transaction_id: TransactionId,
    pub user_id: UserId,
    pub product_id: ProductId,
    /// Zero is valid and is soft-deleted by masking
    pub quantity: u32,
    /// Non-negative
    pub unit_price: Decimal,
    /// Naive, no timezone semantics
    pub timestamp: NaiveDateTime,
}

impl TransactionRecord {
    pub fn new(
        transaction_id: TransactionId,
        user_id: UserId,
        product_id: ProductId,
        quantity: u32,
        unit_price: Decimal,
        timestamp: NaiveDateTime,
    ) -> Self {
        Self {
            transaction_id,
            user_id,
            product_id,
            quantity,
            unit_price,
            timestamp,
        }
    }

    /// Quantity times unit price, `None` on decimal overflow
    pub fn revenue(&self) -> Option<Decimal> {
        Decimal::from(self.quantity).checked_mul(self.unit_price)
    }
}

/// Columns of the fixed transaction schema
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnName {
    TransactionId,
    UserId,
    ProductId,
    Quantity,
    UnitPrice,
    Timestamp,
}

impl ColumnName {
    /// All columns in schema order
    pub const ALL: [ColumnName; 6] = [
        ColumnName::TransactionId,
        ColumnName::UserId,
        ColumnName::ProductId,
        ColumnName::Quantity,
        ColumnName::UnitPrice,
        ColumnName::Timestamp,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ColumnName::TransactionId => "transaction_id",
            ColumnName::UserId => "user_id",
            ColumnName::ProductId => "product_id",
            ColumnName::Quantity => "quantity",
            ColumnName::UnitPrice => "unit_price",
            ColumnName::Timestamp => "timestamp",
        }
    }

    /// Type of the values stored in this column
    pub fn column_type(&self) -> ColumnType {
        match self {
            ColumnName::TransactionId | ColumnName::UserId | ColumnName::ProductId => {
                ColumnType::Int
            }
            ColumnName::Quantity => ColumnType::Quantity,
            ColumnName::UnitPrice => ColumnType::Decimal,
            ColumnName::Timestamp => ColumnType::Timestamp,
        }
    }
}

impl fmt::Display for ColumnName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ColumnName {
    type Err = TableError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ColumnName::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| TableError::unknown_column(s))
    }
}

/// Value types a column can hold
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    /// 64-bit signed integer
    Int,
    /// 32-bit unsigned integer
    Quantity,
    /// Exact decimal
    Decimal,
    /// Naive date-time
    Timestamp,
}

impl ColumnType {
    pub fn type_name(&self) -> &'static str {
        match self {
            ColumnType::Int => "int",
            ColumnType::Quantity => "quantity",
            ColumnType::Decimal => "decimal",
            ColumnType::Timestamp => "timestamp",
        }
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.type_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 8, 5)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    #[test]
    fn test_revenue_is_quantity_times_price() {
        let rec = TransactionRecord::new(1, 1, 302, 3, "49.99".parse().unwrap(), at(10, 30));
        assert_eq!(rec.revenue(), Some("149.97".parse::<Decimal>().unwrap()));
    }

    #[test]
    fn test_zero_quantity_revenue() {
        let rec = TransactionRecord::new(1, 1, 305, 0, "19.99".parse().unwrap(), at(10, 35));
        assert_eq!(rec.revenue(), Some(Decimal::ZERO));
    }

    #[test]
    fn test_column_name_parse() {
        assert_eq!(
            "unit_price".parse::<ColumnName>().unwrap(),
            ColumnName::UnitPrice
        );
        assert!("price".parse::<ColumnName>().is_err());
    }

    #[test]
    fn test_column_types() {
        assert_eq!(ColumnName::UserId.column_type(), ColumnType::Int);
        assert_eq!(ColumnName::Quantity.column_type(), ColumnType::Quantity);
        assert_eq!(ColumnName::Timestamp.column_type().type_name(), "timestamp");
    }

    #[test]
    fn test_record_serializes_price_exactly() {
        let rec = TransactionRecord::new(7, 2, 306, 1, "0.2".parse().unwrap(), at(10, 35));
        let json = serde_json::to_value(&rec).unwrap();
        assert_eq!(json["unit_price"], "0.2");
        assert_eq!(json["timestamp"], "2024-08-05T10:35:00");
    }
}
