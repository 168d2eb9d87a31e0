//! Typed column projections
//!
//! Every extractor returns one value per row, in table order.

use chrono::NaiveDateTime;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::Serialize;

use super::errors::TableResult;
use super::record::{ColumnName, ColumnType, ProductId, TransactionId, UserId};
use super::table::TransactionTable;

/// A column's values, typed by the column they came from
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "values", rename_all = "lowercase")]
pub enum Column {
    Int(Vec<i64>),
    Quantity(Vec<u32>),
    Decimal(Vec<Decimal>),
    Timestamp(Vec<NaiveDateTime>),
}

impl Column {
    pub fn len(&self) -> usize {
        match self {
            Column::Int(v) => v.len(),
            Column::Quantity(v) => v.len(),
            Column::Decimal(v) => v.len(),
            Column::Timestamp(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn column_type(&self) -> ColumnType {
        match self {
            Column::Int(_) => ColumnType::Int,
            Column::Quantity(_) => ColumnType::Quantity,
            Column::Decimal(_) => ColumnType::Decimal,
            Column::Timestamp(_) => ColumnType::Timestamp,
        }
    }
}

impl TransactionTable {
    /// Typed values of a column
    pub fn column(&self, name: ColumnName) -> Column {
        match name {
            ColumnName::TransactionId => Column::Int(self.transaction_ids()),
            ColumnName::UserId => Column::Int(self.user_ids()),
            ColumnName::ProductId => Column::Int(self.product_ids()),
            ColumnName::Quantity => Column::Quantity(self.quantities()),
            ColumnName::UnitPrice => Column::Decimal(self.unit_prices()),
            ColumnName::Timestamp => Column::Timestamp(self.timestamps()),
        }
    }

    /// Typed values of a column looked up by its schema name
    pub fn column_by_name(&self, name: &str) -> TableResult<Column> {
        Ok(self.column(name.parse()?))
    }

    pub fn transaction_ids(&self) -> Vec<TransactionId> {
        self.iter().map(|r| r.transaction_id).collect()
    }

    pub fn user_ids(&self) -> Vec<UserId> {
        self.iter().map(|r| r.user_id).collect()
    }

    pub fn product_ids(&self) -> Vec<ProductId> {
        self.iter().map(|r| r.product_id).collect()
    }

    pub fn quantities(&self) -> Vec<u32> {
        self.iter().map(|r| r.quantity).collect()
    }

    pub fn unit_prices(&self) -> Vec<Decimal> {
        self.iter().map(|r| r.unit_price).collect()
    }

    pub fn timestamps(&self) -> Vec<NaiveDateTime> {
        self.iter().map(|r| r.timestamp).collect()
    }

    /// `(product_id, quantity)` per row
    pub fn product_quantities(&self) -> Vec<(ProductId, u32)> {
        self.iter().map(|r| (r.product_id, r.quantity)).collect()
    }

    /// Unit prices truncated toward zero
    pub fn whole_unit_prices(&self) -> Vec<i64> {
        self.iter()
            .map(|r| r.unit_price.trunc().to_i64().unwrap_or(i64::MAX))
            .collect()
    }
}
