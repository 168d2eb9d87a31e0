//! Predicate filtering and masking
//!
//! Filters return order-preserving row subsets. A filter that matches no
//! row returns an empty subset, never an error. Masking keeps every row in
//! place and flags the ones aggregates must skip.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::table::{MaskedView, ProductId, RowSource, RowSubset, TransactionRecord, TransactionTable, UserId};

use super::errors::QueryResult;
use super::range::DateRange;

/// A single row predicate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum RowPredicate {
    /// quantity > threshold
    QuantityGreaterThan { threshold: u32 },
    /// start <= timestamp <= end
    InDateRange { range: DateRange },
    /// user_id == user
    User { user_id: UserId },
    /// product_id == product
    Product { product_id: ProductId },
}

impl RowPredicate {
    pub fn quantity_greater_than(threshold: u32) -> Self {
        RowPredicate::QuantityGreaterThan { threshold }
    }

    pub fn in_date_range(range: DateRange) -> Self {
        RowPredicate::InDateRange { range }
    }

    pub fn user(user_id: UserId) -> Self {
        RowPredicate::User { user_id }
    }

    pub fn product(product_id: ProductId) -> Self {
        RowPredicate::Product { product_id }
    }

    /// Checks a record against this predicate
    pub fn matches(&self, record: &TransactionRecord) -> bool {
        match self {
            RowPredicate::QuantityGreaterThan { threshold } => record.quantity > *threshold,
            RowPredicate::InDateRange { range } => range.contains(record.timestamp),
            RowPredicate::User { user_id } => record.user_id == *user_id,
            RowPredicate::Product { product_id } => record.product_id == *product_id,
        }
    }
}

/// Rows matching every predicate (AND semantics). No predicates keeps all rows.
pub fn filter<'a, S: RowSource + ?Sized>(rows: &'a S, predicates: &[RowPredicate]) -> RowSubset<'a> {
    let table = rows.table();
    let indices = rows
        .row_indices()
        .into_iter()
        .filter(|&i| {
            table
                .get(i)
                .is_some_and(|r| predicates.iter().all(|p| p.matches(r)))
        })
        .collect();
    RowSubset::new(table, indices)
}

/// Rows with `quantity > threshold`
pub fn filter_by_quantity_greater_than<S: RowSource + ?Sized>(rows: &S, threshold: u32) -> RowSubset<'_> {
    filter(rows, &[RowPredicate::quantity_greater_than(threshold)])
}

/// Rows with `start <= timestamp <= end`; rejects `start > end`
pub fn filter_by_date_range<S: RowSource + ?Sized>(
    rows: &S,
    start: NaiveDateTime,
    end: NaiveDateTime,
) -> QueryResult<RowSubset<'_>> {
    let range = DateRange::new(start, end)?;
    Ok(filter(rows, &[RowPredicate::in_date_range(range)]))
}

/// Rows belonging to `user_id`
pub fn filter_by_user<S: RowSource + ?Sized>(rows: &S, user_id: UserId) -> RowSubset<'_> {
    filter(rows, &[RowPredicate::user(user_id)])
}

/// Masks every zero-quantity row. The whole row is masked together and the
/// table's row count is unchanged.
pub fn mask_zero_quantity(table: &TransactionTable) -> MaskedView<'_> {
    let valid = table.iter().map(|r| r.quantity != 0).collect();
    MaskedView::new(table, valid)
}
