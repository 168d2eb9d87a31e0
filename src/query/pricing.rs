//! Price adjustment
//!
//! Produces a new owned table. The source table is never touched.

use rust_decimal::{Decimal, RoundingStrategy};

use crate::table::{TransactionRecord, TransactionTable};

use super::errors::{QueryError, QueryResult};

/// Decimal places kept by a price adjustment
pub const PRICE_SCALE: u32 = 4;

/// Returns a copy of `table` with every `unit_price` scaled by
/// `1 + percent / 100` and rounded to 4 places, ties to even.
///
/// A percentage below -100 would produce negative prices and is rejected.
pub fn increase_prices(table: &TransactionTable, percent: Decimal) -> QueryResult<TransactionTable> {
    if percent < -Decimal::ONE_HUNDRED {
        return Err(QueryError::invalid_argument(format!(
            "price change {}% would make prices negative",
            percent
        )));
    }

    let factor = percent
        .checked_div(Decimal::ONE_HUNDRED)
        .and_then(|p| p.checked_add(Decimal::ONE))
        .ok_or_else(|| QueryError::arithmetic_overflow("price factor overflow"))?;

    let records = table
        .iter()
        .map(|r| reprice(r, factor))
        .collect::<QueryResult<Vec<_>>>()?;

    Ok(TransactionTable::from_validated(records))
}

fn reprice(record: &TransactionRecord, factor: Decimal) -> QueryResult<TransactionRecord> {
    let scaled = record.unit_price.checked_mul(factor).ok_or_else(|| {
        QueryError::arithmetic_overflow(format!(
            "price overflow at transaction {}",
            record.transaction_id
        ))
    })?;

    Ok(TransactionRecord {
        unit_price: scaled
            .round_dp_with_strategy(PRICE_SCALE, RoundingStrategy::MidpointNearestEven)
            .normalize(),
        ..record.clone()
    })
}
