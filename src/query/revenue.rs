//! Revenue engine
//!
//! Per-row revenue is `quantity * unit_price` in exact decimal arithmetic.
//! Sums run in table order. Exact arithmetic makes them order-independent
//! anyway, so totals compare equal to literal decimal values.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;

use crate::table::{RowSource, TransactionRecord, TransactionTable};

use super::errors::{QueryError, QueryResult};
use super::range::DateRange;

/// Revenue of every row, zero-quantity rows included.
pub fn row_revenue(table: &TransactionTable) -> QueryResult<Vec<Decimal>> {
    table.iter().map(record_revenue).collect()
}

/// Revenue of one record
pub(crate) fn record_revenue(record: &TransactionRecord) -> QueryResult<Decimal> {
    record.revenue().ok_or_else(|| {
        QueryError::arithmetic_overflow(format!(
            "revenue overflow at transaction {}",
            record.transaction_id
        ))
    })
}

/// Checked decimal sum
pub(crate) fn add_revenue(acc: Decimal, revenue: Decimal) -> QueryResult<Decimal> {
    acc.checked_add(revenue)
        .ok_or_else(|| QueryError::arithmetic_overflow("revenue sum overflow"))
}

/// Sum of row revenue over the participating rows.
///
/// Masked rows of a masked view do not participate.
pub fn total_revenue<S: RowSource + ?Sized>(rows: &S) -> QueryResult<Decimal> {
    sum_revenue(rows, |_| true)
}

/// Revenue of rows with `start <= timestamp <= end`.
pub fn revenue_in_range<S: RowSource + ?Sized>(
    rows: &S,
    start: NaiveDateTime,
    end: NaiveDateTime,
) -> QueryResult<Decimal> {
    let range = DateRange::new(start, end)?;
    revenue_within(rows, &range)
}

/// Revenue of rows whose timestamp falls in `range`.
pub fn revenue_within<S: RowSource + ?Sized>(rows: &S, range: &DateRange) -> QueryResult<Decimal> {
    sum_revenue(rows, |ts| range.contains(ts))
}

/// Revenue of two independent periods. The periods may overlap.
pub fn compare_revenue<S: RowSource + ?Sized>(
    rows: &S,
    period1: (NaiveDateTime, NaiveDateTime),
    period2: (NaiveDateTime, NaiveDateTime),
) -> QueryResult<(Decimal, Decimal)> {
    let first = revenue_in_range(rows, period1.0, period1.1)?;
    let second = revenue_in_range(rows, period2.0, period2.1)?;
    Ok((first, second))
}

fn sum_revenue<S, F>(rows: &S, include: F) -> QueryResult<Decimal>
where
    S: RowSource + ?Sized,
    F: Fn(NaiveDateTime) -> bool,
{
    rows.rows()
        .into_iter()
        .filter(|r| include(r.timestamp))
        .try_fold(Decimal::ZERO, |acc, r| add_revenue(acc, record_revenue(r)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::QueryErrorCode;
    use crate::table::sample_transactions;
    use chrono::NaiveDate;

    fn sample() -> TransactionTable {
        TransactionTable::new(sample_transactions()).unwrap()
    }

    fn at(h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 8, 5)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    #[test]
    fn test_row_revenue() {
        let rev = row_revenue(&sample()).unwrap();
        assert_eq!(rev.len(), 8);
        assert_eq!(rev[0], dec("31.98"));
        assert_eq!(rev[5], Decimal::ZERO);
    }

    #[test]
    fn test_total_revenue_exact() {
        assert_eq!(total_revenue(&sample()).unwrap(), dec("258.19"));
    }

    #[test]
    fn test_total_equals_sum_of_rows() {
        let table = sample();
        let summed: Decimal = row_revenue(&table).unwrap().into_iter().sum();
        assert_eq!(total_revenue(&table).unwrap(), summed);
    }

    #[test]
    fn test_revenue_in_range() {
        let table = sample();
        assert_eq!(
            revenue_in_range(&table, at(10, 0), at(10, 26)).unwrap(),
            dec("87.93")
        );
        assert_eq!(
            revenue_in_range(&table, at(9, 0), at(9, 59)).unwrap(),
            Decimal::ZERO
        );
    }

    #[test]
    fn test_unbounded_range_equals_total() {
        let table = sample();
        assert_eq!(
            revenue_within(&table, &DateRange::unbounded()).unwrap(),
            total_revenue(&table).unwrap()
        );
    }

    #[test]
    fn test_compare_revenue() {
        let (p1, p2) = compare_revenue(
            &sample(),
            (at(10, 0), at(10, 26)),
            (at(10, 0), at(10, 16)),
        )
        .unwrap();
        assert_eq!(p1, dec("87.93"));
        assert_eq!(p2, dec("31.98"));
    }

    #[test]
    fn test_inverted_period_rejected() {
        let err = compare_revenue(
            &sample(),
            (at(10, 0), at(10, 26)),
            (at(10, 16), at(10, 0)),
        )
        .unwrap_err();
        assert_eq!(err.code(), QueryErrorCode::InvalidRange);
    }

    #[test]
    fn test_subset_revenue() {
        let table = sample();
        let subset = table.select(&[0, 3]).unwrap();
        assert_eq!(total_revenue(&subset).unwrap(), dec("181.95"));
    }
}
