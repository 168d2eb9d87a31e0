//! Grouping and ranking queries
//!
//! Groups are keyed by `user_id` or `product_id`. Group iteration runs in
//! ascending key order (`BTreeMap`), so results never depend on hash order.

use std::collections::{BTreeMap, BTreeSet, HashSet};

use rust_decimal::Decimal;
use serde::Serialize;

use crate::table::{ProductId, RowSource, RowSubset, UserId};

use super::errors::{QueryError, QueryResult};
use super::ranking::{ProductCount, ProductRevenue, RankDirection, Ranker};
use super::revenue::{add_revenue, record_revenue};

/// Number of transactions of one user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct UserTransactionCount {
    pub user_id: UserId,
    pub transaction_count: usize,
}

/// Number of distinct `user_id` values
pub fn unique_user_count<S: RowSource + ?Sized>(rows: &S) -> usize {
    rows.rows()
        .into_iter()
        .map(|r| r.user_id)
        .collect::<BTreeSet<_>>()
        .len()
}

/// Transaction count per product, ascending product id
pub fn product_counts<S: RowSource + ?Sized>(rows: &S) -> Vec<ProductCount> {
    let mut counts: BTreeMap<ProductId, usize> = BTreeMap::new();
    for r in rows.rows() {
        *counts.entry(r.product_id).or_default() += 1;
    }
    counts
        .into_iter()
        .map(|(product_id, transaction_count)| ProductCount {
            product_id,
            transaction_count,
        })
        .collect()
}

/// Product with the most transactions (not the most revenue).
///
/// Ties go to the smallest product id.
pub fn most_purchased_product<S: RowSource + ?Sized>(rows: &S) -> QueryResult<ProductId> {
    let counts = product_counts(rows);
    Ranker::top(&counts, RankDirection::Desc)
        .map(|c| c.product_id)
        .ok_or_else(|| QueryError::empty_input("most_purchased_product"))
}

/// One entry per distinct user, ascending user id
pub fn transaction_counts_per_user<S: RowSource + ?Sized>(rows: &S) -> Vec<UserTransactionCount> {
    let mut counts: BTreeMap<UserId, usize> = BTreeMap::new();
    for r in rows.rows() {
        *counts.entry(r.user_id).or_default() += 1;
    }
    counts
        .into_iter()
        .map(|(user_id, transaction_count)| UserTransactionCount {
            user_id,
            transaction_count,
        })
        .collect()
}

/// Total revenue per product, ranked by revenue desc then product id asc
pub fn product_revenue<S: RowSource + ?Sized>(rows: &S) -> QueryResult<Vec<ProductRevenue>> {
    let mut totals: BTreeMap<ProductId, Decimal> = BTreeMap::new();
    for r in rows.rows() {
        let total = totals.entry(r.product_id).or_insert(Decimal::ZERO);
        *total = add_revenue(*total, record_revenue(r)?)?;
    }

    let mut ranked: Vec<ProductRevenue> = totals
        .into_iter()
        .map(|(product_id, revenue)| ProductRevenue {
            product_id,
            revenue,
        })
        .collect();
    Ranker::rank(&mut ranked, RankDirection::Desc);
    Ok(ranked)
}

/// Every row of the `n` highest-revenue products.
///
/// Returns all member rows, not one per product, in table order. `n` larger
/// than the number of products selects every product.
pub fn top_products_by_revenue<S: RowSource + ?Sized>(rows: &S, n: usize) -> QueryResult<RowSubset<'_>> {
    let selected: HashSet<ProductId> = product_revenue(rows)?
        .into_iter()
        .take(n)
        .map(|p| p.product_id)
        .collect();

    let table = rows.table();
    let indices = rows
        .row_indices()
        .into_iter()
        .filter(|&i| {
            table
                .get(i)
                .is_some_and(|r| selected.contains(&r.product_id))
        })
        .collect();
    Ok(RowSubset::new(table, indices))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::{filter_by_user, mask_zero_quantity, QueryErrorCode};
    use crate::table::{sample_transactions, TransactionTable};

    fn sample() -> TransactionTable {
        TransactionTable::new(sample_transactions()).unwrap()
    }

    #[test]
    fn test_unique_user_count() {
        assert_eq!(unique_user_count(&sample()), 4);
    }

    #[test]
    fn test_most_purchased_product_tie_breaks_low() {
        // 302 and 305 both have two transactions
        assert_eq!(most_purchased_product(&sample()).unwrap(), 302);
    }

    #[test]
    fn test_most_purchased_product_counts_rows_not_quantity() {
        let table = sample();
        let view = mask_zero_quantity(&table);
        // Masking drops the zero-quantity 305 row, 302 still leads
        assert_eq!(most_purchased_product(&view).unwrap(), 302);
    }

    #[test]
    fn test_most_purchased_product_empty() {
        let table = sample();
        let none = filter_by_user(&table, 42);
        let err = most_purchased_product(&none).unwrap_err();
        assert_eq!(err.code(), QueryErrorCode::EmptyInput);
    }

    #[test]
    fn test_transaction_counts_per_user() {
        let counts = transaction_counts_per_user(&sample());
        let pairs: Vec<_> = counts
            .iter()
            .map(|c| (c.user_id, c.transaction_count))
            .collect();
        assert_eq!(pairs, vec![(1, 3), (2, 3), (3, 1), (4, 1)]);
    }

    #[test]
    fn test_product_revenue_ranked() {
        let ranked = product_revenue(&sample()).unwrap();
        let ids: Vec<_> = ranked.iter().map(|p| p.product_id).collect();
        assert_eq!(ids, vec![304, 302, 303, 305, 306, 307]);
        assert_eq!(ranked[1].revenue, "47.97".parse::<Decimal>().unwrap());
    }

    #[test]
    fn test_top_products_returns_all_member_rows() {
        let table = sample();
        let top = top_products_by_revenue(&table, 5).unwrap();
        assert_eq!(top.len(), 7);
        assert!(top.iter().all(|r| r.product_id != 307));
    }

    #[test]
    fn test_top_one_product() {
        let table = sample();
        let top = top_products_by_revenue(&table, 1).unwrap();
        assert_eq!(top.indices(), &[3]);
    }

    #[test]
    fn test_top_zero_and_oversized_n() {
        let table = sample();
        assert!(top_products_by_revenue(&table, 0).unwrap().is_empty());
        assert_eq!(top_products_by_revenue(&table, 50).unwrap().len(), 8);
    }

    #[test]
    fn test_product_counts() {
        let counts = product_counts(&sample());
        assert_eq!(counts.len(), 6);
        assert_eq!(counts[0].product_id, 302);
        assert_eq!(counts[0].transaction_count, 2);
    }
}
