//! Property-based tests for the query engine using proptest.

use chrono::{Duration, NaiveDate, NaiveDateTime};
use proptest::prelude::*;
use rust_decimal::Decimal;

use txnq::format::FileFormat;
use txnq::query::{
    filter_by_quantity_greater_than, filter_by_user, increase_prices, mask_zero_quantity,
    most_purchased_product, product_counts, revenue_within, row_revenue, top_products_by_revenue,
    total_revenue, transaction_counts_per_user, DateRange,
};
use txnq::table::{TransactionRecord, TransactionTable};

fn base_time() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 8, 5)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap()
}

fn record_strategy() -> impl Strategy<Value = TransactionRecord> {
    (
        1i64..10_000,
        1i64..8,
        1i64..12,
        0u32..20,
        0i64..100_000,
        0u32..5,
        0i64..1_440,
        0i64..1_000_000_000,
    )
        .prop_map(|(id, user, product, qty, mantissa, scale, minute, nanos)| {
            TransactionRecord::new(
                id,
                user,
                product,
                qty,
                Decimal::new(mantissa, scale),
                base_time() + Duration::minutes(minute) + Duration::nanoseconds(nanos),
            )
        })
}

fn table_strategy() -> impl Strategy<Value = TransactionTable> {
    prop::collection::vec(record_strategy(), 1..40)
        .prop_map(|records| TransactionTable::new(records).unwrap())
}

// --- Revenue conservation ---

proptest! {
    #[test]
    fn total_equals_sum_of_rows(table in table_strategy()) {
        let rows: Decimal = row_revenue(&table).unwrap().into_iter().sum();
        prop_assert_eq!(total_revenue(&table).unwrap(), rows);
    }

    #[test]
    fn unbounded_range_equals_total(table in table_strategy()) {
        prop_assert_eq!(
            revenue_within(&table, &DateRange::unbounded()).unwrap(),
            total_revenue(&table).unwrap()
        );
    }

    #[test]
    fn masking_preserves_count_and_revenue(table in table_strategy()) {
        let view = mask_zero_quantity(&table);
        prop_assert_eq!(view.len(), table.len());
        prop_assert_eq!(total_revenue(&view).unwrap(), total_revenue(&table).unwrap());
    }
}

// --- Filter monotonicity ---

proptest! {
    #[test]
    fn quantity_filter_is_monotonic(table in table_strategy(), t in 0u32..20) {
        let lower = filter_by_quantity_greater_than(&table, t);
        let higher = filter_by_quantity_greater_than(&table, t + 1);
        prop_assert!(higher.len() <= lower.len());
        prop_assert!(lower.iter().all(|r| r.quantity > t));
    }

    #[test]
    fn user_counts_conserve_rows(table in table_strategy()) {
        let counts = transaction_counts_per_user(&table);
        let total: usize = counts.iter().map(|c| c.transaction_count).sum();
        prop_assert_eq!(total, table.len());
        for c in counts {
            prop_assert_eq!(filter_by_user(&table, c.user_id).len(), c.transaction_count);
        }
    }
}

// --- Ranking ---

proptest! {
    #[test]
    fn top_n_only_grows(table in table_strategy(), n in 0usize..12) {
        let smaller = top_products_by_revenue(&table, n).unwrap();
        let larger = top_products_by_revenue(&table, n + 1).unwrap();
        prop_assert!(smaller.indices().iter().all(|i| larger.indices().contains(i)));
    }

    #[test]
    fn most_purchased_is_smallest_of_the_max(table in table_strategy()) {
        let counts = product_counts(&table);
        let max = counts.iter().map(|c| c.transaction_count).max().unwrap();
        let expected = counts
            .iter()
            .filter(|c| c.transaction_count == max)
            .map(|c| c.product_id)
            .min()
            .unwrap();
        prop_assert_eq!(most_purchased_product(&table).unwrap(), expected);
    }
}

// --- Repricing and files ---

proptest! {
    #[test]
    fn reprice_then_inverse_within_rounding(table in table_strategy(), pct in 1i64..200) {
        let p = Decimal::from(pct);
        let inverse = -p / (Decimal::ONE + p / Decimal::ONE_HUNDRED);
        let there = increase_prices(&table, p).unwrap();
        let back = increase_prices(&there, inverse).unwrap();
        let tolerance = Decimal::new(1, 4);
        for (orig, restored) in table.unit_prices().into_iter().zip(back.unit_prices()) {
            prop_assert!((orig - restored).abs() <= tolerance);
        }
    }

    #[test]
    fn every_format_round_trips_exactly(table in table_strategy()) {
        for format in FileFormat::ALL {
            let mut buf = Vec::new();
            format.save(&table, &mut buf).unwrap();
            let loaded = format.load(buf.as_slice()).unwrap();
            prop_assert_eq!(loaded.records(), table.records());
        }
    }
}
