//! End-to-end checks on the eight-row sample dataset

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;

use txnq::classify::{tier_counts, Tier, TierThresholds};
use txnq::query::{
    compare_revenue, filter_by_date_range, filter_by_quantity_greater_than, filter_by_user,
    increase_prices, most_purchased_product, top_products_by_revenue, total_revenue,
    transaction_counts_per_user, unique_user_count,
};
use txnq::table::{sample_transactions, Column, ColumnName, TableErrorCode, TransactionTable};

fn at(h: u32, m: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 8, 5)
        .unwrap()
        .and_hms_opt(h, m, 0)
        .unwrap()
}

fn dec(s: &str) -> Decimal {
    s.parse().unwrap()
}

fn sample() -> TransactionTable {
    TransactionTable::new(sample_transactions()).unwrap()
}

#[test]
fn test_headline_numbers() {
    let table = sample();
    assert_eq!(total_revenue(&table).unwrap(), dec("258.19"));
    assert_eq!(unique_user_count(&table), 4);
    assert_eq!(most_purchased_product(&table).unwrap(), 302);
    assert_eq!(filter_by_quantity_greater_than(&table, 1).len(), 3);
}

#[test]
fn test_query_shapes() {
    let table = sample();
    assert_eq!(
        compare_revenue(&table, (at(10, 0), at(10, 26)), (at(10, 0), at(10, 16))).unwrap(),
        (dec("87.93"), dec("31.98"))
    );
    assert_eq!(filter_by_date_range(&table, at(10, 20), at(10, 30)).unwrap().len(), 3);
    assert_eq!(filter_by_user(&table, 1).len(), 3);
    assert_eq!(top_products_by_revenue(&table, 5).unwrap().len(), 7);

    let counts: Vec<_> = transaction_counts_per_user(&table)
        .into_iter()
        .map(|c| (c.user_id, c.transaction_count))
        .collect();
    assert_eq!(counts, vec![(1, 3), (2, 3), (3, 1), (4, 1)]);
}

#[test]
fn test_increase_prices_five_percent() {
    let repriced = increase_prices(&sample(), dec("5")).unwrap();
    let expected: Vec<Decimal> = [
        "16.7895", "16.7895", "10.4895", "52.4895", "20.9895", "20.9895", "0.21", "0.105",
    ]
    .iter()
    .map(|s| dec(s))
    .collect();
    assert_eq!(repriced.unit_prices(), expected);
}

#[test]
fn test_column_extractors() {
    let table = sample();
    assert_eq!(table.whole_unit_prices(), vec![15, 15, 9, 49, 19, 19, 0, 0]);
    assert_eq!(table.user_ids(), vec![1, 2, 3, 4, 1, 1, 2, 2]);
    assert_eq!(table.quantities(), vec![2, 1, 4, 3, 1, 0, 1, 1]);
    assert_eq!(table.product_quantities()[3], (304, 3));
    assert_eq!(table.timestamps()[0], at(10, 15));

    for name in ColumnName::ALL {
        assert_eq!(table.column(name).len(), table.len());
    }
}

#[test]
fn test_column_by_name() {
    let table = sample();
    match table.column_by_name("product_id").unwrap() {
        Column::Int(values) => assert_eq!(values[7], 307),
        other => panic!("unexpected column {:?}", other),
    }
    let err = table.column_by_name("price").unwrap_err();
    assert_eq!(err.code(), TableErrorCode::UnknownColumn);
}

#[test]
fn test_schema_report() {
    let names: Vec<_> = sample()
        .schema()
        .into_iter()
        .map(|(name, ty)| format!("{}:{}", name, ty.type_name()))
        .collect();
    assert_eq!(names.len(), 6);
    assert!(names[0].starts_with("transaction_id:"));
    assert!(names[5].starts_with("timestamp:"));
}

#[test]
fn test_duplicate_transaction_id_accepted() {
    let table = sample();
    let ids = table.transaction_ids();
    assert_eq!(ids[6], ids[7]);
}

#[test]
fn test_default_tiers_all_low() {
    let table = sample();
    let counts = tier_counts(&table, &TierThresholds::default());
    assert_eq!(counts.low, 8);
    assert_eq!(TierThresholds::default().classify(dec("300")), Tier::High);
}
