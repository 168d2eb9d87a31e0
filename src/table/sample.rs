//! Built-in sample dataset

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;

use super::record::TransactionRecord;

fn at(hour: u32, minute: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 8, 5)
        .and_then(|d| d.and_hms_opt(hour, minute, 0))
        .unwrap_or_default()
}

/// The eight-row purchase sample from 2024-08-05.
///
/// Transaction id 1007 appears twice; ids are not a primary key.
pub fn sample_transactions() -> Vec<TransactionRecord> {
    let row = |id, user, product, qty, price: (i64, u32), h, m| {
        let unit_price = Decimal::new(price.0, price.1);
        TransactionRecord::new(id, user, product, qty, unit_price, at(h, m))
    };
    vec![
        row(1001, 1, 302, 2, (1599, 2), 10, 15),
        row(1002, 2, 302, 1, (1599, 2), 10, 20),
        row(1003, 3, 303, 4, (999, 2), 10, 25),
        row(1004, 4, 304, 3, (4999, 2), 10, 30),
        row(1005, 1, 305, 1, (1999, 2), 10, 35),
        row(1006, 1, 305, 0, (1999, 2), 10, 35),
        row(1007, 2, 306, 1, (2, 1), 10, 35),
        row(1007, 2, 307, 1, (1, 1), 10, 35),
    ]
}
