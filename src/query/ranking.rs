//! Deterministic ranking of grouped aggregates
//!
//! Sort is stable and every tie has an explicit winner: the smallest key.

use std::cmp::Ordering;

use rust_decimal::Decimal;
use serde::Serialize;

use crate::table::ProductId;

/// Sort direction for the ranked value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RankDirection {
    /// Highest value first
    Desc,
    /// Lowest value first
    Asc,
}

/// Total revenue of one product
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProductRevenue {
    pub product_id: ProductId,
    pub revenue: Decimal,
}

/// Transaction count of one product
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ProductCount {
    pub product_id: ProductId,
    pub transaction_count: usize,
}

/// A keyed aggregate that can be ranked
pub trait Ranked {
    type Value: Ord;

    fn key(&self) -> i64;
    fn value(&self) -> &Self::Value;
}

impl Ranked for ProductRevenue {
    type Value = Decimal;

    fn key(&self) -> i64 {
        self.product_id
    }

    fn value(&self) -> &Decimal {
        &self.revenue
    }
}

impl Ranked for ProductCount {
    type Value = usize;

    fn key(&self) -> i64 {
        self.product_id
    }

    fn value(&self) -> &usize {
        &self.transaction_count
    }
}

/// Sorts keyed aggregates by value, breaking ties on the smaller key.
pub struct Ranker;

impl Ranker {
    /// Orders `entries` by value in `direction`, ties by ascending key.
    pub fn rank<T: Ranked>(entries: &mut [T], direction: RankDirection) {
        entries.sort_by(|a, b| Self::compare(a, b, direction));
    }

    /// The first entry in rank order, if any
    pub fn top<T: Ranked>(entries: &[T], direction: RankDirection) -> Option<&T> {
        entries
            .iter()
            .min_by(|a, b| Self::compare(*a, *b, direction))
    }

    fn compare<T: Ranked>(a: &T, b: &T, direction: RankDirection) -> Ordering {
        let by_value = match direction {
            RankDirection::Desc => b.value().cmp(a.value()),
            RankDirection::Asc => a.value().cmp(b.value()),
        };
        by_value.then_with(|| a.key().cmp(&b.key()))
    }
}
