//! Price tier classification
//!
//! A closed set of tiers chosen by ordered threshold comparison:
//! `value < medium_from` is Low, `value < high_from` is Medium, anything
//! else is High.

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::table::RowSource;

/// Price tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    Low,
    Medium,
    High,
}

impl Tier {
    pub fn as_str(&self) -> &'static str {
        match self {
            Tier::Low => "low",
            Tier::Medium => "medium",
            Tier::High => "high",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Lower bounds of the Medium and High tiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierThresholds {
    pub medium_from: Decimal,
    pub high_from: Decimal,
}

impl Default for TierThresholds {
    fn default() -> Self {
        Self {
            medium_from: Decimal::ONE_HUNDRED,
            high_from: Decimal::from(300),
        }
    }
}

impl TierThresholds {
    /// Bounds must be ordered
    pub fn is_valid(&self) -> bool {
        self.medium_from <= self.high_from
    }

    pub fn classify(&self, value: Decimal) -> Tier {
        if value < self.medium_from {
            Tier::Low
        } else if value < self.high_from {
            Tier::Medium
        } else {
            Tier::High
        }
    }
}

/// Tier of every participating row's unit price, in row order
pub fn price_tiers<S: RowSource + ?Sized>(rows: &S, thresholds: &TierThresholds) -> Vec<Tier> {
    rows.rows()
        .into_iter()
        .map(|r| thresholds.classify(r.unit_price))
        .collect()
}

/// Row count per tier as `(low, medium, high)`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TierCounts {
    pub low: usize,
    pub medium: usize,
    pub high: usize,
}

pub fn tier_counts<S: RowSource + ?Sized>(rows: &S, thresholds: &TierThresholds) -> TierCounts {
    let mut counts = TierCounts::default();
    for tier in price_tiers(rows, thresholds) {
        match tier {
            Tier::Low => counts.low += 1,
            Tier::Medium => counts.medium += 1,
            Tier::High => counts.high += 1,
        }
    }
    counts
}
