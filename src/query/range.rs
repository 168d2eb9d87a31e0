//! Inclusive timestamp ranges

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::errors::{QueryError, QueryResult};

/// Closed interval `[start, end]` over naive timestamps.
///
/// `start <= end` holds for every constructed value, deserialized ones
/// included.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawDateRange")]
pub struct DateRange {
    start: NaiveDateTime,
    end: NaiveDateTime,
}

impl DateRange {
    /// Rejects `start > end` instead of matching nothing.
    pub fn new(start: NaiveDateTime, end: NaiveDateTime) -> QueryResult<Self> {
        if start > end {
            return Err(QueryError::invalid_range(start, end));
        }
        Ok(Self { start, end })
    }

    /// Range covering every representable timestamp
    pub fn unbounded() -> Self {
        Self {
            start: NaiveDateTime::MIN,
            end: NaiveDateTime::MAX,
        }
    }

    pub fn start(&self) -> NaiveDateTime {
        self.start
    }

    pub fn end(&self) -> NaiveDateTime {
        self.end
    }

    /// Inclusive on both ends
    pub fn contains(&self, ts: NaiveDateTime) -> bool {
        self.start <= ts && ts <= self.end
    }
}

#[derive(Deserialize)]
struct RawDateRange {
    start: NaiveDateTime,
    end: NaiveDateTime,
}

impl TryFrom<RawDateRange> for DateRange {
    type Error = QueryError;

    fn try_from(raw: RawDateRange) -> QueryResult<Self> {
        DateRange::new(raw.start, raw.end)
    }
}
