//! txnq - A strict, deterministic analytics engine over immutable
//! transaction tables
//!
//! - `table`: the immutable transaction table, typed columns, subsets, masks
//! - `query`: revenue, filters, grouping, ranking and repricing
//! - `classify`: price tiers
//! - `format`: text, delimited and columnar table files
//! - `observability`: structured JSON-lines logging
//! - `cli`: the `txnq` command line

pub mod classify;
pub mod cli;
pub mod format;
pub mod observability;
pub mod query;
pub mod table;
