//! Transaction table subsystem
//!
//! An immutable, row-ordered store of purchase transactions with typed
//! column access.
//!
//! # Design Principles
//!
//! - Constructed once, never mutated
//! - Conversion errors surface at construction, never per query
//! - Insertion order is the only row order
//! - Subsets and masks borrow the table, they do not copy it

mod columns;
mod errors;
mod record;
mod sample;
mod subset;
mod table;
mod validator;

pub use columns::Column;
pub use errors::{FieldViolation, TableError, TableErrorCode, TableResult};
pub use record::{ColumnName, ColumnType, ProductId, TransactionId, TransactionRecord, UserId};
pub use sample::sample_transactions;
pub use subset::{MaskedView, RowSource, RowSubset};
pub use table::TransactionTable;
pub use validator::{parse_timestamp_str, RecordValidator};
