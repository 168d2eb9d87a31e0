//! Immutable transaction table
//!
//! Constructed once from an ordered record list, never mutated. Insertion
//! order is source order and every derived view preserves it.

use crate::observability::{log_event_with_fields, Event};

use super::errors::{TableError, TableResult};
use super::record::{ColumnName, ColumnType, TransactionRecord};
use super::subset::{MaskedView, RowSubset};
use super::validator::RecordValidator;

/// Ordered, immutable sequence of transaction records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionTable {
    records: Vec<TransactionRecord>,
}

impl TransactionTable {
    /// Builds a table from typed records.
    ///
    /// # Errors
    ///
    /// - `TXN_EMPTY_INPUT` if `records` is empty
    /// - `TXN_SCHEMA_VIOLATION` if a record carries a negative price
    pub fn new(records: Vec<TransactionRecord>) -> TableResult<Self> {
        if let Err(e) = Self::validate(&records) {
            Self::log_rejection(&e);
            return Err(e);
        }
        log_event_with_fields(Event::TableLoaded, &[("rows", &records.len().to_string())]);
        Ok(Self { records })
    }

    /// Builds a table from raw text rows in schema column order.
    ///
    /// The first row that fails conversion aborts construction.
    pub fn from_rows<R, S>(rows: impl IntoIterator<Item = R>) -> TableResult<Self>
    where
        R: AsRef<[S]>,
        S: AsRef<str>,
    {
        let converted: TableResult<Vec<_>> = rows
            .into_iter()
            .enumerate()
            .map(|(i, row)| RecordValidator::convert_row(i, row.as_ref()))
            .collect();

        match converted {
            Ok(records) => Self::new(records),
            Err(e) => {
                Self::log_rejection(&e);
                Err(e)
            }
        }
    }

    /// Wraps records already known to satisfy the table invariants.
    pub(crate) fn from_validated(records: Vec<TransactionRecord>) -> Self {
        debug_assert!(!records.is_empty());
        Self { records }
    }

    fn validate(records: &[TransactionRecord]) -> TableResult<()> {
        if records.is_empty() {
            return Err(TableError::empty_input());
        }
        records
            .iter()
            .enumerate()
            .try_for_each(|(i, r)| RecordValidator::check_record(i, r))
    }

    fn log_rejection(err: &TableError) {
        log_event_with_fields(
            Event::TableRejected,
            &[("code", err.code().code()), ("reason", err.message())],
        );
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Always false for a constructed table; kept for API symmetry
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// All records in insertion order
    pub fn records(&self) -> &[TransactionRecord] {
        &self.records
    }

    /// Record at `index`, if present
    pub fn get(&self, index: usize) -> Option<&TransactionRecord> {
        self.records.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &TransactionRecord> {
        self.records.iter()
    }

    /// Column names and types in schema order
    pub fn schema(&self) -> Vec<(ColumnName, ColumnType)> {
        ColumnName::ALL
            .into_iter()
            .map(|c| (c, c.column_type()))
            .collect()
    }

    /// Selects rows by index list, in the order given.
    pub fn select(&self, indices: &[usize]) -> TableResult<RowSubset<'_>> {
        if let Some(&bad) = indices.iter().find(|&&i| i >= self.len()) {
            return Err(TableError::row_out_of_bounds(bad, self.len()));
        }
        Ok(RowSubset::new(self, indices.to_vec()))
    }

    /// Selects the rows whose mask entry is true.
    pub fn select_mask(&self, mask: &[bool]) -> TableResult<RowSubset<'_>> {
        if mask.len() != self.len() {
            return Err(TableError::mask_length_mismatch(mask.len(), self.len()));
        }
        let indices = mask
            .iter()
            .enumerate()
            .filter_map(|(i, keep)| keep.then_some(i))
            .collect();
        Ok(RowSubset::new(self, indices))
    }

    /// Overlays a validity mask without removing any row.
    pub fn mask(&self, valid: Vec<bool>) -> TableResult<MaskedView<'_>> {
        if valid.len() != self.len() {
            return Err(TableError::mask_length_mismatch(valid.len(), self.len()));
        }
        Ok(MaskedView::new(self, valid))
    }
}

impl<'a> IntoIterator for &'a TransactionTable {
    type Item = &'a TransactionRecord;
    type IntoIter = std::slice::Iter<'a, TransactionRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
