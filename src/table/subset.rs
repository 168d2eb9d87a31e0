//! Borrowed views over a table
//!
//! Row subsets and masked views never copy records. Both keep the source
//! table's row order.

use super::errors::TableResult;
use super::record::TransactionRecord;
use super::table::TransactionTable;

/// Anything aggregates can run over: a table, a subset or a masked view.
///
/// `row_indices` yields the participating rows in table order; rows a view
/// excludes are not yielded.
pub trait RowSource {
    /// Table the rows belong to
    fn table(&self) -> &TransactionTable;

    /// Participating row positions
    fn row_indices(&self) -> Vec<usize>;

    /// Participating records
    fn rows(&self) -> Vec<&TransactionRecord> {
        let table = self.table();
        self.row_indices()
            .into_iter()
            .filter_map(|i| table.get(i))
            .collect()
    }

    /// Number of participating rows
    fn row_count(&self) -> usize {
        self.row_indices().len()
    }
}

impl RowSource for TransactionTable {
    fn table(&self) -> &TransactionTable {
        self
    }

    fn row_indices(&self) -> Vec<usize> {
        (0..self.len()).collect()
    }

    fn row_count(&self) -> usize {
        self.len()
    }
}

/// Ordered selection of rows from a table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowSubset<'a> {
    table: &'a TransactionTable,
    indices: Vec<usize>,
}

impl<'a> RowSubset<'a> {
    /// Indices must be in bounds; callers in this crate check before building.
    pub(crate) fn new(table: &'a TransactionTable, indices: Vec<usize>) -> Self {
        Self { table, indices }
    }

    /// Source row positions
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a TransactionRecord> + '_ {
        let table = self.table;
        self.indices.iter().filter_map(move |&i| table.get(i))
    }

    /// Copies the selected rows into a new owned table.
    ///
    /// An empty subset cannot become a table.
    pub fn to_table(&self) -> TableResult<TransactionTable> {
        TransactionTable::new(self.iter().cloned().collect())
    }
}

impl RowSource for RowSubset<'_> {
    fn table(&self) -> &TransactionTable {
        self.table
    }

    fn row_indices(&self) -> Vec<usize> {
        self.indices.clone()
    }

    fn row_count(&self) -> usize {
        self.indices.len()
    }
}

/// Soft-delete overlay: every row stays in place, invalid rows are skipped
/// by aggregates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaskedView<'a> {
    table: &'a TransactionTable,
    valid: Vec<bool>,
}

impl<'a> MaskedView<'a> {
    /// `valid` must have one entry per table row.
    pub(crate) fn new(table: &'a TransactionTable, valid: Vec<bool>) -> Self {
        Self { table, valid }
    }

    /// Per-row validity flags, aligned to table order
    pub fn validity(&self) -> &[bool] {
        &self.valid
    }

    /// Whether row `index` is valid; out-of-range rows are not
    pub fn is_valid(&self, index: usize) -> bool {
        self.valid.get(index).copied().unwrap_or(false)
    }

    /// Positional row count, masked rows included
    pub fn len(&self) -> usize {
        self.valid.len()
    }

    pub fn is_empty(&self) -> bool {
        self.valid.is_empty()
    }

    /// Number of rows that are not masked
    pub fn valid_count(&self) -> usize {
        self.valid.iter().filter(|v| **v).count()
    }

    /// Every row paired with its validity flag
    pub fn iter(&self) -> impl Iterator<Item = (&'a TransactionRecord, bool)> + '_ {
        self.table.iter().zip(self.valid.iter().copied())
    }
}

impl RowSource for MaskedView<'_> {
    fn table(&self) -> &TransactionTable {
        self.table
    }

    fn row_indices(&self) -> Vec<usize> {
        self.valid
            .iter()
            .enumerate()
            .filter_map(|(i, valid)| valid.then_some(i))
            .collect()
    }
}
