// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Row-at-a-time [`MemTable`] builder.

use linkgraph_core::{MemTable, MemTableError, Value};

/// Builds a [`MemTable`] from a header and rows of loosely typed cells.
///
/// # Example
///
/// ```
/// use linkgraph_dry_tests::TableBuilder;
/// use linkgraph_core::Table;
///
/// let table = TableBuilder::new(["A", "B"])
///     .row([1, 2])
///     .row([2, 3])
///     .build()
///     .unwrap();
/// assert_eq!(table.number_of_rows(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct TableBuilder {
    names: Vec<String>,
    rows: Vec<Vec<Option<Value>>>,
    pedigree: Option<String>,
}

impl TableBuilder {
    /// Starts a table with the given column names.
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
            pedigree: None,
        }
    }

    /// Appends a row where every cell is valid.
    pub fn row<I, V>(self, cells: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        self.cells(cells.into_iter().map(|c| Some(c.into())))
    }

    /// Appends a row where `None` marks an invalid cell.
    pub fn cells<I>(mut self, cells: I) -> Self
    where
        I: IntoIterator<Item = Option<Value>>,
    {
        self.rows.push(cells.into_iter().collect());
        self
    }

    /// Marks a column as carrying pre-existing pedigree ids.
    pub fn pedigree(mut self, column: impl Into<String>) -> Self {
        self.pedigree = Some(column.into());
        self
    }

    /// Builds the table, rejecting ragged rows.
    pub fn build(self) -> Result<MemTable, MemTableError> {
        let mut table = MemTable::new(self.names)?;
        for row in self.rows {
            table.push_row(row)?;
        }
        if let Some(column) = self.pedigree {
            table.set_pedigree_column(&column)?;
        }
        Ok(table)
    }
}
