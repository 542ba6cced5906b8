// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Table port consumed by the filter, plus a small owned implementation.
//!
//! Readers (CSV, SQL, ...) live outside this crate; they only need to expose
//! named columns and per-cell [`Value`]s through [`Table`].

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::value::Value;

/// Opaque handle to a column, valid only for the table that produced it.
#[repr(transparent)]
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct ColumnHandle(pub usize);

/// Row-oriented read access to a dataset with named columns.
///
/// A cell that is `None` is *invalid*: a null entry that never becomes a
/// vertex.
pub trait Table {
    /// Number of rows.
    fn number_of_rows(&self) -> usize;
    /// Number of columns.
    fn number_of_columns(&self) -> usize;
    /// Name of the column at `index`.
    fn column_name(&self, index: usize) -> Option<&str>;
    /// Looks up a column by name.
    fn column_by_name(&self, name: &str) -> Option<ColumnHandle>;
    /// Reads one cell. `None` when the cell is invalid or out of range.
    fn cell(&self, row: usize, column: ColumnHandle) -> Option<Value>;

    /// Column carrying pre-existing unique row ids, if the table has one.
    fn pedigree_column(&self) -> Option<ColumnHandle> {
        None
    }

    /// Whether rows already carry pedigree ids.
    fn has_existing_ids(&self) -> bool {
        self.pedigree_column().is_some()
    }

    /// Pre-existing pedigree id of `row`.
    fn id_at(&self, row: usize) -> Option<Value> {
        self.cell(row, self.pedigree_column()?)
    }

    /// All column names, in column order.
    fn column_names(&self) -> Vec<String> {
        (0..self.number_of_columns())
            .map(|c| self.column_name(c).unwrap_or_default().to_owned())
            .collect()
    }

    /// Copies a whole row, in column order.
    fn row(&self, row: usize) -> Vec<Option<Value>> {
        (0..self.number_of_columns())
            .map(|c| self.cell(row, ColumnHandle(c)))
            .collect()
    }
}

/// Errors returned when building a [`MemTable`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MemTableError {
    /// Two columns share a name.
    #[error("duplicate column: {0}")]
    DuplicateColumn(String),
    /// A column's length differs from the table's row count.
    #[error("column {column} has {len} rows, expected {expected}")]
    RaggedColumn {
        /// Offending column.
        column: String,
        /// Its length.
        len: usize,
        /// Row count of the first column.
        expected: usize,
    },
    /// A row has the wrong number of cells.
    #[error("row has {len} cells, expected {expected}")]
    RaggedRow {
        /// Cells supplied.
        len: usize,
        /// Column count.
        expected: usize,
    },
    /// The requested pedigree column does not exist.
    #[error("unknown pedigree column: {0}")]
    UnknownPedigreeColumn(String),
}

/// Owned columnar table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MemTable {
    names: Vec<String>,
    columns: Vec<Vec<Option<Value>>>,
    rows: usize,
    pedigree: Option<usize>,
}

impl MemTable {
    /// Creates an empty table with the given column names.
    pub fn new<I, S>(names: I) -> Result<Self, MemTableError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut table = Self::default();
        for name in names {
            table.add_column(name, Vec::new())?;
        }
        Ok(table)
    }

    /// Appends a column. The first column fixes the row count.
    pub fn add_column(
        &mut self,
        name: impl Into<String>,
        cells: Vec<Option<Value>>,
    ) -> Result<ColumnHandle, MemTableError> {
        let name = name.into();
        if self.names.contains(&name) {
            return Err(MemTableError::DuplicateColumn(name));
        }
        if self.columns.is_empty() {
            self.rows = cells.len();
        } else if cells.len() != self.rows {
            return Err(MemTableError::RaggedColumn {
                column: name,
                len: cells.len(),
                expected: self.rows,
            });
        }
        self.names.push(name);
        self.columns.push(cells);
        Ok(ColumnHandle(self.columns.len() - 1))
    }

    /// Appends a row of cells in column order.
    pub fn push_row(&mut self, cells: Vec<Option<Value>>) -> Result<usize, MemTableError> {
        if cells.len() != self.columns.len() {
            return Err(MemTableError::RaggedRow {
                len: cells.len(),
                expected: self.columns.len(),
            });
        }
        for (column, cell) in self.columns.iter_mut().zip(cells) {
            column.push(cell);
        }
        self.rows += 1;
        Ok(self.rows - 1)
    }

    /// Marks `name` as the column holding pre-existing pedigree ids.
    pub fn set_pedigree_column(&mut self, name: &str) -> Result<(), MemTableError> {
        let index = self
            .names
            .iter()
            .position(|n| n == name)
            .ok_or_else(|| MemTableError::UnknownPedigreeColumn(name.to_owned()))?;
        self.pedigree = Some(index);
        Ok(())
    }
}

impl Table for MemTable {
    fn number_of_rows(&self) -> usize {
        self.rows
    }

    fn number_of_columns(&self) -> usize {
        self.columns.len()
    }

    fn column_name(&self, index: usize) -> Option<&str> {
        self.names.get(index).map(String::as_str)
    }

    fn column_by_name(&self, name: &str) -> Option<ColumnHandle> {
        self.names.iter().position(|n| n == name).map(ColumnHandle)
    }

    fn cell(&self, row: usize, column: ColumnHandle) -> Option<Value> {
        self.columns.get(column.0)?.get(row)?.clone()
    }

    fn pedigree_column(&self) -> Option<ColumnHandle> {
        self.pedigree.map(ColumnHandle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ragged_rows_and_columns_are_rejected() -> Result<(), MemTableError> {
        let mut t = MemTable::new(["a", "b"])?;
        t.push_row(vec![Some(1.into()), None])?;
        assert_eq!(
            t.push_row(vec![Some(1.into())]),
            Err(MemTableError::RaggedRow {
                len: 1,
                expected: 2
            })
        );
        assert!(matches!(
            t.add_column("c", Vec::new()),
            Err(MemTableError::RaggedColumn { .. })
        ));
        assert_eq!(
            t.add_column("a", vec![None]),
            Err(MemTableError::DuplicateColumn("a".into()))
        );
        Ok(())
    }

    #[test]
    fn cells_and_pedigree_ids() -> Result<(), MemTableError> {
        let mut t = MemTable::new(["id", "name"])?;
        t.push_row(vec![Some(10.into()), Some("x".into())])?;
        t.push_row(vec![Some(11.into()), None])?;
        assert!(!t.has_existing_ids());
        t.set_pedigree_column("id")?;
        assert!(t.has_existing_ids());
        assert_eq!(t.id_at(1), Some(Value::from(11)));
        let name = t.column_by_name("name");
        assert_eq!(name, Some(ColumnHandle(1)));
        assert_eq!(t.cell(1, ColumnHandle(1)), None);
        assert_eq!(t.row(0), vec![Some(10.into()), Some("x".into())]);
        assert_eq!(t.column_names(), vec!["id".to_owned(), "name".to_owned()]);
        Ok(())
    }
}
