//! Type definitions for parsed CSV data
//!
//! A [`Table`] owns its [`Row`]s, and each row owns its [`Cell`]s. Nothing is
//! shared, so dropping a table releases everything a parse produced.

use std::borrow::Cow;
use std::fmt;
use std::ops::Index;
use std::slice;

/// One field of raw text within a row
///
/// Cells are byte strings: the grammar is byte-oriented and never validates
/// encoding. Use [`Cell::as_str`] or [`Cell::to_string_lossy`] to get text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Cell {
    bytes: Box<[u8]>,
}

impl Cell {
    /// Create a cell from raw bytes
    pub fn new(bytes: impl Into<Box<[u8]>>) -> Self {
        Cell {
            bytes: bytes.into(),
        }
    }

    /// Raw bytes of the cell
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Cell contents as `&str`, if they are valid UTF-8
    pub fn as_str(&self) -> Option<&str> {
        std::str::from_utf8(&self.bytes).ok()
    }

    /// Cell contents as text, replacing invalid UTF-8 sequences
    pub fn to_string_lossy(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.bytes)
    }

    /// Length in bytes
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Check if cell is empty
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_string_lossy())
    }
}

impl AsRef<[u8]> for Cell {
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}

impl From<&str> for Cell {
    fn from(s: &str) -> Self {
        Cell::new(s.as_bytes())
    }
}

impl From<String> for Cell {
    fn from(s: String) -> Self {
        Cell::new(s.into_bytes())
    }
}

impl From<Vec<u8>> for Cell {
    fn from(bytes: Vec<u8>) -> Self {
        Cell::new(bytes)
    }
}

impl PartialEq<str> for Cell {
    fn eq(&self, other: &str) -> bool {
        self.as_bytes() == other.as_bytes()
    }
}

impl PartialEq<&str> for Cell {
    fn eq(&self, other: &&str) -> bool {
        self.as_bytes() == other.as_bytes()
    }
}

/// An ordered sequence of cells corresponding to one logical line
///
/// Rows in a table may have different widths.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Row {
    cells: Vec<Cell>,
}

impl Row {
    /// Create a new row
    pub fn new(cells: Vec<Cell>) -> Self {
        Row { cells }
    }

    /// Get cell by column index (0-based)
    pub fn get(&self, col: usize) -> Option<&Cell> {
        self.cells.get(col)
    }

    /// Number of cells in the row
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Check if row has no cells
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// All cells of the row
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Iterate over the cells
    pub fn iter(&self) -> slice::Iter<'_, Cell> {
        self.cells.iter()
    }

    /// Convert row to vector of strings (lossy for non UTF-8 cells)
    pub fn to_strings(&self) -> Vec<String> {
        self.cells
            .iter()
            .map(|c| c.to_string_lossy().into_owned())
            .collect()
    }

    /// Take ownership of the cells
    pub fn into_cells(self) -> Vec<Cell> {
        self.cells
    }
}

impl Index<usize> for Row {
    type Output = Cell;

    fn index(&self, col: usize) -> &Cell {
        &self.cells[col]
    }
}

impl<'a> IntoIterator for &'a Row {
    type Item = &'a Cell;
    type IntoIter = slice::Iter<'a, Cell>;

    fn into_iter(self) -> Self::IntoIter {
        self.cells.iter()
    }
}

impl IntoIterator for Row {
    type Item = Cell;
    type IntoIter = std::vec::IntoIter<Cell>;

    fn into_iter(self) -> Self::IntoIter {
        self.cells.into_iter()
    }
}

impl<C: Into<Cell>> FromIterator<C> for Row {
    fn from_iter<I: IntoIterator<Item = C>>(iter: I) -> Self {
        Row::new(iter.into_iter().map(Into::into).collect())
    }
}

/// The ordered rows produced by a successful parse
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Table {
    rows: Vec<Row>,
}

impl Table {
    /// Create a new table
    pub fn new(rows: Vec<Row>) -> Self {
        Table { rows }
    }

    /// Number of rows in the table
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Alias for [`Table::row_count`]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Check if table has no rows
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Get row by index (0-based)
    pub fn get(&self, row: usize) -> Option<&Row> {
        self.rows.get(row)
    }

    /// All rows of the table
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Iterate over the rows
    pub fn iter(&self) -> slice::Iter<'_, Row> {
        self.rows.iter()
    }

    /// Take ownership of the rows
    pub fn into_rows(self) -> Vec<Row> {
        self.rows
    }

    /// Convert every row to strings
    pub fn to_strings(&self) -> Vec<Vec<String>> {
        self.rows.iter().map(Row::to_strings).collect()
    }
}

impl Index<usize> for Table {
    type Output = Row;

    fn index(&self, row: usize) -> &Row {
        &self.rows[row]
    }
}

impl<'a> IntoIterator for &'a Table {
    type Item = &'a Row;
    type IntoIter = slice::Iter<'a, Row>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}

impl IntoIterator for Table {
    type Item = Row;
    type IntoIter = std::vec::IntoIter<Row>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.into_iter()
    }
}

impl FromIterator<Row> for Table {
    fn from_iter<I: IntoIterator<Item = Row>>(iter: I) -> Self {
        Table::new(iter.into_iter().collect())
    }
}

#[cfg(feature = "serde")]
mod serde_impl {
    use super::{Cell, Row, Table};
    use serde::ser::{Serialize, SerializeSeq, Serializer};

    // Text when it decodes, raw bytes otherwise.
    impl Serialize for Cell {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            match self.as_str() {
                Some(s) => serializer.serialize_str(s),
                None => serializer.serialize_bytes(self.as_bytes()),
            }
        }
    }

    impl Serialize for Row {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            let mut seq = serializer.serialize_seq(Some(self.len()))?;
            for cell in self {
                seq.serialize_element(cell)?;
            }
            seq.end()
        }
    }

    impl Serialize for Table {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            let mut seq = serializer.serialize_seq(Some(self.row_count()))?;
            for row in self {
                seq.serialize_element(row)?;
            }
            seq.end()
        }
    }
}
