//! Error types for CSV parsing

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for csvparse operations
pub type Result<T> = std::result::Result<T, CsvError>;

/// Errors that abandon a parse
///
/// Row and column positions are 1-based and refer to the row or cell that
/// was being accumulated when the violation was detected.
#[derive(Error, Debug)]
pub enum CsvError {
    /// The byte source could not be opened or read
    #[error("Source unavailable: {}: {source}", .path.display())]
    SourceUnavailable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A byte other than `,` or newline followed a quoted cell's closing quote
    #[error("Malformed quoting at row {row}, column {column}")]
    MalformedQuoting { row: usize, column: usize },

    /// A cell reached the maximum cell size
    #[error("Cell too long at row {row}, column {column}")]
    CellTooLong { row: usize, column: usize },

    /// A row reached the maximum column count
    #[error("Row {row} has too many cells")]
    RowTooWide { row: usize },

    /// The table reached the maximum row count
    #[error("Too many rows")]
    TableTooLarge,
}

impl CsvError {
    /// Wrap an I/O failure on the source identified by `path`
    pub(crate) fn source_unavailable(path: impl Into<PathBuf>, source: io::Error) -> Self {
        CsvError::SourceUnavailable {
            path: path.into(),
            source,
        }
    }

    /// The kind of this error, without its context
    pub fn kind(&self) -> ErrorKind {
        match self {
            CsvError::SourceUnavailable { .. } => ErrorKind::SourceUnavailable,
            CsvError::MalformedQuoting { .. } => ErrorKind::MalformedQuoting,
            CsvError::CellTooLong { .. } => ErrorKind::CellTooLong,
            CsvError::RowTooWide { .. } => ErrorKind::RowTooWide,
            CsvError::TableTooLarge => ErrorKind::TableTooLarge,
        }
    }
}

/// Context-free classification of a [`CsvError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    SourceUnavailable,
    MalformedQuoting,
    CellTooLong,
    RowTooWide,
    TableTooLarge,
}

impl ErrorKind {
    /// Numeric code used by the C `csvparse` interface (`0` is reserved for success)
    pub fn code(self) -> i32 {
        match self {
            ErrorKind::SourceUnavailable => 1,
            ErrorKind::MalformedQuoting => 2,
            ErrorKind::CellTooLong => 3,
            ErrorKind::RowTooWide => 4,
            ErrorKind::TableTooLarge => 5,
        }
    }
}
