//! # csvparse
//!
//! Loads a small delimited text file into an in-memory [`Table`] of raw
//! text cells.
//!
//! ## Grammar
//!
//! - Cells are separated by `,` and rows end with `\n`
//! - A cell starting with `"` runs to the next `"` and may contain commas
//!   and newlines; only `,` or `\n` may follow the closing quote
//! - `""` does not close the cell: a quote on an empty cell always opens it
//! - Blank lines are skipped
//! - A line ending in `,` has no trailing empty cell
//! - Bytes after the last newline are ignored
//! - Cells are bytes, `\r` included; nothing is trimmed or typed
//!
//! ## Limits
//!
//! Cell size, row width and row count are capped by the fixed constants in
//! [`csv`]. The first violation abandons the parse and nothing is returned
//! but the error.
//!
//! ## Quick Start
//!
//! ```no_run
//! use csvparse::{parse, ErrorKind};
//!
//! match parse("data.csv") {
//!     Ok(table) => {
//!         for row in &table {
//!             println!("{} cells: {:?}", row.len(), row.to_strings());
//!         }
//!     }
//!     Err(e) if e.kind() == ErrorKind::SourceUnavailable => eprintln!("cannot read: {}", e),
//!     Err(e) => eprintln!("invalid CSV: {}", e),
//! }
//! ```
//!
//! ## Features
//!
//! - `serde`: `Serialize` for [`Cell`], [`Row`] and [`Table`]

pub mod csv;
pub mod csv_reader;
pub mod error;
pub mod types;

pub use csv::CsvParser;
pub use csv_reader::{parse, parse_bytes, parse_reader, CsvReader};
pub use error::{CsvError, ErrorKind, Result};
pub use types::{Cell, Row, Table};
