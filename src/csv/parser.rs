//! Byte-at-a-time CSV tokenizer
//!
//! Grammar: cells are separated by `,`, rows are terminated by `\n`. A cell
//! that starts with `"` is quoted and may contain commas and newlines until
//! its closing quote, which must be followed by `,` or `\n`. Doubled quotes
//! are not an escape: a quote on an empty cell always opens it, so `""`
//! keeps the cell open, while a newline on a still-empty quoted cell ends
//! the row. Consecutive newlines collapse, so blank lines produce
//! no rows. Bytes after the last newline are discarded.

use super::limits::{MAX_CELL_SIZE, MAX_COLUMNS, MAX_ROWS};
use crate::error::{CsvError, Result};
use crate::types::{Cell, Row, Table};

const QUOTE: u8 = b'"';
const COMMA: u8 = b',';
const NEWLINE: u8 = b'\n';

/// Incremental CSV parser
///
/// Feed it one byte at a time with [`CsvParser::step`] and collect the
/// table with [`CsvParser::finish`]. The parser never looks ahead: each
/// decision depends only on the current byte and the state left by earlier
/// ones. Any error leaves the parser unusable; drop it and start over.
///
/// # Examples
///
/// ```
/// use csvparse::csv::CsvParser;
///
/// let mut parser = CsvParser::new();
/// parser.feed(b"a,b\n\nc,,d\n").unwrap();
/// let table = parser.finish();
///
/// assert_eq!(table.row_count(), 2);
/// assert_eq!(table[1].to_strings(), vec!["c", "", "d"]);
/// ```
#[derive(Debug, Default)]
pub struct CsvParser {
    // Accumulation buffers
    cell: Vec<u8>,
    row: Vec<Cell>,
    rows: Vec<Row>,

    // Quoting state
    in_quoted_cell: bool,
    just_closed_quote: bool,
    last_byte: Option<u8>,
}

impl CsvParser {
    /// Create a parser with empty buffers
    pub fn new() -> Self {
        Self::default()
    }

    /// Consume a single byte
    pub fn step(&mut self, byte: u8) -> Result<()> {
        self.check_capacity()?;

        if byte == QUOTE {
            // An empty cell (re)opens, so `""` leaves the quote open
            if self.cell.is_empty() {
                self.in_quoted_cell = true;
                self.last_byte = Some(byte);
                return Ok(());
            }
            if self.in_quoted_cell {
                // Closing quote, or a repeat of it; never appended
                self.just_closed_quote = true;
                self.last_byte = Some(byte);
                return Ok(());
            }
        }

        if self.just_closed_quote && byte != COMMA && byte != NEWLINE {
            return Err(CsvError::MalformedQuoting {
                row: self.rows.len() + 1,
                column: self.row.len() + 1,
            });
        }

        let inside_quotes = self.in_quoted_cell && !self.just_closed_quote;
        match byte {
            COMMA if !inside_quotes => {
                self.flush_cell();
                self.reset_quoting();
            }
            // An open quote holds a newline only once its cell has content
            NEWLINE if !inside_quotes || self.cell.is_empty() => {
                if self.last_byte == Some(NEWLINE) {
                    return Ok(());
                }
                // The comma ending the line already closed its last cell
                if self.last_byte != Some(COMMA) {
                    self.flush_cell();
                }
                self.flush_row();
                self.reset_quoting();
            }
            _ => self.cell.push(byte),
        }

        self.last_byte = Some(byte);
        Ok(())
    }

    /// Consume a slice of bytes, stopping at the first error
    pub fn feed(&mut self, bytes: &[u8]) -> Result<()> {
        for &byte in bytes {
            self.step(byte)?;
        }
        Ok(())
    }

    /// Number of rows completed so far
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Package the completed rows into a table
    ///
    /// A final line without a terminating newline is discarded.
    pub fn finish(self) -> Table {
        if !self.cell.is_empty() || !self.row.is_empty() {
            tracing::debug!(
                cells = self.row.len(),
                pending_bytes = self.cell.len(),
                "discarding unterminated final line"
            );
        }
        Table::new(self.rows)
    }

    fn check_capacity(&self) -> Result<()> {
        if self.cell.len() >= MAX_CELL_SIZE - 1 {
            return Err(CsvError::CellTooLong {
                row: self.rows.len() + 1,
                column: self.row.len() + 1,
            });
        }
        if self.row.len() >= MAX_COLUMNS - 1 {
            return Err(CsvError::RowTooWide {
                row: self.rows.len() + 1,
            });
        }
        if self.rows.len() >= MAX_ROWS - 1 {
            return Err(CsvError::TableTooLarge);
        }
        Ok(())
    }

    fn flush_cell(&mut self) {
        let cell = Cell::new(std::mem::take(&mut self.cell));
        self.row.push(cell);
    }

    fn flush_row(&mut self) {
        let row = Row::new(std::mem::take(&mut self.row));
        self.rows.push(row);
    }

    fn reset_quoting(&mut self) {
        self.in_quoted_cell = false;
        self.just_closed_quote = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn parse(input: &str) -> Result<Vec<Vec<String>>> {
        let mut parser = CsvParser::new();
        parser.feed(input.as_bytes())?;
        Ok(parser.finish().to_strings())
    }

    fn parse_err(input: &[u8]) -> ErrorKind {
        let mut parser = CsvParser::new();
        match parser.feed(input) {
            Ok(()) => panic!("expected parse error"),
            Err(e) => e.kind(),
        }
    }

    #[test]
    fn test_simple() -> Result<()> {
        assert_eq!(parse("a,b,c\n")?, vec![vec!["a", "b", "c"]]);
        Ok(())
    }

    #[test]
    fn test_blank_lines_skipped() -> Result<()> {
        assert_eq!(
            parse("a,b\n\nc,,d\n")?,
            vec![vec!["a", "b"], vec!["c", "", "d"]]
        );
        assert_eq!(parse("a\n\n\n\nb\n")?, vec![vec!["a"], vec!["b"]]);
        Ok(())
    }

    #[test]
    fn test_quoted_comma() -> Result<()> {
        assert_eq!(parse("\"x,y\",z\n")?, vec![vec!["x,y", "z"]]);
        Ok(())
    }

    #[test]
    fn test_quoted_newline() -> Result<()> {
        assert_eq!(
            parse("\"Line 1\nLine 2\",normal\nnext\n")?,
            vec![vec!["Line 1\nLine 2", "normal"], vec!["next"]]
        );
        Ok(())
    }

    #[test]
    fn test_quoted_blank_lines_kept() -> Result<()> {
        assert_eq!(parse("\"a\n\nb\"\n")?, vec![vec!["a\n\nb"]]);
        Ok(())
    }

    #[test]
    fn test_trailing_comma() -> Result<()> {
        // No empty cell follows a comma that ends the line
        assert_eq!(parse("a,\n")?, vec![vec!["a"]]);
        assert_eq!(parse("a,b,\n")?, vec![vec!["a", "b"]]);
        assert_eq!(parse(",\n")?, vec![vec![""]]);
        Ok(())
    }

    #[test]
    fn test_leading_empty_cell() -> Result<()> {
        assert_eq!(
            parse(",test1,123,\"with comma, at end of row\"\n")?,
            vec![vec!["", "test1", "123", "with comma, at end of row"]]
        );
        Ok(())
    }

    #[test]
    fn test_leading_newline_yields_empty_row() -> Result<()> {
        assert_eq!(parse("\nnon,empty\n")?, vec![vec![""], vec!["non", "empty"]]);
        Ok(())
    }

    #[test]
    fn test_doubled_quote_reopens_cell() -> Result<()> {
        // The comma after `""` is content of the still open cell
        assert_eq!(
            parse("\"\",x\"\nnext\n")?,
            vec![vec![",x"], vec!["next"]]
        );
        assert_eq!(parse("\"\",x\"\"\n")?, vec![vec![",x"]]);
        Ok(())
    }

    #[test]
    fn test_doubled_quote_then_newline() -> Result<()> {
        assert_eq!(parse("\"\"\n\"\n")?, vec![vec![""], vec![""]]);
        assert_eq!(parse("a,\"\"\nb\n")?, vec![vec!["a", ""], vec!["b"]]);
        Ok(())
    }

    #[test]
    fn test_doubled_quote_keeps_later_newline() -> Result<()> {
        // `""` never closes, so the newline after `,x` is cell content
        assert_eq!(parse("\"\",x\ny\"\n")?, vec![vec![",x\ny"]]);
        assert!(parse("\"\",x\n")?.is_empty());
        Ok(())
    }

    #[test]
    fn test_repeated_closing_quote() -> Result<()> {
        assert_eq!(parse("\"a\"\",b\n")?, vec![vec!["a", "b"]]);
        Ok(())
    }

    #[test]
    fn test_quote_inside_unquoted_cell() -> Result<()> {
        assert_eq!(parse("ab\"c,d\n")?, vec![vec!["ab\"c", "d"]]);
        Ok(())
    }

    #[test]
    fn test_carriage_return_is_content() -> Result<()> {
        assert_eq!(parse("a,b\r\n")?, vec![vec!["a", "b\r"]]);
        Ok(())
    }

    #[test]
    fn test_unterminated_line_dropped() -> Result<()> {
        assert_eq!(parse("a,b\nc,d")?, vec![vec!["a", "b"]]);
        assert!(parse("no newline")?.is_empty());
        assert!(parse("")?.is_empty());
        Ok(())
    }

    #[test]
    fn test_ragged_rows() -> Result<()> {
        assert_eq!(
            parse("a\nb,c,d\ne,f\n")?,
            vec![vec!["a"], vec!["b", "c", "d"], vec!["e", "f"]]
        );
        Ok(())
    }

    #[test]
    fn test_malformed_quoting() {
        assert_eq!(parse_err(b"\"abc\"d,e\n"), ErrorKind::MalformedQuoting);
        assert_eq!(parse_err(b"\"a\" ,b\n"), ErrorKind::MalformedQuoting);
        assert_eq!(parse_err(b"\"a\"\"b\"\n"), ErrorKind::MalformedQuoting);
    }

    #[test]
    fn test_malformed_quoting_position() {
        let mut parser = CsvParser::new();
        parser.feed(b"a,b\n").unwrap();
        let err = parser.feed(b"c,\"d\"x").unwrap_err();
        assert!(matches!(
            err,
            CsvError::MalformedQuoting { row: 2, column: 2 }
        ));
    }

    #[test]
    fn test_cell_too_long() {
        let input = vec![b'x'; MAX_CELL_SIZE];
        assert_eq!(parse_err(&input), ErrorKind::CellTooLong);
    }

    #[test]
    fn test_cell_size_boundary() -> Result<()> {
        let mut input = vec![b'x'; MAX_CELL_SIZE - 2];
        input.push(b'\n');
        let mut parser = CsvParser::new();
        parser.feed(&input)?;
        let table = parser.finish();
        assert_eq!(table[0][0].len(), MAX_CELL_SIZE - 2);

        let mut input = vec![b'x'; MAX_CELL_SIZE - 1];
        input.push(b'\n');
        assert_eq!(parse_err(&input), ErrorKind::CellTooLong);
        Ok(())
    }

    #[test]
    fn test_row_too_wide() {
        let mut input = ",".repeat(MAX_COLUMNS - 1).into_bytes();
        input.push(b'\n');
        assert_eq!(parse_err(&input), ErrorKind::RowTooWide);
    }

    #[test]
    fn test_row_width_boundary() -> Result<()> {
        let line = vec!["c"; MAX_COLUMNS - 1].join(",") + "\n";
        assert_eq!(parse(&line)?[0].len(), MAX_COLUMNS - 1);
        Ok(())
    }

    #[test]
    fn test_table_too_large() {
        let input = "r\n".repeat(MAX_ROWS);
        assert_eq!(parse_err(input.as_bytes()), ErrorKind::TableTooLarge);
    }

    #[test]
    fn test_table_size_boundary() -> Result<()> {
        let input = "r\n".repeat(MAX_ROWS - 1);
        assert_eq!(parse(&input)?.len(), MAX_ROWS - 1);
        Ok(())
    }

    #[test]
    fn test_row_count_progress() -> Result<()> {
        let mut parser = CsvParser::new();
        parser.feed(b"a\nb\nc")?;
        assert_eq!(parser.row_count(), 2);
        Ok(())
    }
}
