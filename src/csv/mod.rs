//! CSV tokenizing and capacity limits

mod limits;
mod parser;

pub use limits::{MAX_CELL_SIZE, MAX_COLUMNS, MAX_ROWS};
pub use parser::CsvParser;
