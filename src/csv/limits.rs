//! Fixed capacity limits enforced while parsing
//!
//! Limits are exclusive: a parse is abandoned as soon as the cell, row or
//! table being accumulated has grown to one less than its limit and another
//! byte arrives. The largest accepted cell therefore holds
//! `MAX_CELL_SIZE - 2` bytes, the widest row `MAX_COLUMNS - 1` cells and
//! the largest table `MAX_ROWS - 1` rows.

/// Size of the cell buffer, in bytes
pub const MAX_CELL_SIZE: usize = 1024;

/// Maximum number of cells per row
pub const MAX_COLUMNS: usize = 128;

/// Maximum number of rows per table
pub const MAX_ROWS: usize = 1024;
