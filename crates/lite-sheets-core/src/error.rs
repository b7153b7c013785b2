//! Error types for lite-sheets-core

use thiserror::Error;

/// Result type alias using [`Error`]
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while describing worksheet content
///
/// Every variant is fatal to the build it was raised in.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// Invalid sheet name
    #[error("Invalid sheet name: {0}")]
    InvalidSheetName(String),

    /// Duplicate sheet name
    #[error("Sheet name already exists: {0}")]
    DuplicateSheetName(String),

    /// A row was given without any values
    #[error("Row must contain at least one value")]
    EmptyRow,

    /// Column indices are 1-based
    #[error("Invalid column index {0} (columns start at 1)")]
    InvalidColumnIndex(u32),

    /// Row index out of bounds
    #[error("Row index {0} out of bounds (max: {1})")]
    RowOutOfBounds(u32, u32),

    /// Column count out of bounds
    #[error("Column count {0} out of bounds (max: {1})")]
    ColumnOutOfBounds(usize, u32),

    /// A data row does not match the column count fixed by the header
    #[error("Row has {actual} cells but header has {expected}")]
    RowWidthMismatch { expected: usize, actual: usize },

    /// Header row contains an empty or whitespace-only name
    #[error("Header row cannot contain empty column names (column {column})")]
    BlankHeader { column: u32 },

    /// Worksheet finalized before any non-blank row fixed the header
    #[error("Worksheet must have a header row")]
    MissingHeader,

    /// Worksheet finalized without rows
    #[error("Worksheet must have at least one row")]
    EmptyWorksheet,

    /// Table requested on a worksheet without a non-blank row
    #[error("Cannot create table: worksheet has no non-empty rows")]
    TableWithoutHeader,

    /// Table header cells do not match the declared column count
    #[error("Header cell count ({header}) does not match column count ({declared})")]
    TableColumnMismatch { header: usize, declared: usize },

    /// Hyperlink target is not an absolute URI
    #[error("Invalid hyperlink target: {0}")]
    InvalidHyperlink(String),
}
