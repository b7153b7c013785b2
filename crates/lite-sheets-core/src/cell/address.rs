//! Cell address and range types

use crate::error::{Error, Result};
use crate::{MAX_COLS, MAX_ROWS};
use std::fmt;

/// Convert a 1-based column index to letters (1 = A, 26 = Z, 27 = AA, etc.)
///
/// The labels are bijective base-26, exactly as spreadsheet applications print
/// them in ranges and table references.
///
/// # Examples
/// ```
/// use lite_sheets_core::column_name;
///
/// assert_eq!(column_name(1).unwrap(), "A");
/// assert_eq!(column_name(703).unwrap(), "AAA");
/// assert!(column_name(0).is_err());
/// ```
pub fn column_name(index: u32) -> Result<String> {
    if index == 0 {
        return Err(Error::InvalidColumnIndex(index));
    }

    let mut letters = Vec::with_capacity(3);
    let mut n = index;
    while n > 0 {
        n -= 1;
        letters.push(b'A' + (n % 26) as u8);
        n /= 26;
    }
    letters.reverse();

    Ok(letters.into_iter().map(char::from).collect())
}

/// Convert column letters back to a 1-based index (A = 1, Z = 26, AA = 27, etc.)
///
/// Letters are case-insensitive.
pub fn column_index(letters: &str) -> Result<u32> {
    if letters.is_empty() {
        return Err(Error::InvalidColumnIndex(0));
    }

    let mut col: u64 = 0;
    for c in letters.chars() {
        if !c.is_ascii_alphabetic() {
            return Err(Error::InvalidColumnIndex(0));
        }
        col = col * 26 + (c.to_ascii_uppercase() as u64 - 'A' as u64 + 1);
        if col > u32::MAX as u64 {
            return Err(Error::InvalidColumnIndex(0));
        }
    }

    Ok(col as u32)
}

/// A cell address (e.g., "A1")
///
/// Both indices are 1-based, matching how they appear in the written package.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellAddress {
    /// Row index (1-based)
    pub row: u32,
    /// Column index (1-based, A=1)
    pub col: u32,
}

impl CellAddress {
    /// Create a new cell address, checking it lies inside the grid
    pub fn new(row: u32, col: u32) -> Result<Self> {
        if col == 0 {
            return Err(Error::InvalidColumnIndex(col));
        }
        if row == 0 || row > MAX_ROWS {
            return Err(Error::RowOutOfBounds(row, MAX_ROWS));
        }
        if col > MAX_COLS {
            return Err(Error::ColumnOutOfBounds(col as usize, MAX_COLS));
        }
        Ok(Self { row, col })
    }

    /// Format as A1-style string
    pub fn to_a1_string(&self) -> String {
        let mut result = column_name(self.col).unwrap_or_default();
        result.push_str(&self.row.to_string());
        result
    }
}

impl fmt::Display for CellAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_a1_string())
    }
}

/// A rectangular range of cells (e.g., "A1:B10")
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CellRange {
    /// Top-left cell
    pub start: CellAddress,
    /// Bottom-right cell
    pub end: CellAddress,
}

impl CellRange {
    /// Create a range from two corners
    pub fn new(start: CellAddress, end: CellAddress) -> Self {
        Self { start, end }
    }

    /// Create a range from 1-based indices
    pub fn from_indices(start_row: u32, start_col: u32, end_row: u32, end_col: u32) -> Result<Self> {
        Ok(Self {
            start: CellAddress::new(start_row, start_col)?,
            end: CellAddress::new(end_row, end_col)?,
        })
    }

    /// Get the number of rows in the range
    pub fn row_count(&self) -> u32 {
        self.end.row - self.start.row + 1
    }

    /// Get the number of columns in the range
    pub fn col_count(&self) -> u32 {
        self.end.col - self.start.col + 1
    }

    /// Format as A1:B10 string
    pub fn to_a1_string(&self) -> String {
        format!("{}:{}", self.start, self.end)
    }
}

impl fmt::Display for CellRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_a1_string())
    }
}
