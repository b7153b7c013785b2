//! # lite-sheets-core
//!
//! Core value model for the lite-sheets spreadsheet writer.
//!
//! This crate provides the types shared by the buffered and streaming writers:
//! - [`CellValue`] - The closed set of values a cell can hold
//! - [`Hyperlink`] - An external link shown through its display text
//! - [`CellAddress`] and [`CellRange`] - 1-based A1-style addressing
//! - [`column_name`] - Bijective base-26 column labels
//! - [`serial_date`] - Instants as serial date numbers
//!
//! ## Example
//!
//! ```rust
//! use lite_sheets_core::{row, CellAddress, CellValue};
//!
//! let values = row!["Id", 42, true];
//! assert_eq!(values[0], CellValue::text("Id"));
//!
//! let addr = CellAddress::new(3, 28).unwrap();
//! assert_eq!(addr.to_string(), "AB3");
//! ```

pub mod cell;
pub mod error;
pub mod sheet_name;

pub use cell::{
    column_index, column_name, serial_date, CellAddress, CellRange, CellValue, Hyperlink, Number,
};
pub use error::{Error, Result};
pub use sheet_name::validate_sheet_name;

/// Maximum number of rows in a worksheet (Excel limit)
pub const MAX_ROWS: u32 = 1_048_576;

/// Maximum number of columns in a worksheet (Excel limit)
pub const MAX_COLS: u32 = 16_384;

/// Maximum length of a sheet name
pub const MAX_SHEET_NAME_LEN: usize = 31;

/// Build a `Vec<CellValue>` from heterogeneous values.
///
/// ```rust
/// use lite_sheets_core::{row, CellValue};
///
/// let values = row![1, "Alex", None::<&str>];
/// assert_eq!(values.len(), 3);
/// assert!(values[2].is_empty());
/// ```
#[macro_export]
macro_rules! row {
    () => {
        ::std::vec::Vec::<$crate::CellValue>::new()
    };
    ($($value:expr),+ $(,)?) => {
        ::std::vec![$($crate::CellValue::from($value)),+]
    };
}
