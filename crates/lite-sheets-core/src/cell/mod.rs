//! Cell-related types and utilities
//!
//! This module contains:
//! - [`CellValue`] - The value stored in a cell
//! - [`CellAddress`] - A cell's location (e.g., "A1")
//! - [`CellRange`] - A range of cells (e.g., "A1:B10")
//! - [`serial_date`] - Serial date number conversion

mod address;
pub mod serial_date;
mod value;

pub use address::{column_index, column_name, CellAddress, CellRange};
pub use value::{CellValue, Hyperlink, Number};
