//! # lite-sheets
//!
//! A small Rust library for writing Excel (XLSX) reports.
//!
//! ## Features
//!
//! - Buffered workbooks with autofilters, column auto-fit and structured tables
//! - Streaming workbooks for millions of rows in constant memory
//! - Typed cell values: text, booleans, numbers (integer, float, decimal),
//!   dates and hyperlinks
//!
//! ## Example
//!
//! ```rust
//! use lite_sheets::prelude::*;
//!
//! let bytes = WorkbookBuilder::new()
//!     .add_sheet("People", |sheet| {
//!         sheet.add_row(row!["Id", "Name", "Homepage"])?;
//!         sheet.add_row(row![1, "Alex", hyperlink("https://example.com/alex", None)])?;
//!         sheet.add_row(row![2, "Brian", hyperlink("https://example.com/brian", Some("Brian's page"))])?;
//!         sheet.auto_fit_columns().add_table("People");
//!         Ok(())
//!     })?
//!     .build()?;
//!
//! assert_eq!(&bytes[..2], b"PK");
//! # Ok::<(), XlsxError>(())
//! ```
//!
//! Large exports go through [`StreamingWorkbook`], which writes each row as it
//! arrives:
//!
//! ```rust
//! use lite_sheets::prelude::*;
//!
//! let bytes = StreamingWorkbook::build_single("Events", |sheet| {
//!     sheet.write_row(row!["Seq", "Ok"])?;
//!     for seq in 0..10_000u32 {
//!         sheet.write_row(row![seq, seq % 7 != 0])?;
//!     }
//!     Ok(())
//! })?;
//! # assert!(!bytes.is_empty());
//! # Ok::<(), XlsxError>(())
//! ```

pub mod prelude;

// Re-export core types
pub use lite_sheets_core::{
    column_index, column_name, row, serial_date, validate_sheet_name, CellAddress, CellRange,
    CellValue, Error, Hyperlink, Number, Result, MAX_COLS, MAX_ROWS, MAX_SHEET_NAME_LEN,
};

// Re-export XLSX types
pub use lite_sheets_xlsx::{
    MemoryPackage, PackageCompression, PackageParts, PackageSink, StreamingWorkbook,
    StreamingWorksheetWriter, TargetMode, WorkbookBuilder, WorkbookSettings, WorksheetBuilder,
    XlsxError, XlsxResult, ZipPackage,
};

/// Hyperlink cell value; blank `display` falls back to the URL
pub fn hyperlink<S: Into<String>>(url: S, display: Option<&str>) -> CellValue {
    CellValue::hyperlink(url, display)
}
