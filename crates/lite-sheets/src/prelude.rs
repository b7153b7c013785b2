//! Prelude module - common imports for lite-sheets users
//!
//! ```rust
//! use lite_sheets::prelude::*;
//! ```

pub use crate::{
    hyperlink,
    row,
    CellAddress,
    CellRange,
    // Cell types
    CellValue,
    // Error types
    Error,
    Hyperlink,
    Number,
    Result,

    // Builders
    StreamingWorkbook,
    StreamingWorksheetWriter,
    WorkbookBuilder,
    WorkbookSettings,
    WorksheetBuilder,

    XlsxError,
    XlsxResult,
};
