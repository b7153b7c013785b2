//! # lite-sheets-xlsx
//!
//! XLSX (Office Open XML) document assembly for lite-sheets.
//!
//! Two capacity regimes are supported:
//! - [`WorkbookBuilder`] buffers every row of every sheet and serializes on
//!   [`WorkbookBuilder::build`]. It supports autofilters, column auto-fit and
//!   structured tables.
//! - [`StreamingWorkbook`] writes each row into the package as it arrives and
//!   keeps only the current row and the pending hyperlinks in memory.
//!
//! Both write through a [`PackageSink`]; [`ZipPackage`] produces the final
//! archive and [`MemoryPackage`] keeps the parts for inspection.

pub mod encoder;
pub mod error;
pub mod hyperlink;
pub mod package;
pub mod settings;
pub mod streaming;
pub mod streaming_workbook;
pub mod styles;
pub mod table;
pub mod width;
pub mod workbook;
pub mod worksheet;
pub mod xml;

pub use encoder::{CellEncoder, CellKind, EncodedCell};
pub use error::{XlsxError, XlsxResult};
pub use hyperlink::{HyperlinkLedger, PendingHyperlink};
pub use package::{MemoryPackage, PackageParts, PackageSink, Relationship, TargetMode, ZipPackage};
pub use settings::{PackageCompression, WorkbookSettings};
pub use streaming::StreamingWorksheetWriter;
pub use streaming_workbook::StreamingWorkbook;
pub use styles::{StyleRegistry, DATE_STYLE_INDEX, DEFAULT_STYLE_INDEX};
pub use table::{sanitize_table_name, TableCatalog, TableDefinition, TableDefinitionBuilder};
pub use width::{ColumnWidth, ColumnWidths};
pub use workbook::WorkbookBuilder;
pub use worksheet::WorksheetBuilder;
pub use xml::XmlSink;
