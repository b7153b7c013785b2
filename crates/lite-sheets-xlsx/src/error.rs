//! XLSX error types

use thiserror::Error;

/// Result type for XLSX operations
pub type XlsxResult<T> = std::result::Result<T, XlsxError>;

/// Errors that can occur while assembling an XLSX package
///
/// Any error leaves the package being written undefined; discard the whole
/// build attempt.
#[derive(Debug, Error)]
pub enum XlsxError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// ZIP error
    #[error("ZIP error: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// XML error
    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// Core error (argument and structural consistency errors)
    #[error("{0}")]
    Core(#[from] lite_sheets_core::Error),

    /// Build requested on a workbook without worksheets
    #[error("Workbook must contain at least one sheet")]
    EmptyWorkbook,

    /// The finished package produced no bytes
    #[error("Workbook build failed: resulting output is empty")]
    EmptyOutput,

    /// A part name was written twice
    #[error("Duplicate package part: {0}")]
    DuplicatePart(String),
}

impl XlsxError {
    /// The core error behind this one, if any
    pub fn as_core(&self) -> Option<&lite_sheets_core::Error> {
        match self {
            XlsxError::Core(e) => Some(e),
            _ => None,
        }
    }
}
