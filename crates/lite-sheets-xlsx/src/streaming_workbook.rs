//! Streaming workbook assembly
//!
//! The workbook owns the package for the whole session. Each sheet is written
//! start to finish inside its closure before the next one begins.

use std::io::Cursor;

use crate::error::{XlsxError, XlsxResult};
use crate::package::{worksheet_part, PackageSink, ZipPackage};
use crate::settings::WorkbookSettings;
use crate::streaming::StreamingWorksheetWriter;
use crate::styles::StyleRegistry;
use crate::workbook::WorkbookIndex;

/// In-memory zip package used by the byte-producing helpers
type BytesPackage = ZipPackage<Cursor<Vec<u8>>>;

/// A workbook whose sheets are streamed row by row into a package sink
///
/// ```rust
/// use lite_sheets_core::row;
/// use lite_sheets_xlsx::StreamingWorkbook;
///
/// let bytes = StreamingWorkbook::build(|workbook| {
///     workbook.add_sheet("Log", |sheet| {
///         sheet.write_row(row!["Seq", "Message"])?;
///         for i in 0..1000 {
///             sheet.write_row(row![i, format!("event {}", i)])?;
///         }
///         Ok(())
///     })?;
///     Ok(())
/// })?;
/// assert!(!bytes.is_empty());
/// # Ok::<(), lite_sheets_xlsx::XlsxError>(())
/// ```
pub struct StreamingWorkbook<S: PackageSink> {
    sink: S,
    date_style: u32,
    index: WorkbookIndex,
}

impl<S: PackageSink> StreamingWorkbook<S> {
    /// Start a session over `sink` with default settings
    pub fn new(sink: S) -> XlsxResult<Self> {
        Self::with_settings(sink, &WorkbookSettings::default())
    }

    /// Start a session over `sink`; the style part is written right away
    pub fn with_settings(mut sink: S, settings: &WorkbookSettings) -> XlsxResult<Self> {
        let date_style = StyleRegistry::new(settings).ensure(&mut sink)?;
        Ok(Self {
            sink,
            date_style,
            index: WorkbookIndex::default(),
        })
    }

    /// Number of sheets written
    pub fn sheet_count(&self) -> usize {
        self.index.len()
    }

    /// Write a sheet: `write` runs to completion, then the sheet is closed and
    /// listed with the next sheet id.
    pub fn add_sheet<N, F>(&mut self, name: N, write: F) -> XlsxResult<&mut Self>
    where
        N: Into<String>,
        F: FnOnce(&mut StreamingWorksheetWriter<'_, S>) -> XlsxResult<()>,
    {
        let name = name.into();
        self.index.validate_name(&name)?;

        let part = worksheet_part(self.index.len() + 1);
        let mut writer = StreamingWorksheetWriter::open(&mut self.sink, part.clone(), self.date_style)?;
        write(&mut writer)?;
        writer.close()?;

        self.index.add(&mut self.sink, name, &part);
        Ok(self)
    }

    /// Write the workbook part and close the package
    pub fn finish(mut self) -> XlsxResult<S::Output> {
        if self.index.is_empty() {
            return Err(XlsxError::EmptyWorkbook);
        }
        self.index.write_part(&mut self.sink)?;
        log::debug!("finished streaming workbook: {} sheets", self.index.len());
        self.sink.finish()
    }
}

impl StreamingWorkbook<BytesPackage> {
    /// Run a multi-sheet session in memory and return the `.xlsx` bytes
    pub fn build<F>(configure: F) -> XlsxResult<Vec<u8>>
    where
        F: FnOnce(&mut Self) -> XlsxResult<()>,
    {
        Self::build_with_settings(&WorkbookSettings::default(), configure)
    }

    /// [`build`](Self::build) with explicit settings
    pub fn build_with_settings<F>(settings: &WorkbookSettings, configure: F) -> XlsxResult<Vec<u8>>
    where
        F: FnOnce(&mut Self) -> XlsxResult<()>,
    {
        let package = ZipPackage::new(Cursor::new(Vec::new()), settings);
        let mut workbook = Self::with_settings(package, settings)?;
        configure(&mut workbook)?;

        let bytes = workbook.finish()?.into_inner();
        if bytes.is_empty() {
            return Err(XlsxError::EmptyOutput);
        }
        Ok(bytes)
    }

    /// Stream a single sheet and return the `.xlsx` bytes
    pub fn build_single<N, F>(name: N, write: F) -> XlsxResult<Vec<u8>>
    where
        N: Into<String>,
        F: FnOnce(&mut StreamingWorksheetWriter<'_, BytesPackage>) -> XlsxResult<()>,
    {
        Self::build(|workbook| {
            workbook.add_sheet(name, write)?;
            Ok(())
        })
    }
}
