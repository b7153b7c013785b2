//! Buffered workbook assembly

use std::fs::File;
use std::io::Cursor;
use std::path::Path;

use lite_sheets_core::{validate_sheet_name, Result};

use crate::error::{XlsxError, XlsxResult};
use crate::package::{
    PackageSink, TargetMode, ZipPackage, CT_WORKBOOK, PACKAGE_ROOT, REL_OFFICE_DOCUMENT,
    REL_WORKSHEET, WORKBOOK_PART,
};
use crate::settings::WorkbookSettings;
use crate::styles::StyleRegistry;
use crate::table::TableCatalog;
use crate::worksheet::WorksheetBuilder;
use crate::xml::{XmlSink, NS_MAIN, NS_RELATIONSHIPS};

#[derive(Debug, Clone, PartialEq, Eq)]
struct SheetEntry {
    name: String,
    sheet_id: u32,
    rel_id: String,
}

/// The `<sheets>` list of the workbook part
#[derive(Debug, Default)]
pub(crate) struct WorkbookIndex {
    sheets: Vec<SheetEntry>,
}

impl WorkbookIndex {
    pub(crate) fn len(&self) -> usize {
        self.sheets.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.sheets.is_empty()
    }

    /// Check a new sheet name against the sheets already listed
    pub(crate) fn validate_name(&self, name: &str) -> Result<()> {
        validate_sheet_name(name, self.sheets.iter().map(|s| s.name.as_str()))
    }

    /// List a finished worksheet part; sheet ids count up from 1
    pub(crate) fn add<S: PackageSink>(&mut self, sink: &mut S, name: String, part: &str) -> u32 {
        let target = part.strip_prefix("xl/").unwrap_or(part);
        let rel_id = sink.add_relationship(WORKBOOK_PART, REL_WORKSHEET, target, TargetMode::Internal);
        let sheet_id = self.sheets.len() as u32 + 1;
        self.sheets.push(SheetEntry {
            name,
            sheet_id,
            rel_id,
        });
        sheet_id
    }

    /// Write `xl/workbook.xml` and point the package at it
    pub(crate) fn write_part<S: PackageSink>(&self, sink: &mut S) -> XlsxResult<()> {
        sink.start_part(WORKBOOK_PART, CT_WORKBOOK)?;
        let mut xml = XmlSink::new(&mut *sink);
        xml.declaration()?;
        xml.start(
            "workbook",
            &[("xmlns", NS_MAIN), ("xmlns:r", NS_RELATIONSHIPS)],
        )?;
        xml.start("sheets", &[])?;
        for sheet in &self.sheets {
            let sheet_id = sheet.sheet_id.to_string();
            xml.empty(
                "sheet",
                &[
                    ("name", sheet.name.as_str()),
                    ("sheetId", sheet_id.as_str()),
                    ("r:id", sheet.rel_id.as_str()),
                ],
            )?;
        }
        xml.end("sheets")?;
        xml.end("workbook")?;
        drop(xml);

        sink.add_relationship(PACKAGE_ROOT, REL_OFFICE_DOCUMENT, WORKBOOK_PART, TargetMode::Internal);
        Ok(())
    }
}

/// Builds a workbook whose sheets are fully buffered in memory
///
/// ```rust
/// use lite_sheets_core::row;
/// use lite_sheets_xlsx::WorkbookBuilder;
///
/// let bytes = WorkbookBuilder::new()
///     .add_sheet("People", |sheet| {
///         sheet.add_row(row!["Id", "Name"])?;
///         sheet.add_row(row![1, "Alex"])?;
///         sheet.apply_auto_filter();
///         Ok(())
///     })?
///     .build()?;
/// assert!(!bytes.is_empty());
/// # Ok::<(), lite_sheets_xlsx::XlsxError>(())
/// ```
#[derive(Debug, Default)]
pub struct WorkbookBuilder {
    worksheets: Vec<WorksheetBuilder>,
    settings: WorkbookSettings,
}

impl WorkbookBuilder {
    /// Create a builder with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a builder with the given settings
    pub fn with_settings(settings: WorkbookSettings) -> Self {
        Self {
            worksheets: Vec::new(),
            settings,
        }
    }

    pub fn settings(&self) -> &WorkbookSettings {
        &self.settings
    }

    /// Number of sheets added
    pub fn sheet_count(&self) -> usize {
        self.worksheets.len()
    }

    /// Add a sheet and fill it with `configure`.
    ///
    /// The name is checked before `configure` runs.
    pub fn add_sheet<N, F>(mut self, name: N, configure: F) -> XlsxResult<Self>
    where
        N: Into<String>,
        F: FnOnce(&mut WorksheetBuilder) -> XlsxResult<()>,
    {
        let name = name.into();
        validate_sheet_name(&name, self.worksheets.iter().map(WorksheetBuilder::name))?;

        let mut sheet = WorksheetBuilder::new(name);
        configure(&mut sheet)?;
        self.worksheets.push(sheet);
        Ok(self)
    }

    /// Serialize the workbook to `.xlsx` bytes
    pub fn build(self) -> XlsxResult<Vec<u8>> {
        let package = ZipPackage::new(Cursor::new(Vec::new()), &self.settings);
        let bytes = self.build_into(package)?.into_inner();
        if bytes.is_empty() {
            return Err(XlsxError::EmptyOutput);
        }
        Ok(bytes)
    }

    /// Serialize the workbook to a file
    pub fn build_file<P: AsRef<Path>>(self, path: P) -> XlsxResult<()> {
        let file = File::create(path)?;
        let package = ZipPackage::new(file, &self.settings);
        self.build_into(package)?;
        Ok(())
    }

    /// Serialize the workbook into any package sink
    pub fn build_into<S: PackageSink>(self, mut sink: S) -> XlsxResult<S::Output> {
        if self.worksheets.is_empty() {
            return Err(XlsxError::EmptyWorkbook);
        }

        let mut styles = StyleRegistry::new(&self.settings);
        let date_style = styles.ensure(&mut sink)?;

        let mut index = WorkbookIndex::default();
        let mut tables = TableCatalog::new();
        for (i, sheet) in self.worksheets.into_iter().enumerate() {
            let name = sheet.name().to_string();
            let part = sheet.finalize(&mut sink, i + 1, date_style, &self.settings, &mut tables)?;
            index.add(&mut sink, name, &part);
        }
        index.write_part(&mut sink)?;

        log::debug!(
            "built workbook: {} sheets, {} tables",
            index.len(),
            tables.len()
        );
        sink.finish()
    }
}
