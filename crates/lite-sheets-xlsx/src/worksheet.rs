//! Buffered worksheet model
//!
//! Rows are kept in memory until the workbook is built, which makes
//! autofilters, column auto-fit and structured tables possible. The first row
//! that is not entirely empty is the header and fixes the column count for
//! every data row after it.

use std::io::Write;

use lite_sheets_core::{CellAddress, CellValue, Error, Hyperlink, Result, MAX_COLS, MAX_ROWS};

use crate::encoder::{cell_reference, CellEncoder};
use crate::error::XlsxResult;
use crate::hyperlink::HyperlinkLedger;
use crate::package::{worksheet_part, PackageSink, TargetMode, CT_WORKSHEET, REL_TABLE};
use crate::settings::WorkbookSettings;
use crate::table::{column_names, TableCatalog, TableDefinitionBuilder};
use crate::width::ColumnWidths;
use crate::xml::{XmlSink, NS_MAIN, NS_RELATIONSHIPS};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum HeaderState {
    Pending,
    Fixed { column_count: usize, row: u32 },
}

#[derive(Debug, Clone)]
struct TableRequest {
    name: String,
    style: Option<String>,
}

/// Accumulates the rows of one worksheet
///
/// Handed to the configuration closure of
/// [`WorkbookBuilder::add_sheet`](crate::WorkbookBuilder::add_sheet).
#[derive(Debug)]
pub struct WorksheetBuilder {
    name: String,
    // An empty row is a blank row
    rows: Vec<Vec<CellValue>>,
    header: HeaderState,
    auto_filter: bool,
    auto_fit: bool,
    table: Option<TableRequest>,
}

impl WorksheetBuilder {
    pub(crate) fn new(name: String) -> Self {
        Self {
            name,
            rows: Vec::new(),
            header: HeaderState::Pending,
            auto_filter: false,
            auto_fit: false,
            table: None,
        }
    }

    /// Sheet name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Rows added so far, blank rows included
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Column count fixed by the header, if any
    pub fn column_count(&self) -> Option<usize> {
        match self.header {
            HeaderState::Fixed { column_count, .. } => Some(column_count),
            HeaderState::Pending => None,
        }
    }

    /// 1-based index of the header row, if any
    pub fn header_row(&self) -> Option<u32> {
        match self.header {
            HeaderState::Fixed { row, .. } => Some(row),
            HeaderState::Pending => None,
        }
    }

    /// Append a row.
    ///
    /// The first row with a non-empty value becomes the header: its values are
    /// stored as trimmed text, with case-insensitive duplicates suffixed `_1`,
    /// `_2`, ... Header hyperlinks keep their target. A row of only empty values before that is kept as a blank
    /// row. Every later row must have exactly as many values as the header.
    pub fn add_row<I, V>(&mut self, values: I) -> Result<&mut Self>
    where
        I: IntoIterator<Item = V>,
        V: Into<CellValue>,
    {
        let values: Vec<CellValue> = values.into_iter().map(Into::into).collect();
        if values.is_empty() {
            return Err(Error::EmptyRow);
        }
        if values.len() > MAX_COLS as usize {
            return Err(Error::ColumnOutOfBounds(values.len(), MAX_COLS));
        }
        self.check_room(1)?;
        for link in values.iter().filter_map(CellValue::as_hyperlink) {
            link.validate()?;
        }

        match self.header {
            HeaderState::Pending if values.iter().all(CellValue::is_empty) => {
                self.rows.push(Vec::new());
            }
            HeaderState::Pending => {
                let names = column_names(&values)?;
                let header = values
                    .iter()
                    .zip(names)
                    .map(|(value, name)| match value {
                        CellValue::Hyperlink(link) => CellValue::Hyperlink(Hyperlink {
                            url: link.url.clone(),
                            display: name,
                        }),
                        _ => CellValue::Text(name),
                    })
                    .collect();
                self.rows.push(header);
                self.header = HeaderState::Fixed {
                    column_count: values.len(),
                    row: self.rows.len() as u32,
                };
            }
            HeaderState::Fixed { column_count, .. } => {
                if values.len() != column_count {
                    return Err(Error::RowWidthMismatch {
                        expected: column_count,
                        actual: values.len(),
                    });
                }
                self.rows.push(values);
            }
        }

        Ok(self)
    }

    /// Append `count` blank rows; valid before or after the header
    pub fn add_empty_rows(&mut self, count: u32) -> Result<&mut Self> {
        self.check_room(count)?;
        self.rows
            .extend(std::iter::repeat_with(Vec::new).take(count as usize));
        Ok(self)
    }

    /// Add an autofilter over the header through the last row.
    ///
    /// Ignored when the sheet also has a table, which filters on its own.
    pub fn apply_auto_filter(&mut self) -> &mut Self {
        self.auto_filter = true;
        self
    }

    /// Emit column width hints sized to the longest rendered value
    pub fn auto_fit_columns(&mut self) -> &mut Self {
        self.auto_fit = true;
        self
    }

    /// Turn the header and data rows into a table with the default style
    pub fn add_table<N: Into<String>>(&mut self, name: N) -> &mut Self {
        self.table = Some(TableRequest {
            name: name.into(),
            style: None,
        });
        self
    }

    /// Turn the header and data rows into a table with the given style
    pub fn add_table_with_style<N: Into<String>, S: Into<String>>(
        &mut self,
        name: N,
        style: S,
    ) -> &mut Self {
        self.table = Some(TableRequest {
            name: name.into(),
            style: Some(style.into()),
        });
        self
    }

    fn check_room(&self, additional: u32) -> Result<()> {
        let total = self.rows.len() as u64 + additional as u64;
        if total > MAX_ROWS as u64 {
            return Err(Error::RowOutOfBounds(
                total.min(u32::MAX as u64) as u32,
                MAX_ROWS,
            ));
        }
        Ok(())
    }

    /// Write the worksheet part (and its table part) as sheet `number`.
    ///
    /// Returns the worksheet part path.
    pub(crate) fn finalize<S: PackageSink>(
        self,
        sink: &mut S,
        number: usize,
        date_style: u32,
        settings: &WorkbookSettings,
        tables: &mut TableCatalog,
    ) -> XlsxResult<String> {
        if self.rows.is_empty() {
            return Err(Error::EmptyWorksheet.into());
        }
        let (column_count, header_row) = match self.header {
            HeaderState::Fixed { column_count, row } => (column_count, row),
            HeaderState::Pending => return Err(Error::MissingHeader.into()),
        };
        let last_row = self.rows.len() as u32;

        // Table preconditions are checked before anything is emitted
        let table = match &self.table {
            Some(request) => {
                let style = request
                    .style
                    .clone()
                    .unwrap_or_else(|| settings.default_table_style.clone());
                let header = self
                    .rows
                    .get(header_row as usize - 1)
                    .map(|cells| (header_row, cells.as_slice()));
                let definition = TableDefinitionBuilder::new(request.name.as_str(), style)
                    .with_row_stripes(settings.table_row_stripes)
                    .build(header, column_count, last_row, tables)?;
                Some(definition)
            }
            None => None,
        };

        let mut widths = ColumnWidths::new();
        if self.auto_fit {
            for row in &self.rows {
                for (i, value) in row.iter().enumerate() {
                    widths.track(i as u32 + 1, &value.display_text());
                }
            }
        }

        let part = worksheet_part(number);
        sink.start_part(&part, CT_WORKSHEET)?;
        let mut xml = XmlSink::new(&mut *sink);
        open_worksheet(&mut xml)?;
        widths.write_xml(&mut xml)?;

        let encoder = CellEncoder::new(date_style);
        let mut hyperlinks = HyperlinkLedger::new();
        xml.start("sheetData", &[])?;
        for (i, row) in self.rows.iter().enumerate() {
            let index = i as u32 + 1;
            if row.iter().all(CellValue::is_empty) {
                let index = index.to_string();
                xml.empty("row", &[("r", index.as_str())])?;
            } else {
                write_cells(&mut xml, &encoder, index, row, &mut hyperlinks)?;
            }
        }
        xml.end("sheetData")?;

        if self.auto_filter && table.is_none() {
            let reference = format!(
                "A{}:{}",
                header_row,
                cell_reference(column_count as u32, last_row)
            );
            xml.empty("autoFilter", &[("ref", reference.as_str())])?;
        }

        let hyperlink_count = hyperlinks.flush(&mut xml, &part)?;

        if let Some(table) = &table {
            let target = table.worksheet_target();
            let rel_id = xml
                .get_mut()
                .add_relationship(&part, REL_TABLE, &target, TargetMode::Internal);
            xml.start("tableParts", &[("count", "1")])?;
            xml.empty("tablePart", &[("r:id", rel_id.as_str())])?;
            xml.end("tableParts")?;
        }
        xml.end("worksheet")?;
        drop(xml);

        if let Some(table) = &table {
            table.write_part(sink)?;
        }

        log::debug!(
            "finalized sheet '{}': {} rows, {} hyperlinks, table: {}",
            self.name,
            last_row,
            hyperlink_count,
            table.as_ref().map_or("none", |t| t.name.as_str())
        );
        Ok(part)
    }
}

/// Write the `<worksheet>` start tag with both namespaces
pub(crate) fn open_worksheet<W: Write>(xml: &mut XmlSink<W>) -> XlsxResult<()> {
    xml.declaration()?;
    xml.start(
        "worksheet",
        &[("xmlns", NS_MAIN), ("xmlns:r", NS_RELATIONSHIPS)],
    )
}

/// Write one `<row>` with a cell per value, recording hyperlinks
pub(crate) fn write_cells<W: Write>(
    xml: &mut XmlSink<W>,
    encoder: &CellEncoder,
    row: u32,
    values: &[CellValue],
    hyperlinks: &mut HyperlinkLedger,
) -> XlsxResult<()> {
    let index = row.to_string();
    xml.start("row", &[("r", index.as_str())])?;
    for (i, value) in values.iter().enumerate() {
        let address = CellAddress::new(row, i as u32 + 1)?;
        let (cell, pending) = encoder.encode(value, address);
        cell.write_xml(xml)?;
        if let Some(pending) = pending {
            hyperlinks.push(pending);
        }
    }
    xml.end("row")
}
