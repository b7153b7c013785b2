//! Streaming worksheet writer
//!
//! Rows go straight into the worksheet part as they are written. Only the
//! current row and the pending hyperlinks are held in memory, so sheets with
//! millions of rows cost the same as small ones.

use lite_sheets_core::{CellValue, Error, MAX_COLS, MAX_ROWS};

use crate::encoder::CellEncoder;
use crate::error::XlsxResult;
use crate::hyperlink::HyperlinkLedger;
use crate::package::{PackageSink, CT_WORKSHEET};
use crate::worksheet::{open_worksheet, write_cells};
use crate::xml::XmlSink;

/// Forward-only writer for one worksheet part
///
/// Handed to the closure of
/// [`StreamingWorkbook::add_sheet`](crate::StreamingWorkbook::add_sheet). The
/// first [`write_row`](Self::write_row) fixes the column count; blank rows may
/// come before it.
pub struct StreamingWorksheetWriter<'a, S: PackageSink> {
    xml: XmlSink<&'a mut S>,
    part: String,
    encoder: CellEncoder,
    next_row: u32,
    column_count: Option<usize>,
    hyperlinks: HyperlinkLedger,
}

impl<'a, S: PackageSink> StreamingWorksheetWriter<'a, S> {
    /// Open `part` and write everything up to `<sheetData>`
    pub(crate) fn open(sink: &'a mut S, part: String, date_style: u32) -> XlsxResult<Self> {
        sink.start_part(&part, CT_WORKSHEET)?;
        let mut xml = XmlSink::new(sink);
        open_worksheet(&mut xml)?;
        xml.start("sheetData", &[])?;

        Ok(Self {
            xml,
            part,
            encoder: CellEncoder::new(date_style),
            next_row: 1,
            column_count: None,
            hyperlinks: HyperlinkLedger::new(),
        })
    }

    /// Rows emitted so far, blank rows included
    pub fn rows_written(&self) -> u32 {
        self.next_row - 1
    }

    /// Column count fixed by the first row, if written yet
    pub fn column_count(&self) -> Option<usize> {
        self.column_count
    }

    /// Hyperlinks waiting for the sheet to close
    pub fn pending_hyperlinks(&self) -> usize {
        self.hyperlinks.len()
    }

    /// Emit `count` rows without cells
    pub fn write_empty_rows(&mut self, count: u32) -> XlsxResult<()> {
        self.check_room(count)?;
        for _ in 0..count {
            let index = self.next_row.to_string();
            self.xml.empty("row", &[("r", index.as_str())])?;
            self.next_row += 1;
        }
        Ok(())
    }

    /// Emit one row, one cell per value.
    ///
    /// The row is checked in full before any of it is written.
    pub fn write_row<I, V>(&mut self, values: I) -> XlsxResult<()>
    where
        I: IntoIterator<Item = V>,
        V: Into<CellValue>,
    {
        let values: Vec<CellValue> = values.into_iter().map(Into::into).collect();
        if values.is_empty() {
            return Err(Error::EmptyRow.into());
        }
        if values.len() > MAX_COLS as usize {
            return Err(Error::ColumnOutOfBounds(values.len(), MAX_COLS).into());
        }
        if let Some(expected) = self.column_count {
            if values.len() != expected {
                return Err(Error::RowWidthMismatch {
                    expected,
                    actual: values.len(),
                }
                .into());
            }
        }
        self.check_room(1)?;
        for link in values.iter().filter_map(CellValue::as_hyperlink) {
            link.validate()?;
        }

        self.column_count.get_or_insert(values.len());
        write_cells(
            &mut self.xml,
            &self.encoder,
            self.next_row,
            &values,
            &mut self.hyperlinks,
        )?;
        self.next_row += 1;
        Ok(())
    }

    fn check_room(&self, additional: u32) -> XlsxResult<()> {
        let total = self.rows_written() as u64 + additional as u64;
        if total > MAX_ROWS as u64 {
            return Err(Error::RowOutOfBounds(total.min(u32::MAX as u64) as u32, MAX_ROWS).into());
        }
        Ok(())
    }

    /// Close the row data, flush hyperlinks and end the worksheet
    pub(crate) fn close(self) -> XlsxResult<()> {
        let Self {
            mut xml,
            part,
            next_row,
            hyperlinks,
            ..
        } = self;

        xml.end("sheetData")?;
        let hyperlink_count = hyperlinks.flush(&mut xml, &part)?;
        xml.end("worksheet")?;

        log::debug!(
            "closed streaming sheet {}: {} rows, {} hyperlinks",
            part,
            next_row - 1,
            hyperlink_count
        );
        Ok(())
    }
}
