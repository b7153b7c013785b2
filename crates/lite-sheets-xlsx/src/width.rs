//! Column width hints

use std::collections::BTreeMap;
use std::io::Write;

use crate::error::XlsxResult;
use crate::xml::XmlSink;

/// Padding added to the longest rendered text of a column
const WIDTH_PADDING: usize = 2;

/// One `<col>` descriptor
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColumnWidth {
    pub min: u32,
    pub max: u32,
    pub width: f64,
}

/// Longest rendered text per column
///
/// Only columns that saw a non-empty value get a descriptor. The hints never
/// change stored values.
#[derive(Debug, Default, Clone)]
pub struct ColumnWidths {
    max_lengths: BTreeMap<u32, usize>,
}

impl ColumnWidths {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the rendered text of a cell in 1-based column `col`
    pub fn track(&mut self, col: u32, rendered: &str) {
        if rendered.is_empty() {
            return;
        }
        let len = rendered.chars().count();
        let entry = self.max_lengths.entry(col).or_insert(0);
        *entry = (*entry).max(len);
    }

    pub fn is_empty(&self) -> bool {
        self.max_lengths.is_empty()
    }

    /// Descriptors in column order
    pub fn descriptors(&self) -> Vec<ColumnWidth> {
        self.max_lengths
            .iter()
            .map(|(&col, &len)| ColumnWidth {
                min: col,
                max: col,
                width: (len + WIDTH_PADDING) as f64,
            })
            .collect()
    }

    /// Write the `<cols>` block; nothing when no column was tracked
    pub fn write_xml<W: Write>(&self, xml: &mut XmlSink<W>) -> XlsxResult<()> {
        if self.is_empty() {
            return Ok(());
        }

        xml.start("cols", &[])?;
        for desc in self.descriptors() {
            let (min, max, width) = (desc.min.to_string(), desc.max.to_string(), desc.width.to_string());
            xml.empty(
                "col",
                &[
                    ("min", min.as_str()),
                    ("max", max.as_str()),
                    ("width", width.as_str()),
                    ("customWidth", "1"),
                ],
            )?;
        }
        xml.end("cols")
    }
}
