//! Shared style catalog
//!
//! Every workbook carries exactly one `xl/styles.xml`. The catalog is fixed:
//! cell format 0 is the default and cell format 1 applies the date number
//! format, so cells only ever reference one of those two indices.

use std::io::Write;

use crate::error::XlsxResult;
use crate::package::{PackageSink, TargetMode, CT_STYLES, REL_STYLES, STYLES_PART, WORKBOOK_PART};
use crate::settings::WorkbookSettings;
use crate::xml::{XmlSink, NS_MAIN};

/// Cell format index of the default style
pub const DEFAULT_STYLE_INDEX: u32 = 0;

/// Cell format index of the date style
pub const DATE_STYLE_INDEX: u32 = 1;

/// First id available for custom number formats
const FIRST_CUSTOM_NUM_FMT: u32 = 164;

#[derive(Debug, Clone, PartialEq)]
struct CellFormat {
    num_fmt_id: u32,
    apply_number_format: bool,
}

/// The workbook's style catalog and whether it has been written yet
#[derive(Debug)]
pub struct StyleRegistry {
    number_formats: Vec<(u32, String)>,
    cell_formats: Vec<CellFormat>,
    written: bool,
}

impl StyleRegistry {
    /// Catalog with the date format taken from the settings
    pub fn new(settings: &WorkbookSettings) -> Self {
        Self {
            number_formats: vec![(FIRST_CUSTOM_NUM_FMT, settings.date_number_format.clone())],
            cell_formats: vec![
                CellFormat {
                    num_fmt_id: 0,
                    apply_number_format: false,
                },
                CellFormat {
                    num_fmt_id: FIRST_CUSTOM_NUM_FMT,
                    apply_number_format: true,
                },
            ],
            written: false,
        }
    }

    /// Whether the style part has been emitted
    pub fn is_written(&self) -> bool {
        self.written
    }

    /// Write the style part once and return the date style index.
    ///
    /// Later calls write nothing and return the same index, so a workbook
    /// never ends up with two style tables.
    pub fn ensure<S: PackageSink>(&mut self, sink: &mut S) -> XlsxResult<u32> {
        if !self.written {
            sink.start_part(STYLES_PART, CT_STYLES)?;
            self.write_xml(&mut *sink)?;
            sink.add_relationship(WORKBOOK_PART, REL_STYLES, "styles.xml", TargetMode::Internal);
            self.written = true;
            log::trace!("style catalog written");
        }
        Ok(DATE_STYLE_INDEX)
    }

    fn write_xml<W: Write>(&self, out: W) -> XlsxResult<()> {
        let mut xml = XmlSink::new(out);
        xml.declaration()?;
        xml.start("styleSheet", &[("xmlns", NS_MAIN)])?;

        let count = self.number_formats.len().to_string();
        xml.start("numFmts", &[("count", count.as_str())])?;
        for (id, code) in &self.number_formats {
            let id = id.to_string();
            xml.empty("numFmt", &[("numFmtId", id.as_str()), ("formatCode", code.as_str())])?;
        }
        xml.end("numFmts")?;

        xml.start("fonts", &[("count", "1")])?;
        xml.start("font", &[])?;
        xml.empty("sz", &[("val", "11")])?;
        xml.empty("name", &[("val", "Calibri")])?;
        xml.empty("family", &[("val", "2")])?;
        xml.end("font")?;
        xml.end("fonts")?;

        // The first two fills are mandatory: none and gray125
        xml.start("fills", &[("count", "2")])?;
        for pattern in ["none", "gray125"] {
            xml.start("fill", &[])?;
            xml.empty("patternFill", &[("patternType", pattern)])?;
            xml.end("fill")?;
        }
        xml.end("fills")?;

        xml.start("borders", &[("count", "1")])?;
        xml.start("border", &[])?;
        for edge in ["left", "right", "top", "bottom", "diagonal"] {
            xml.empty(edge, &[])?;
        }
        xml.end("border")?;
        xml.end("borders")?;

        xml.start("cellStyleXfs", &[("count", "1")])?;
        xml.empty(
            "xf",
            &[("numFmtId", "0"), ("fontId", "0"), ("fillId", "0"), ("borderId", "0")],
        )?;
        xml.end("cellStyleXfs")?;

        let count = self.cell_formats.len().to_string();
        xml.start("cellXfs", &[("count", count.as_str())])?;
        for format in &self.cell_formats {
            let num_fmt_id = format.num_fmt_id.to_string();
            let mut attrs = vec![
                ("numFmtId", num_fmt_id.as_str()),
                ("fontId", "0"),
                ("fillId", "0"),
                ("borderId", "0"),
                ("xfId", "0"),
            ];
            if format.apply_number_format {
                attrs.push(("applyNumberFormat", "1"));
            }
            xml.empty("xf", &attrs)?;
        }
        xml.end("cellXfs")?;

        xml.start("cellStyles", &[("count", "1")])?;
        xml.empty("cellStyle", &[("name", "Normal"), ("xfId", "0"), ("builtinId", "0")])?;
        xml.end("cellStyles")?;

        xml.empty("dxfs", &[("count", "0")])?;
        xml.empty(
            "tableStyles",
            &[
                ("count", "0"),
                ("defaultTableStyle", "TableStyleMedium2"),
                ("defaultPivotStyle", "PivotStyleLight16"),
            ],
        )?;

        xml.end("styleSheet")?;
        Ok(())
    }
}
