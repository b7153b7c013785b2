//! Cell encoding
//!
//! Maps one [`CellValue`] to the `<c>` element that stores it.

use std::borrow::Cow;
use std::io::Write;

use lite_sheets_core::{column_name, serial_date, CellAddress, CellValue, Number};

use crate::error::XlsxResult;
use crate::hyperlink::PendingHyperlink;
use crate::xml::XmlSink;

/// How a cell's payload is stored
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellKind {
    /// `t="inlineStr"` with the text in `<is><t>`
    InlineString,
    /// `t="b"` with `1` or `0`
    Boolean,
    /// `t="n"` with invariant decimal text
    Number,
    /// Serial date number with the date style and no type tag
    Date,
}

/// A cell ready to be written
#[derive(Debug, Clone, PartialEq)]
pub struct EncodedCell {
    /// A1-style address
    pub reference: String,
    pub kind: CellKind,
    /// Stored text (inline string, `1`/`0`, decimal or serial)
    pub value: String,
    /// Cell format index, if any
    pub style: Option<u32>,
}

impl EncodedCell {
    /// Write the `<c>` element
    pub fn write_xml<W: Write>(&self, xml: &mut XmlSink<W>) -> XlsxResult<()> {
        let style = self.style.map(|s| s.to_string());
        let mut attrs = vec![("r", self.reference.as_str())];
        match self.kind {
            CellKind::InlineString => attrs.push(("t", "inlineStr")),
            CellKind::Boolean => attrs.push(("t", "b")),
            CellKind::Number => attrs.push(("t", "n")),
            CellKind::Date => {}
        }
        if let Some(style) = style.as_deref() {
            attrs.push(("s", style));
        }

        xml.start("c", &attrs)?;
        match self.kind {
            CellKind::InlineString => {
                xml.start("is", &[])?;
                if needs_space_preserve(&self.value) {
                    xml.text_element("t", &[("xml:space", "preserve")], &self.value)?;
                } else {
                    xml.text_element("t", &[], &self.value)?;
                }
                xml.end("is")?;
            }
            _ => xml.text_element("v", &[], &self.value)?,
        }
        xml.end("c")
    }
}

fn needs_space_preserve(text: &str) -> bool {
    text.starts_with(char::is_whitespace) || text.ends_with(char::is_whitespace)
}

/// Escape text for SpreadsheetML string content.
///
/// Characters XML 1.0 cannot carry become `_xHHHH_`. An underscore that
/// would otherwise start such a sequence is itself escaped as `_x005F_`, so
/// readers decode the text back unchanged.
pub fn escape_xstring(text: &str) -> Cow<'_, str> {
    if !text.chars().any(is_xml_illegal) && !text.contains("_x") {
        return Cow::Borrowed(text);
    }

    let mut escaped = String::with_capacity(text.len() + 8);
    for (i, c) in text.char_indices() {
        if is_xml_illegal(c) {
            escaped.push_str(&format!("_x{:04X}_", c as u32));
        } else if c == '_' && starts_escape_sequence(&text[i..]) {
            escaped.push_str("_x005F_");
        } else {
            escaped.push(c);
        }
    }
    Cow::Owned(escaped)
}

fn is_xml_illegal(c: char) -> bool {
    matches!(
        c,
        '\u{0}'..='\u{8}' | '\u{B}' | '\u{C}' | '\u{E}'..='\u{1F}' | '\u{FFFE}' | '\u{FFFF}'
    )
}

// `_xHHHH_` at the start of `rest`
fn starts_escape_sequence(rest: &str) -> bool {
    let bytes = rest.as_bytes();
    bytes.len() >= 7
        && bytes[1] == b'x'
        && bytes[2..6].iter().all(u8::is_ascii_hexdigit)
        && bytes[6] == b'_'
}

/// A1-style reference for a 1-based column and row
pub fn cell_reference(col: u32, row: u32) -> String {
    let mut reference = column_name(col).unwrap_or_default();
    reference.push_str(&row.to_string());
    reference
}

/// Encodes values against a fixed date style
#[derive(Debug, Clone, Copy)]
pub struct CellEncoder {
    date_style: u32,
}

impl CellEncoder {
    /// Encoder whose instants reference `date_style`
    pub fn new(date_style: u32) -> Self {
        Self { date_style }
    }

    /// Encode a value at `address`.
    ///
    /// Hyperlinks are stored as their display text; the target comes back as
    /// a pending entry for the caller to record.
    pub fn encode(
        &self,
        value: &CellValue,
        address: CellAddress,
    ) -> (EncodedCell, Option<PendingHyperlink>) {
        let reference = address.to_a1_string();
        let mut pending = None;

        let (kind, text, style) = match value {
            CellValue::Empty => (CellKind::InlineString, String::new(), None),
            CellValue::Text(s) => (CellKind::InlineString, escape_xstring(s).into_owned(), None),
            CellValue::Boolean(b) => {
                (CellKind::Boolean, String::from(if *b { "1" } else { "0" }), None)
            }
            CellValue::Number(n) if n.is_finite() => (CellKind::Number, n.to_string(), None),
            CellValue::Number(n) => {
                log::warn!("non-finite number {} at {} written as text", n, reference);
                (CellKind::InlineString, n.to_string(), None)
            }
            CellValue::Instant(dt) => (
                CellKind::Date,
                Number::Float(serial_date::to_serial(*dt)).to_string(),
                Some(self.date_style),
            ),
            CellValue::Hyperlink(link) => {
                let display = escape_xstring(&link.display).into_owned();
                pending = Some(PendingHyperlink {
                    row: address.row,
                    col: address.col,
                    reference: reference.clone(),
                    url: link.url.clone(),
                    display: display.clone(),
                });
                (CellKind::InlineString, display, None)
            }
        };

        let cell = EncodedCell {
            reference,
            kind,
            value: text,
            style,
        };
        (cell, pending)
    }
}
