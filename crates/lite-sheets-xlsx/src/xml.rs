//! Structural-element serializer
//!
//! A thin layer over [`quick_xml::Writer`] that writes opened, closed and
//! empty elements in order. Attribute values and text are escaped by
//! quick-xml.

use std::io::Write;

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

use crate::error::XlsxResult;

/// SpreadsheetML main namespace
pub const NS_MAIN: &str = "http://schemas.openxmlformats.org/spreadsheetml/2006/main";
/// Office document relationships namespace (for `r:id`)
pub const NS_RELATIONSHIPS: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships";

/// Ordered XML element writer
pub struct XmlSink<W: Write> {
    writer: Writer<W>,
}

impl<W: Write> XmlSink<W> {
    /// Wrap a byte sink
    pub fn new(inner: W) -> Self {
        Self {
            writer: Writer::new(inner),
        }
    }

    /// Write the `<?xml ...?>` declaration
    pub fn declaration(&mut self) -> XlsxResult<()> {
        self.writer.write_event(Event::Decl(BytesDecl::new(
            "1.0",
            Some("UTF-8"),
            Some("yes"),
        )))?;
        Ok(())
    }

    /// Open an element
    pub fn start(&mut self, name: &str, attrs: &[(&str, &str)]) -> XlsxResult<()> {
        let start = BytesStart::new(name).with_attributes(attrs.iter().copied());
        self.writer.write_event(Event::Start(start))?;
        Ok(())
    }

    /// Close an element
    pub fn end(&mut self, name: &str) -> XlsxResult<()> {
        self.writer.write_event(Event::End(BytesEnd::new(name)))?;
        Ok(())
    }

    /// Write a self-closing element
    pub fn empty(&mut self, name: &str, attrs: &[(&str, &str)]) -> XlsxResult<()> {
        let start = BytesStart::new(name).with_attributes(attrs.iter().copied());
        self.writer.write_event(Event::Empty(start))?;
        Ok(())
    }

    /// Write escaped character data
    pub fn text(&mut self, text: &str) -> XlsxResult<()> {
        self.writer.write_event(Event::Text(BytesText::new(text)))?;
        Ok(())
    }

    /// Write `<name attrs>text</name>`
    pub fn text_element(&mut self, name: &str, attrs: &[(&str, &str)], text: &str) -> XlsxResult<()> {
        self.start(name, attrs)?;
        self.text(text)?;
        self.end(name)
    }

    /// Access the underlying sink
    pub fn get_mut(&mut self) -> &mut W {
        self.writer.get_mut()
    }

    /// Unwrap the underlying sink
    pub fn into_inner(self) -> W {
        self.writer.into_inner()
    }
}
