//! Deferred hyperlink relationships
//!
//! Hyperlink targets can only be listed after the row data of a worksheet, so
//! cells record them here while rows are written and the ledger is flushed
//! once when the worksheet closes.

use crate::error::XlsxResult;
use crate::package::{PackageSink, TargetMode, REL_HYPERLINK};
use crate::xml::XmlSink;

/// A hyperlink cell whose relationship has not been registered yet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingHyperlink {
    /// 1-based row of the display cell
    pub row: u32,
    /// 1-based column of the display cell
    pub col: u32,
    /// A1 address of the display cell
    pub reference: String,
    pub url: String,
    pub display: String,
}

/// Hyperlinks collected for one worksheet
#[derive(Debug, Default)]
pub struct HyperlinkLedger {
    entries: Vec<PendingHyperlink>,
}

impl HyperlinkLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, entry: PendingHyperlink) {
        self.entries.push(entry);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Register one external relationship per entry and write the
    /// `<hyperlinks>` block into the worksheet `part`.
    ///
    /// Consumes the ledger; nothing can be appended after the flush. Writes
    /// nothing when no hyperlinks were recorded. Returns the number flushed.
    pub fn flush<S: PackageSink>(self, xml: &mut XmlSink<&mut S>, part: &str) -> XlsxResult<usize> {
        if self.entries.is_empty() {
            return Ok(0);
        }

        xml.start("hyperlinks", &[])?;
        for entry in &self.entries {
            let rel_id = xml
                .get_mut()
                .add_relationship(part, REL_HYPERLINK, &entry.url, TargetMode::External);
            xml.empty(
                "hyperlink",
                &[
                    ("ref", entry.reference.as_str()),
                    ("r:id", rel_id.as_str()),
                    ("display", entry.display.as_str()),
                ],
            )?;
        }
        xml.end("hyperlinks")?;

        Ok(self.entries.len())
    }
}
