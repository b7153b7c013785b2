//! Package sinks
//!
//! A package is an ordered set of named parts plus the relationships between
//! them. Workbook assembly only ever needs three things from it: open the next
//! part and write bytes into it, register a relationship from one part to a
//! target, and close the package. [`PackageSink`] captures exactly that, so the
//! assemblers stay independent of the archive format.

mod archive;
mod memory;

use std::collections::BTreeMap;
use std::io::Write;

use crate::error::{XlsxError, XlsxResult};
use crate::xml::XmlSink;

pub use self::memory::{MemoryPackage, PackageParts};
pub use self::archive::ZipPackage;

/// Source name used for package-level relationships (`_rels/.rels`)
pub const PACKAGE_ROOT: &str = "";

pub const WORKBOOK_PART: &str = "xl/workbook.xml";
pub const STYLES_PART: &str = "xl/styles.xml";
pub const CONTENT_TYPES_PART: &str = "[Content_Types].xml";

pub const CT_WORKBOOK: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml";
pub const CT_WORKSHEET: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml";
pub const CT_STYLES: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.styles+xml";
pub const CT_TABLE: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.table+xml";
const CT_RELATIONSHIPS: &str = "application/vnd.openxmlformats-package.relationships+xml";
const CT_XML: &str = "application/xml";

pub const REL_OFFICE_DOCUMENT: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument";
pub const REL_WORKSHEET: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet";
pub const REL_STYLES: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles";
pub const REL_TABLE: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/table";
pub const REL_HYPERLINK: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/hyperlink";

const NS_CONTENT_TYPES: &str = "http://schemas.openxmlformats.org/package/2006/content-types";
const NS_PACKAGE_RELATIONSHIPS: &str =
    "http://schemas.openxmlformats.org/package/2006/relationships";

/// Path of the worksheet part with the given 1-based sheet number
pub fn worksheet_part(number: usize) -> String {
    format!("xl/worksheets/sheet{}.xml", number)
}

/// Path of the table part with the given table id
pub fn table_part(id: u32) -> String {
    format!("xl/tables/table{}.xml", id)
}

/// Whether a relationship target lives inside the package
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetMode {
    Internal,
    External,
}

/// A relationship from one part to another part or an external URI
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Relationship {
    /// Id unique within the source part (`rId1`, `rId2`, ...)
    pub id: String,
    /// Relationship type URI
    pub rel_type: &'static str,
    /// Target, relative to the source part for internal targets
    pub target: String,
    pub mode: TargetMode,
}

/// Destination for the parts of one package
///
/// Bytes written through [`Write`] go to the part most recently opened with
/// [`PackageSink::start_part`]. Parts are written one at a time, in order.
pub trait PackageSink: Write {
    /// What the sink yields once the package is closed
    type Output;

    /// Open a new part, closing the previous one
    fn start_part(&mut self, path: &str, content_type: &'static str) -> XlsxResult<()>;

    /// Register a relationship from `source` and return its id
    fn add_relationship(
        &mut self,
        source: &str,
        rel_type: &'static str,
        target: &str,
        mode: TargetMode,
    ) -> String;

    /// Write relationship parts and the content-type manifest, then close
    fn finish(self) -> XlsxResult<Self::Output>;
}

/// Content types and relationships collected while parts are written
#[derive(Debug, Default)]
pub(crate) struct PartManifest {
    overrides: Vec<(String, &'static str)>,
    relationships: BTreeMap<String, Vec<Relationship>>,
}

impl PartManifest {
    pub(crate) fn register_part(&mut self, path: &str, content_type: &'static str) -> XlsxResult<()> {
        if self.overrides.iter().any(|(p, _)| p == path) {
            return Err(XlsxError::DuplicatePart(path.to_string()));
        }
        log::trace!("package part {} ({})", path, content_type);
        self.overrides.push((path.to_string(), content_type));
        Ok(())
    }

    pub(crate) fn add_relationship(
        &mut self,
        source: &str,
        rel_type: &'static str,
        target: &str,
        mode: TargetMode,
    ) -> String {
        let rels = self.relationships.entry(source.to_string()).or_default();
        let id = format!("rId{}", rels.len() + 1);
        log::trace!("relationship {} from '{}' to {}", id, source, target);
        rels.push(Relationship {
            id: id.clone(),
            rel_type,
            target: target.to_string(),
            mode,
        });
        id
    }

    /// Render every `.rels` part and `[Content_Types].xml`, in that order
    pub(crate) fn render(&self) -> XlsxResult<Vec<(String, Vec<u8>)>> {
        let mut parts = Vec::with_capacity(self.relationships.len() + 1);
        for (source, rels) in &self.relationships {
            parts.push((relationships_part(source), render_relationships(rels)?));
        }
        parts.push((CONTENT_TYPES_PART.to_string(), self.render_content_types()?));
        Ok(parts)
    }

    fn render_content_types(&self) -> XlsxResult<Vec<u8>> {
        let mut xml = XmlSink::new(Vec::new());
        xml.declaration()?;
        xml.start("Types", &[("xmlns", NS_CONTENT_TYPES)])?;
        xml.empty("Default", &[("Extension", "rels"), ("ContentType", CT_RELATIONSHIPS)])?;
        xml.empty("Default", &[("Extension", "xml"), ("ContentType", CT_XML)])?;
        for (path, content_type) in &self.overrides {
            let part_name = format!("/{}", path);
            xml.empty(
                "Override",
                &[("PartName", part_name.as_str()), ("ContentType", *content_type)],
            )?;
        }
        xml.end("Types")?;
        Ok(xml.into_inner())
    }
}

/// Path of the relationships part for a source part
pub(crate) fn relationships_part(source: &str) -> String {
    match source.rsplit_once('/') {
        Some((dir, file)) => format!("{}/_rels/{}.rels", dir, file),
        None => format!("_rels/{}.rels", source),
    }
}

fn render_relationships(rels: &[Relationship]) -> XlsxResult<Vec<u8>> {
    let mut xml = XmlSink::new(Vec::new());
    xml.declaration()?;
    xml.start("Relationships", &[("xmlns", NS_PACKAGE_RELATIONSHIPS)])?;
    for rel in rels {
        let mut attrs = vec![
            ("Id", rel.id.as_str()),
            ("Type", rel.rel_type),
            ("Target", rel.target.as_str()),
        ];
        if rel.mode == TargetMode::External {
            attrs.push(("TargetMode", "External"));
        }
        xml.empty("Relationship", &attrs)?;
    }
    xml.end("Relationships")?;
    Ok(xml.into_inner())
}
