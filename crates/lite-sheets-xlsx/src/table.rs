//! Structured table definitions

use ahash::AHashSet;

use lite_sheets_core::{CellRange, CellValue, Error, Result, MAX_ROWS};

use crate::encoder::escape_xstring;
use crate::error::XlsxResult;
use crate::package::{table_part, PackageSink, CT_TABLE};
use crate::xml::{XmlSink, NS_MAIN};

/// Name used when sanitizing leaves nothing
const DEFAULT_TABLE_NAME: &str = "Table";

/// Make a requested name usable as a table name.
///
/// Characters outside `[A-Za-z0-9_]` become `_`, an empty result becomes
/// `Table`, and a leading digit gets a `_` prefix.
pub fn sanitize_table_name(requested: &str) -> String {
    let mut name: String = requested
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' { c } else { '_' })
        .collect();

    if name.is_empty() {
        name.push_str(DEFAULT_TABLE_NAME);
    }
    if name.starts_with(|c: char| c.is_ascii_digit()) {
        name.insert(0, '_');
    }
    name
}

/// Tables registered so far in one workbook build
///
/// Table names and ids must be unique across the whole workbook.
#[derive(Debug, Default)]
pub struct TableCatalog {
    names: AHashSet<String>,
    count: u32,
}

impl TableCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of tables registered
    pub fn len(&self) -> u32 {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// First of `base`, `base_1`, `base_2`, ... not taken (case-insensitive)
    pub fn unique_name(&self, base: &str) -> String {
        let mut candidate = base.to_string();
        let mut counter = 1;
        while self.names.contains(&candidate.to_lowercase()) {
            candidate = format!("{}_{}", base, counter);
            counter += 1;
        }
        candidate
    }

    /// Record a name and hand out the next table id
    fn register(&mut self, name: &str) -> u32 {
        self.names.insert(name.to_lowercase());
        self.count += 1;
        self.count
    }
}

/// A table bound to a header row and the data below it
#[derive(Debug, Clone, PartialEq)]
pub struct TableDefinition {
    pub id: u32,
    /// Unique name, also used as the display name
    pub name: String,
    pub style: String,
    /// Header row through the last data row
    pub range: CellRange,
    /// One name per header cell
    pub columns: Vec<String>,
    pub row_stripes: bool,
}

impl TableDefinition {
    /// Path of the table part
    pub fn part_path(&self) -> String {
        table_part(self.id)
    }

    /// Relationship target as seen from a worksheet part
    pub fn worksheet_target(&self) -> String {
        format!("../tables/table{}.xml", self.id)
    }

    /// Write `xl/tables/tableN.xml`
    pub fn write_part<S: PackageSink>(&self, sink: &mut S) -> XlsxResult<()> {
        sink.start_part(&self.part_path(), CT_TABLE)?;

        let id = self.id.to_string();
        let reference = self.range.to_a1_string();
        let mut xml = XmlSink::new(&mut *sink);
        xml.declaration()?;
        xml.start(
            "table",
            &[
                ("xmlns", NS_MAIN),
                ("id", id.as_str()),
                ("name", self.name.as_str()),
                ("displayName", self.name.as_str()),
                ("ref", reference.as_str()),
                ("headerRowCount", "1"),
            ],
        )?;
        xml.empty("autoFilter", &[("ref", reference.as_str())])?;

        let count = self.columns.len().to_string();
        xml.start("tableColumns", &[("count", count.as_str())])?;
        for (i, column) in self.columns.iter().enumerate() {
            let column_id = (i + 1).to_string();
            let name = escape_xstring(column);
            xml.empty("tableColumn", &[("id", column_id.as_str()), ("name", name.as_ref())])?;
        }
        xml.end("tableColumns")?;

        xml.empty(
            "tableStyleInfo",
            &[
                ("name", self.style.as_str()),
                ("showFirstColumn", "0"),
                ("showLastColumn", "0"),
                ("showRowStripes", if self.row_stripes { "1" } else { "0" }),
                ("showColumnStripes", "0"),
            ],
        )?;
        xml.end("table")?;
        Ok(())
    }
}

/// Header text as table column names: trimmed, with case-insensitive
/// duplicates suffixed `_1`, `_2`, ...
pub(crate) fn column_names(header: &[CellValue]) -> Result<Vec<String>> {
    let mut seen = AHashSet::with_capacity(header.len());
    let mut names = Vec::with_capacity(header.len());

    for (i, value) in header.iter().enumerate() {
        if value.is_blank() {
            return Err(Error::BlankHeader { column: i as u32 + 1 });
        }
        let text = value.display_text();
        let base = text.trim();

        let mut name = base.to_string();
        let mut counter = 1;
        while !seen.insert(name.to_lowercase()) {
            name = format!("{}_{}", base, counter);
            counter += 1;
        }
        names.push(name);
    }

    Ok(names)
}

/// Binds a requested table to a worksheet's header and data rows
#[derive(Debug, Clone)]
pub struct TableDefinitionBuilder {
    requested_name: String,
    style: String,
    row_stripes: bool,
}

impl TableDefinitionBuilder {
    pub fn new<N: Into<String>, S: Into<String>>(name: N, style: S) -> Self {
        Self {
            requested_name: name.into(),
            style: style.into(),
            row_stripes: true,
        }
    }

    pub fn with_row_stripes(mut self, stripes: bool) -> Self {
        self.row_stripes = stripes;
        self
    }

    /// Build the definition and register it in `catalog`.
    ///
    /// `header` is the first non-blank row with its 1-based index,
    /// `column_count` the declared width, `last_row` the last written row.
    /// Nothing is registered when a precondition fails.
    pub fn build(
        &self,
        header: Option<(u32, &[CellValue])>,
        column_count: usize,
        last_row: u32,
        catalog: &mut TableCatalog,
    ) -> Result<TableDefinition> {
        let (header_row, cells) = header.ok_or(Error::TableWithoutHeader)?;

        let present = cells.iter().filter(|v| !v.is_empty()).count();
        if present != column_count {
            return Err(Error::TableColumnMismatch {
                header: present,
                declared: column_count,
            });
        }
        let columns = column_names(cells)?;

        // A table's ref must cover at least one body row below the header,
        // so a header-only table reaches one row past the last written row
        let end_row = last_row.max(header_row + 1).min(MAX_ROWS);
        let range = CellRange::from_indices(header_row, 1, end_row, column_count as u32)?;

        let name = catalog.unique_name(&sanitize_table_name(&self.requested_name));
        let id = catalog.register(&name);
        log::trace!("table {} '{}' over {}", id, name, range);

        Ok(TableDefinition {
            id,
            name,
            style: self.style.clone(),
            range,
            columns,
            row_stripes: self.row_stripes,
        })
    }
}
