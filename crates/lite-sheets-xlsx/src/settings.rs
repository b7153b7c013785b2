//! Workbook-wide writer settings

/// Compression applied to package entries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PackageCompression {
    /// Entries stored as-is
    Stored,
    /// Deflate (the format's customary compression)
    #[default]
    Deflated,
}

/// Settings shared by the buffered and streaming assemblers
///
/// The defaults produce the canonical package: deflated entries, the
/// `TableStyleMedium2` table style with row stripes, and `yyyy-mm-dd` dates.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkbookSettings {
    /// Entry compression
    pub compression: PackageCompression,
    /// Deflate level, `None` for the zip crate's default
    pub compression_level: Option<i64>,
    /// Style used by tables that do not name one
    pub default_table_style: String,
    /// Number format code of the date style
    pub date_number_format: String,
    /// Whether tables show banded rows
    pub table_row_stripes: bool,
}

impl Default for WorkbookSettings {
    fn default() -> Self {
        Self {
            compression: PackageCompression::Deflated,
            compression_level: None,
            default_table_style: "TableStyleMedium2".to_string(),
            date_number_format: "yyyy-mm-dd".to_string(),
            table_row_stripes: true,
        }
    }
}

impl WorkbookSettings {
    /// Settings with the defaults
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_compression(mut self, compression: PackageCompression) -> Self {
        self.compression = compression;
        self
    }

    pub fn with_compression_level(mut self, level: i64) -> Self {
        self.compression_level = Some(level);
        self
    }

    pub fn with_default_table_style<S: Into<String>>(mut self, style: S) -> Self {
        self.default_table_style = style.into();
        self
    }

    pub fn with_date_number_format<S: Into<String>>(mut self, format: S) -> Self {
        self.date_number_format = format.into();
        self
    }

    pub fn with_table_row_stripes(mut self, stripes: bool) -> Self {
        self.table_row_stripes = stripes;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = WorkbookSettings::default();
        assert_eq!(settings.compression, PackageCompression::Deflated);
        assert_eq!(settings.default_table_style, "TableStyleMedium2");
        assert_eq!(settings.date_number_format, "yyyy-mm-dd");
        assert!(settings.table_row_stripes);
    }

    #[test]
    fn test_builder_methods() {
        let settings = WorkbookSettings::new()
            .with_compression(PackageCompression::Stored)
            .with_default_table_style("TableStyleLight9")
            .with_table_row_stripes(false);
        assert_eq!(settings.compression, PackageCompression::Stored);
        assert_eq!(settings.default_table_style, "TableStyleLight9");
        assert!(!settings.table_row_stripes);
    }
}
