//! End-to-end tests for streaming workbooks

mod common;

use lite_sheets::prelude::*;
use lite_sheets::{MemoryPackage, ZipPackage};
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use std::io::Cursor;

use common::{cell_values, elements, part_names, read_part, row_indices};

const SHEET1: &str = "xl/worksheets/sheet1.xml";

/// Leading blank rows push the header down and keep numbering contiguous
#[test]
fn test_blank_rows_then_header() {
    let bytes = StreamingWorkbook::build_single("Report", |sheet| {
        sheet.write_empty_rows(2)?;
        sheet.write_row(row!["Id", "Name"])?;
        sheet.write_row(row![1, "Alex"])?;
        sheet.write_row(row![2, "Brian"])?;
        assert_eq!(sheet.rows_written(), 5);
        Ok(())
    })
    .unwrap();

    let sheet = read_part(&bytes, SHEET1);
    assert_eq!(row_indices(&sheet), vec![1, 2, 3, 4, 5]);

    let cells = cell_values(&sheet);
    assert_eq!(cells["A3"], "Id");
    assert_eq!(cells["B5"], "Brian");
    assert!(cells.keys().all(|r| !r.ends_with('1') && !r.ends_with('2')));
}

/// A row of the wrong width fails the whole build
#[test]
fn test_row_width_mismatch() {
    let err = StreamingWorkbook::build_single("S", |sheet| {
        sheet.write_row(row!["A", "B", "C"])?;
        sheet.write_row(row![1, 2])?;
        Ok(())
    })
    .unwrap_err();

    assert_eq!(
        err.as_core(),
        Some(&Error::RowWidthMismatch { expected: 3, actual: 2 })
    );
}

/// A session with no sheets cannot produce a file
#[test]
fn test_empty_session() {
    let result = StreamingWorkbook::build(|_| Ok(()));
    assert!(matches!(result, Err(XlsxError::EmptyWorkbook)));
}

/// Hyperlinks gathered while streaming are listed after the cell data
#[test]
fn test_streamed_hyperlinks() {
    let bytes = StreamingWorkbook::build_single("Links", |sheet| {
        sheet.write_row(row!["Site"])?;
        for i in 0..3 {
            sheet.write_row(row![hyperlink(format!("https://example.com/{}", i), None)])?;
        }
        assert_eq!(sheet.pending_hyperlinks(), 3);
        Ok(())
    })
    .unwrap();

    let sheet = read_part(&bytes, SHEET1);
    let sheet_data_end = sheet.find("</sheetData>").unwrap();
    let hyperlinks_start = sheet.find("<hyperlinks>").unwrap();
    assert!(sheet_data_end < hyperlinks_start);

    let refs: Vec<String> = elements(&sheet, "hyperlink")
        .into_iter()
        .map(|h| h["ref"].clone())
        .collect();
    assert_eq!(refs, vec!["A2", "A3", "A4"]);

    let rels = read_part(&bytes, "xl/worksheets/_rels/sheet1.xml.rels");
    assert_eq!(elements(&rels, "Relationship").len(), 3);
}

/// Several sheets in one session share the style part
#[test]
fn test_multiple_sheets() {
    let bytes = StreamingWorkbook::build(|workbook| {
        workbook
            .add_sheet("First", |sheet| sheet.write_row(row!["A"]))?
            .add_sheet("Second", |sheet| sheet.write_row(row!["B"]))?;
        Ok(())
    })
    .unwrap();

    let names = part_names(&bytes);
    assert!(names.contains(&"xl/worksheets/sheet2.xml".to_string()));
    assert_eq!(names.iter().filter(|n| n.as_str() == "xl/styles.xml").count(), 1);

    let workbook = read_part(&bytes, "xl/workbook.xml");
    let sheets: Vec<(String, String)> = elements(&workbook, "sheet")
        .into_iter()
        .map(|s| (s["name"].clone(), s["sheetId"].clone()))
        .collect();
    assert_eq!(
        sheets,
        vec![
            ("First".to_string(), "1".to_string()),
            ("Second".to_string(), "2".to_string()),
        ]
    );
}

/// Any sink works; here the package is kept as parts in memory
#[test]
fn test_memory_sink() {
    let mut workbook = StreamingWorkbook::new(MemoryPackage::new()).unwrap();
    workbook
        .add_sheet("Only", |sheet| sheet.write_row(row!["x"]))
        .unwrap();
    let parts = workbook.finish().unwrap();

    assert!(parts.part_str(SHEET1).unwrap().contains("<sheetData>"));
    assert!(parts.part("xl/styles.xml").is_some());
}

/// A larger stream written straight into a file
#[test]
fn test_large_stream_to_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("large.xlsx");
    let file = std::fs::File::create(&path).unwrap();

    let mut workbook =
        StreamingWorkbook::new(ZipPackage::new(file, &WorkbookSettings::default())).unwrap();
    workbook
        .add_sheet("Rows", |sheet| {
            sheet.write_row(row!["Seq", "Label", "Even"])?;
            for seq in 0..20_000u32 {
                sheet.write_row(row![seq, format!("row {}", seq), seq % 2 == 0])?;
            }
            Ok(())
        })
        .unwrap();
    workbook.finish().unwrap();

    let bytes = std::fs::read(&path).unwrap();
    let sheet = read_part(&bytes, SHEET1);
    let rows = row_indices(&sheet);
    assert_eq!(rows.len(), 20_001);
    assert_eq!(rows.last(), Some(&20_001));

    let cells = cell_values(&sheet);
    assert_eq!(cells["A20001"], "19999");
    assert_eq!(cells["B20001"], "row 19999");
    assert_eq!(cells["C20001"], "0");
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    /// Row numbers stay contiguous whatever the mix of blank and data rows
    #[test]
    fn prop_row_indices_are_contiguous(
        leading in 0u32..4,
        data in prop::collection::vec(any::<Option<i32>>(), 0..40),
    ) {
        let package = ZipPackage::new(Cursor::new(Vec::new()), &WorkbookSettings::default());
        let mut workbook = StreamingWorkbook::new(package).unwrap();
        workbook
            .add_sheet("P", |sheet| {
                sheet.write_empty_rows(leading)?;
                sheet.write_row(row!["Value"])?;
                for value in &data {
                    sheet.write_row(row![*value])?;
                }
                Ok(())
            })
            .unwrap();
        let bytes = workbook.finish().unwrap().into_inner();

        let sheet = read_part(&bytes, SHEET1);
        let expected: Vec<u32> = (1..=leading + 1 + data.len() as u32).collect();
        prop_assert_eq!(row_indices(&sheet), expected);
    }
}
