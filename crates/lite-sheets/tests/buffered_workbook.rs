//! End-to-end tests for buffered workbooks (build -> unzip -> inspect parts)

mod common;

use chrono::NaiveDate;
use lite_sheets::prelude::*;
use lite_sheets::serial_date;
use pretty_assertions::assert_eq;
use rust_decimal::Decimal;
use std::str::FromStr;

use common::{cell_values, elements, part_names, read_part, row_indices, try_read_part};

const SHEET1: &str = "xl/worksheets/sheet1.xml";

fn people(configure: impl FnOnce(&mut WorksheetBuilder)) -> Vec<u8> {
    WorkbookBuilder::new()
        .add_sheet("People", |sheet| {
            sheet.add_row(row!["Id", "Name"])?;
            sheet.add_row(row![1, "Alex"])?;
            sheet.add_row(row![2, "Brian"])?;
            configure(sheet);
            Ok(())
        })
        .unwrap()
        .build()
        .unwrap()
}

/// Header plus two data rows gives three rows and an A1:B3 filter
#[test]
fn test_header_and_two_rows_with_filter() {
    let bytes = people(|sheet| {
        sheet.apply_auto_filter();
    });
    let sheet = read_part(&bytes, SHEET1);

    assert_eq!(row_indices(&sheet), vec![1, 2, 3]);
    let filters = elements(&sheet, "autoFilter");
    assert_eq!(filters.len(), 1);
    assert_eq!(filters[0]["ref"], "A1:B3");

    let cells = cell_values(&sheet);
    assert_eq!(cells["A1"], "Id");
    assert_eq!(cells["B1"], "Name");
    assert_eq!(cells["A3"], "2");
    assert_eq!(cells["B3"], "Brian");
}

/// Every structural part of the package is present
#[test]
fn test_package_layout() {
    let bytes = people(|sheet| {
        sheet.add_table("People");
    });

    assert_eq!(
        part_names(&bytes),
        vec![
            "[Content_Types].xml",
            "_rels/.rels",
            "xl/_rels/workbook.xml.rels",
            "xl/styles.xml",
            "xl/tables/table1.xml",
            "xl/workbook.xml",
            "xl/worksheets/_rels/sheet1.xml.rels",
            "xl/worksheets/sheet1.xml",
        ]
    );

    let types = read_part(&bytes, "[Content_Types].xml");
    let overrides: Vec<String> = elements(&types, "Override")
        .into_iter()
        .map(|o| o["PartName"].clone())
        .collect();
    assert_eq!(
        overrides,
        vec![
            "/xl/styles.xml",
            "/xl/worksheets/sheet1.xml",
            "/xl/tables/table1.xml",
            "/xl/workbook.xml",
        ]
    );
}

/// Tables replace the sheet-level filter and carry their own
#[test]
fn test_table_definition() {
    let bytes = people(|sheet| {
        sheet
            .apply_auto_filter()
            .add_table_with_style("2024 people!", "TableStyleLight9");
    });

    let sheet = read_part(&bytes, SHEET1);
    assert!(elements(&sheet, "autoFilter").is_empty());
    assert_eq!(elements(&sheet, "tablePart").len(), 1);

    let table = read_part(&bytes, "xl/tables/table1.xml");
    let root = &elements(&table, "table")[0];
    assert_eq!(root["name"], "_2024_people_");
    assert_eq!(root["displayName"], "_2024_people_");
    assert_eq!(root["ref"], "A1:B3");
    assert_eq!(root["headerRowCount"], "1");

    let columns: Vec<String> = elements(&table, "tableColumn")
        .into_iter()
        .map(|c| c["name"].clone())
        .collect();
    assert_eq!(columns, vec!["Id", "Name"]);
    assert_eq!(elements(&table, "tableStyleInfo")[0]["name"], "TableStyleLight9");
}

/// A blank header name is rejected and nothing is built
#[test]
fn test_blank_header_cell_is_an_error() {
    let result = WorkbookBuilder::new().add_sheet("S", |sheet| {
        sheet.add_row(row!["Id", "   "])?;
        sheet.add_table("T");
        Ok(())
    });

    match result {
        Err(XlsxError::Core(Error::BlankHeader { column })) => assert_eq!(column, 2),
        other => panic!("expected blank header error, got {:?}", other.map(|_| ())),
    }
}

/// Same-named tables on different sheets get numeric suffixes
#[test]
fn test_table_names_get_suffixes() {
    let mut builder = WorkbookBuilder::new();
    for name in ["North", "South", "East"] {
        builder = builder
            .add_sheet(name, |sheet| {
                sheet.add_row(row!["Region", "Sales"])?;
                sheet.add_row(row![name, 10])?;
                sheet.add_table("Sales");
                Ok(())
            })
            .unwrap();
    }
    let bytes = builder.build().unwrap();

    let names: Vec<String> = (1..=3)
        .map(|id| {
            let table = read_part(&bytes, &format!("xl/tables/table{}.xml", id));
            elements(&table, "table")[0]["name"].clone()
        })
        .collect();
    assert_eq!(names, vec!["Sales", "Sales_1", "Sales_2"]);
}

/// Each hyperlink gets one relationship and a reference at its own cell
#[test]
fn test_hyperlink_relationships_match_cells() {
    let bytes = WorkbookBuilder::new()
        .add_sheet("Links", |sheet| {
            sheet.add_row(row!["Name", "Site", "Docs"])?;
            sheet.add_row(row![
                "Rust",
                hyperlink("https://www.rust-lang.org", Some("rust-lang.org")),
                hyperlink("https://doc.rust-lang.org/std/?search=vec&x=1", None),
            ])?;
            sheet.add_empty_rows(1)?;
            sheet.add_row(row!["Crates", hyperlink("https://crates.io", Some("  ")), None::<&str>])?;
            Ok(())
        })
        .unwrap()
        .build()
        .unwrap();

    let sheet = read_part(&bytes, SHEET1);
    let links = elements(&sheet, "hyperlink");
    let refs: Vec<&str> = links.iter().map(|l| l["ref"].as_str()).collect();
    assert_eq!(refs, vec!["B2", "C2", "B4"]);

    let cells = cell_values(&sheet);
    assert_eq!(cells["B2"], "rust-lang.org");
    assert_eq!(cells["C2"], "https://doc.rust-lang.org/std/?search=vec&x=1");
    assert_eq!(cells["B4"], "https://crates.io");
    assert_eq!(links[2]["display"], "https://crates.io");

    let rels = read_part(&bytes, "xl/worksheets/_rels/sheet1.xml.rels");
    let rels = elements(&rels, "Relationship");
    assert_eq!(rels.len(), links.len());
    for (link, rel) in links.iter().zip(&rels) {
        assert_eq!(link["r:id"], rel["Id"]);
        assert_eq!(rel["TargetMode"], "External");
    }
    assert_eq!(rels[1]["Target"], "https://doc.rust-lang.org/std/?search=vec&x=1");
}

/// Relative hyperlink targets are rejected at the call
#[test]
fn test_relative_hyperlink_is_rejected() {
    let result = WorkbookBuilder::new().add_sheet("S", |sheet| {
        sheet.add_row(row!["Link"])?;
        sheet.add_row(row![hyperlink("/relative/path", None)])?;
        Ok(())
    });
    assert!(matches!(
        result,
        Err(XlsxError::Core(Error::InvalidHyperlink(_)))
    ));
}

/// Values keep their types through encoding
#[test]
fn test_typed_values() {
    let joined = NaiveDate::from_ymd_opt(2023, 7, 14)
        .unwrap()
        .and_hms_opt(9, 30, 0)
        .unwrap();
    let bytes = WorkbookBuilder::new()
        .add_sheet("Types", |sheet| {
            sheet.add_row(row!["Text", "Flag", "Int", "Float", "Decimal", "Date", "Empty"])?;
            sheet.add_row(row![
                " padded ",
                true,
                -7i64,
                0.25,
                Decimal::from_str("1234.5600").unwrap(),
                joined,
                None::<i32>,
            ])?;
            Ok(())
        })
        .unwrap()
        .build()
        .unwrap();

    let sheet = read_part(&bytes, SHEET1);
    let cells = elements(&sheet, "c");
    let row2: Vec<_> = cells.iter().filter(|c| c["r"].ends_with('2')).collect();
    let kinds: Vec<Option<&str>> = row2.iter().map(|c| c.get("t").map(String::as_str)).collect();
    assert_eq!(
        kinds,
        vec![
            Some("inlineStr"),
            Some("b"),
            Some("n"),
            Some("n"),
            Some("n"),
            None,
            Some("inlineStr"),
        ]
    );
    assert_eq!(row2[5]["s"], "1");

    let values = cell_values(&sheet);
    assert_eq!(values["A2"], " padded ");
    assert_eq!(values["B2"], "1");
    assert_eq!(values["C2"], "-7");
    assert_eq!(values["D2"], "0.25");
    assert_eq!(values["E2"], "1234.5600");
    assert_eq!(values["G2"], "");

    let serial: f64 = values["F2"].parse().unwrap();
    assert_eq!(serial_date::from_serial(serial), Some(joined));

    let styles = read_part(&bytes, "xl/styles.xml");
    assert_eq!(elements(&styles, "numFmt")[0]["formatCode"], "yyyy-mm-dd");
}

/// Column hints are the longest rendered text plus two
#[test]
fn test_auto_fit_widths() {
    let day = NaiveDate::from_ymd_opt(2024, 2, 29).unwrap();
    let bytes = WorkbookBuilder::new()
        .add_sheet("Widths", |sheet| {
            sheet.add_row(row!["Id", "When", "Untouched"])?;
            sheet.add_row(row![12345, day, None::<&str>])?;
            sheet.auto_fit_columns();
            Ok(())
        })
        .unwrap()
        .build()
        .unwrap();

    let sheet = read_part(&bytes, SHEET1);
    let widths: Vec<(String, String)> = elements(&sheet, "col")
        .into_iter()
        .map(|c| (c["min"].clone(), c["width"].clone()))
        .collect();
    assert_eq!(
        widths,
        vec![
            ("1".to_string(), "7".to_string()),
            // "2024-02-29 00:00:00"
            ("2".to_string(), "21".to_string()),
            ("3".to_string(), "11".to_string()),
        ]
    );
}

/// Blank rows before the header shift it down; the filter follows
#[test]
fn test_blank_rows_before_header() {
    let bytes = WorkbookBuilder::new()
        .add_sheet("Report", |sheet| {
            sheet.add_empty_rows(2)?;
            sheet.add_row(row!["Id", "Name"])?;
            sheet.add_row(row![1, "Alex"])?;
            sheet.add_row(row![None::<i32>, None::<&str>])?;
            sheet.apply_auto_filter();
            Ok(())
        })
        .unwrap()
        .build()
        .unwrap();

    let sheet = read_part(&bytes, SHEET1);
    assert_eq!(row_indices(&sheet), vec![1, 2, 3, 4, 5]);
    assert_eq!(elements(&sheet, "autoFilter")[0]["ref"], "A3:B5");
    assert!(cell_values(&sheet).keys().all(|r| !r.ends_with('5')));
}

/// Worksheets without a header cannot be built
#[test]
fn test_sheet_without_header_fails_at_build() {
    let err = WorkbookBuilder::new()
        .add_sheet("Blank", |sheet| {
            sheet.add_empty_rows(3)?;
            Ok(())
        })
        .unwrap()
        .build()
        .unwrap_err();
    assert_eq!(err.as_core(), Some(&Error::MissingHeader));
    assert!(matches!(WorkbookBuilder::new().build(), Err(XlsxError::EmptyWorkbook)));
}

/// Files written to disk are complete packages
#[test]
fn test_build_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("report.xlsx");

    WorkbookBuilder::new()
        .add_sheet("Data", |sheet| {
            sheet.add_row(row!["Id"])?;
            sheet.add_row(row![1])?;
            Ok(())
        })
        .unwrap()
        .build_file(&path)
        .unwrap();

    let bytes = std::fs::read(&path).unwrap();
    let workbook = read_part(&bytes, "xl/workbook.xml");
    assert_eq!(elements(&workbook, "sheet")[0]["name"], "Data");
    assert!(try_read_part(&bytes, "xl/tables/table1.xml").is_none());
}

/// Stored entries are readable too
#[test]
fn test_stored_compression_setting() {
    let settings = WorkbookSettings::default()
        .with_compression(lite_sheets::PackageCompression::Stored)
        .with_date_number_format("dd.mm.yyyy");
    let bytes = WorkbookBuilder::with_settings(settings)
        .add_sheet("S", |sheet| {
            sheet.add_row(row!["When"])?;
            Ok(())
        })
        .unwrap()
        .build()
        .unwrap();

    let styles = read_part(&bytes, "xl/styles.xml");
    assert_eq!(elements(&styles, "numFmt")[0]["formatCode"], "dd.mm.yyyy");
}
