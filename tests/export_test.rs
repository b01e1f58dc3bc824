//! Integration tests for workbook export.

mod common;

use common::*;
use doctables::{export_workbook, extract_tables_from_bytes, CellRecord, ExtractionResult, TableGrid};

fn grid(marker: &str) -> TableGrid {
    let mut grid = TableGrid::new();
    grid.push_row(vec![CellRecord::plain(marker), CellRecord::plain("2022")]);
    grid.push_row(vec![CellRecord::new("1,200¹", true, false)]);
    grid
}

#[test]
fn test_sheet_layout() {
    let mut result = ExtractionResult::new();
    result.section_mut("S1").tables.push(grid("T1"));
    result.section_mut("S1").tables.push(grid("T2"));
    result.section_mut("S2").tables.push(grid("T3"));

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out").join("report_tables.xlsx");
    let workbook = export_workbook(&result, &path).unwrap();

    let expected = vec![
        "S1_0", "S1_0_SUP", "S1_0_SUB", "S1_1", "S1_1_SUP", "S1_1_SUB", "S2_0", "S2_0_SUP",
        "S2_0_SUB",
    ];
    assert_eq!(sheet_names(&path), expected);
    assert_eq!(workbook.len(), 3 * result.table_count());

    let strings = read_part(&path, "xl/sharedStrings.xml");
    assert!(strings.contains(">T1<"));
    assert!(strings.contains(">1,200¹<"));

    // S1_0_SUP: header row 0/0, then 1 and a padded blank
    let sup = read_part(&path, "xl/worksheets/sheet2.xml");
    assert!(sup.contains(r#"<c r="A2"><v>1</v></c>"#));
    assert!(!sup.contains(r#"r="B2""#));
}

#[test]
fn test_long_and_illegal_labels() {
    let mut result = ExtractionResult::new();
    let long = "PLATINUM-GROUP METALS (PLATINUM AND PALLADIUM)";
    result.section_mut(long).tables.push(grid("T1"));
    result.section_mut("SAND/GRAVEL").tables.push(grid("T2"));

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.xlsx");
    export_workbook(&result, &path).unwrap();

    let names = sheet_names(&path);
    assert_eq!(names.len(), 6);
    assert!(names.iter().all(|n| n.chars().count() <= 31));
    assert!(names[1].ends_with("_SUP"));
    assert!(names[2].ends_with("_SUB"));
    assert_eq!(&names[3..], &["SANDGRAVEL_0", "SANDGRAVEL_0_SUP", "SANDGRAVEL_0_SUB"]);

    let mut unique = names.clone();
    unique.sort();
    unique.dedup();
    assert_eq!(unique.len(), names.len());
}

#[test]
fn test_docx_to_workbook() {
    let body = vec![
        para("COBALT"),
        table_of_cells(&[
            vec![cell(&[run("Country")]), cell(&[run("Output")])],
            vec![cell(&[run("Chile")]), cell(&[run("CO₂")])],
        ]),
    ];
    let result = extract_tables_from_bytes(&docx_bytes(&body)).unwrap();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("cobalt.xlsx");
    export_workbook(&result, &path).unwrap();

    assert_eq!(
        sheet_names(&path),
        vec!["COBALT_0", "COBALT_0_SUP", "COBALT_0_SUB"]
    );
    let sub = read_part(&path, "xl/worksheets/sheet3.xml");
    assert!(sub.contains(r#"<c r="B2"><v>1</v></c>"#));
    assert!(sub.contains(r#"<c r="A1" s="1"><v>0</v></c>"#));
}

#[test]
fn test_empty_result_and_overwrite() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("empty.xlsx");
    std::fs::write(&path, b"old contents").unwrap();

    export_workbook(&ExtractionResult::new(), &path).unwrap();
    assert_eq!(sheet_names(&path), vec!["Sheet"]);
}
