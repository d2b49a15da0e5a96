//! Workbook loading tests against real .xlsx files
//!
//! Fixtures are written with rust_xlsxwriter, including cached results for
//! formula cells, then read back through the public API.

use pretty_assertions::assert_eq;
use royalbit_sheetlens::excel::WorkbookModel;
use royalbit_sheetlens::types::{CellRecord, CellValue, SheetSummary, WorkbookSummary};
use royalbit_sheetlens::writer::export_summary;
use royalbit_sheetlens::LensError;
use rust_xlsxwriter::{Formula, Workbook};
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

// ═══════════════════════════════════════════════════════════════════════════
// FIXTURES
// ═══════════════════════════════════════════════════════════════════════════

/// Sheet1: A1 = 5, B1 = A1*2 cached as 10
fn write_example(dir: &TempDir) -> PathBuf {
    let path = dir.path().join("example.xlsx");
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.set_name("Sheet1").unwrap();
    sheet.write_number(0, 0, 5.0).unwrap();
    sheet
        .write_formula(0, 1, Formula::new("=A1*2").set_result("10"))
        .unwrap();
    workbook.save(&path).unwrap();
    path
}

/// A training plan spread over three sheets
fn write_training_plan(dir: &TempDir) -> PathBuf {
    let path = dir.path().join("plan.xlsx");
    let mut workbook = Workbook::new();

    let week1 = workbook.add_worksheet();
    week1.set_name("Week 1").unwrap();
    week1.write_string(0, 0, "Exercise").unwrap();
    week1.write_string(0, 1, "Sets").unwrap();
    week1.write_string(0, 2, "Reps").unwrap();
    week1.write_string(0, 3, "Volume").unwrap();
    week1.write_string(1, 0, "Squat").unwrap();
    week1.write_number(1, 1, 4.0).unwrap();
    week1.write_number(1, 2, 8.0).unwrap();
    week1
        .write_formula(1, 3, Formula::new("=B2*C2").set_result("32"))
        .unwrap();
    week1.write_string(2, 0, "Bench").unwrap();
    week1.write_number(2, 1, 3.0).unwrap();
    week1.write_number(2, 2, 10.0).unwrap();
    week1
        .write_formula(2, 3, Formula::new("=B3*C3").set_result("30"))
        .unwrap();
    week1
        .write_formula(4, 3, Formula::new("=SUM(D2:D3)").set_result("62"))
        .unwrap();

    let week2 = workbook.add_worksheet();
    week2.set_name("Week 2").unwrap();
    week2
        .write_formula(0, 0, Formula::new("='Week 1'!D5*1.1").set_result("68.2"))
        .unwrap();
    week2.write_boolean(2, 1, true).unwrap();

    let empty = workbook.add_worksheet();
    empty.set_name("Notes").unwrap();

    workbook.save(&path).unwrap();
    path
}

// ═══════════════════════════════════════════════════════════════════════════
// LOADER
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_open_lists_sheets_in_order() {
    let dir = TempDir::new().unwrap();
    let model = WorkbookModel::open(write_training_plan(&dir)).unwrap();

    assert_eq!(model.sheet_names(), &["Week 1", "Week 2", "Notes"]);
    assert!(model.has_sheet("Week 2"));
    assert!(!model.has_sheet("week 2"));
}

#[test]
fn test_open_missing_file() {
    let result = WorkbookModel::open("nonexistent.xlsx");
    assert!(matches!(result, Err(LensError::Load(_))));
}

#[test]
fn test_open_corrupt_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("broken.xlsx");
    fs::write(&path, b"this is not a zip archive").unwrap();

    let err = WorkbookModel::open(&path).unwrap_err();
    assert!(matches!(err, LensError::Load(_)));
    assert!(err.to_string().starts_with("Failed to load workbook"));
}

#[test]
fn test_open_unsupported_extension() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("notes.txt");
    fs::write(&path, "plain text").unwrap();

    assert!(matches!(WorkbookModel::open(&path), Err(LensError::Load(_))));
}

// ═══════════════════════════════════════════════════════════════════════════
// SUMMARIES
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_example_summary() {
    let dir = TempDir::new().unwrap();
    let model = WorkbookModel::open(write_example(&dir)).unwrap();

    assert_eq!(
        model.sheet_summary("Sheet1").unwrap(),
        SheetSummary {
            title: "Sheet1".to_string(),
            max_row: 1,
            max_column: 2,
            nonempty_cells: 2,
            formula_count: 1,
        }
    );
}

#[test]
fn test_training_plan_summaries() {
    let dir = TempDir::new().unwrap();
    let model = WorkbookModel::open(write_training_plan(&dir)).unwrap();
    let summaries = model.all_summaries().unwrap();

    assert_eq!(summaries.len(), 3);

    let week1 = &summaries[0];
    assert_eq!(week1.title, "Week 1");
    assert_eq!((week1.max_row, week1.max_column), (5, 4));
    assert_eq!(week1.nonempty_cells, 13);
    assert_eq!(week1.formula_count, 3);

    let week2 = &summaries[1];
    assert_eq!(week2.nonempty_cells, 2);
    assert_eq!(week2.formula_count, 1);

    let notes = &summaries[2];
    assert_eq!((notes.nonempty_cells, notes.formula_count), (0, 0));

    for s in &summaries {
        assert!(s.nonempty_cells >= s.formula_count, "{}", s.title);
    }

    let totals = model.totals().unwrap();
    assert_eq!(totals.sheets, 3);
    assert_eq!(totals.nonempty_cells, 15);
    assert_eq!(totals.formula_count, 4);
}

// ═══════════════════════════════════════════════════════════════════════════
// CELL ITERATOR
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_example_cells() {
    let dir = TempDir::new().unwrap();
    let model = WorkbookModel::open(write_example(&dir)).unwrap();

    let records: Vec<CellRecord> = model.cells("Sheet1").unwrap().collect();
    assert_eq!(records.len(), 2);

    assert_eq!(records[0].address, "A1");
    assert_eq!(records[0].value, CellValue::Float(5.0));
    assert_eq!(records[0].formula, None);

    assert_eq!(records[1].address, "B1");
    assert_eq!(records[1].value, CellValue::Float(10.0));
    assert_eq!(records[1].formula.as_deref(), Some("=A1*2"));
}

#[test]
fn test_cells_skip_empty_coordinates() {
    let dir = TempDir::new().unwrap();
    let model = WorkbookModel::open(write_training_plan(&dir)).unwrap();

    for name in model.sheet_names() {
        for record in model.cells(name).unwrap() {
            assert!(
                !record.value.is_empty() || record.formula.is_some(),
                "{}!{} is empty in both views",
                record.sheet,
                record.address
            );
        }
    }

    let addresses: Vec<String> = model
        .cells("Week 2")
        .unwrap()
        .map(|r| r.address)
        .collect();
    assert_eq!(addresses, vec!["A1", "B3"]);
}

// ═══════════════════════════════════════════════════════════════════════════
// FORMULA SEARCH
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_example_search() {
    let dir = TempDir::new().unwrap();
    let model = WorkbookModel::open(write_example(&dir)).unwrap();

    let hits = model.find_formulas("*2").unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].address, "B1");

    assert!(model.find_formulas("nothing").unwrap().is_empty());
}

#[test]
fn test_search_all_formulas_in_order() {
    let dir = TempDir::new().unwrap();
    let model = WorkbookModel::open(write_training_plan(&dir)).unwrap();

    let hits: Vec<(String, String)> = model
        .find_formulas("")
        .unwrap()
        .into_iter()
        .map(|r| (r.sheet, r.address))
        .collect();
    assert_eq!(
        hits,
        vec![
            ("Week 1".to_string(), "D2".to_string()),
            ("Week 1".to_string(), "D3".to_string()),
            ("Week 1".to_string(), "D5".to_string()),
            ("Week 2".to_string(), "A1".to_string()),
        ]
    );
}

#[test]
fn test_search_case_insensitive() {
    let dir = TempDir::new().unwrap();
    let model = WorkbookModel::open(write_training_plan(&dir)).unwrap();

    let upper = model.find_formulas("SUM").unwrap();
    let lower = model.find_formulas("sum").unwrap();
    assert_eq!(upper, lower);
    assert_eq!(upper.len(), 1);
    assert_eq!(upper[0].value, CellValue::Float(62.0));
}

#[test]
fn test_search_cross_sheet_reference() {
    let dir = TempDir::new().unwrap();
    let model = WorkbookModel::open(write_training_plan(&dir)).unwrap();

    let hits = model.find_formulas("week 1'!").unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].sheet, "Week 2");
}

// ═══════════════════════════════════════════════════════════════════════════
// PREVIEW
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_preview_uses_cached_values() {
    let dir = TempDir::new().unwrap();
    let model = WorkbookModel::open(write_example(&dir)).unwrap();

    let grid = model.preview("Sheet1", 20, 20).unwrap();
    assert_eq!(grid, vec![vec![CellValue::Float(5.0), CellValue::Float(10.0)]]);
}

#[test]
fn test_preview_dimensions_are_bounded() {
    let dir = TempDir::new().unwrap();
    let model = WorkbookModel::open(write_training_plan(&dir)).unwrap();

    for (rows, cols) in [(20, 20), (2, 3), (0, 5), (5, 0)] {
        let grid = model.preview("Week 1", rows, cols).unwrap();
        assert!(grid.len() as u32 <= rows.min(5));
        assert!(grid.iter().all(|row| row.len() as u32 <= cols.min(4)));
    }

    let grid = model.preview("Week 1", 2, 3).unwrap();
    assert_eq!(
        grid,
        vec![
            vec![
                CellValue::Text("Exercise".to_string()),
                CellValue::Text("Sets".to_string()),
                CellValue::Text("Reps".to_string()),
            ],
            vec![
                CellValue::Text("Squat".to_string()),
                CellValue::Float(4.0),
                CellValue::Float(8.0),
            ],
        ]
    );

    assert!(model.preview("Notes", 20, 20).unwrap().is_empty());
}

// ═══════════════════════════════════════════════════════════════════════════
// EXPORT
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_export_summary_json() {
    let dir = TempDir::new().unwrap();
    let path = write_training_plan(&dir);
    let model = WorkbookModel::open(&path).unwrap();
    let out = dir.path().join("summary.json");

    export_summary(&model, &out).unwrap();

    let doc: WorkbookSummary = serde_json::from_str(&fs::read_to_string(&out).unwrap()).unwrap();
    assert_eq!(doc.workbook, path.display().to_string());
    assert_eq!(doc.sheets, model.all_summaries().unwrap());
}

#[test]
fn test_reopen_replaces_model() {
    let dir = TempDir::new().unwrap();
    let mut model = WorkbookModel::open(write_example(&dir)).unwrap();
    assert_eq!(model.sheet_names().len(), 1);

    model = WorkbookModel::open(write_training_plan(&dir)).unwrap();
    assert_eq!(model.sheet_names().len(), 3);
    assert!(!model.has_sheet("Sheet1"));
}
