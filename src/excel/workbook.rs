//! Workbook loader - Excel (.xlsx/.xlsm/.xls/.xlsb/.ods) → two read-only views

use crate::error::{LensError, LensResult};
use crate::excel::cells::CellIter;
use crate::types::{CellValue, SheetSummary, WorkbookTotals};
use calamine::{open_workbook_auto, Data, Range, Reader};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Leading character that marks a cell's raw text as an expression
pub const FORMULA_MARKER: char = '=';

pub const DEFAULT_PREVIEW_ROWS: u32 = 20;
pub const DEFAULT_PREVIEW_COLS: u32 = 20;

/// An opened workbook.
///
/// Owns the formula view and the value view of the same file. Both are
/// immutable after [`WorkbookModel::open`]; opening another file means
/// building a new model.
#[derive(Debug)]
pub struct WorkbookModel {
    path: PathBuf,
    sheet_names: Vec<String>,
    formula_view: HashMap<String, Range<Data>>,
    value_view: HashMap<String, Range<Data>>,
}

impl WorkbookModel {
    /// Load a workbook from disk.
    ///
    /// The file is opened twice, once per view. Any failure (missing file,
    /// unsupported container, a sheet that does not parse) aborts the whole
    /// load.
    pub fn open<P: AsRef<Path>>(path: P) -> LensResult<Self> {
        let path = path.as_ref().to_path_buf();
        info!("Loading workbook {}", path.display());

        let (sheet_names, formula_view) = load_formula_view(&path)?;
        let value_view = load_value_view(&path, &sheet_names)?;

        info!(
            "Loaded {} ({} sheets)",
            path.display(),
            sheet_names.len()
        );

        Ok(Self {
            path,
            sheet_names,
            formula_view,
            value_view,
        })
    }

    /// Build a model from in-memory grids: `(name, cached values, formulas)`
    /// per sheet, formulas without the leading marker as calamine returns them.
    pub fn from_ranges<P: AsRef<Path>>(
        path: P,
        sheets: Vec<(String, Range<Data>, Range<String>)>,
    ) -> Self {
        let mut sheet_names = Vec::with_capacity(sheets.len());
        let mut formula_view = HashMap::new();
        let mut value_view = HashMap::new();

        for (name, values, formulas) in sheets {
            formula_view.insert(name.clone(), formula_preserving(values.clone(), &formulas));
            value_view.insert(name.clone(), values);
            sheet_names.push(name);
        }

        Self {
            path: path.as_ref().to_path_buf(),
            sheet_names,
            formula_view,
            value_view,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Sheet names in workbook order
    pub fn sheet_names(&self) -> &[String] {
        &self.sheet_names
    }

    pub fn has_sheet(&self, name: &str) -> bool {
        self.formula_view.contains_key(name)
    }

    pub(crate) fn formula_sheet(&self, name: &str) -> LensResult<&Range<Data>> {
        self.formula_view
            .get(name)
            .ok_or_else(|| LensError::SheetNotFound(name.to_string()))
    }

    pub(crate) fn value_sheet(&self, name: &str) -> LensResult<&Range<Data>> {
        self.value_view
            .get(name)
            .ok_or_else(|| LensError::SheetNotFound(name.to_string()))
    }

    /// Count non-empty cells and formulas of one sheet
    pub fn sheet_summary(&self, name: &str) -> LensResult<SheetSummary> {
        let raw = self.formula_sheet(name)?;
        let (max_row, max_column) = extent(raw);

        let mut nonempty_cells = 0;
        let mut formula_count = 0;
        for (_, _, cell) in raw.cells() {
            match cell {
                Data::Empty => {}
                Data::String(s) if s.is_empty() => {}
                Data::String(s) => {
                    nonempty_cells += 1;
                    if s.starts_with(FORMULA_MARKER) {
                        formula_count += 1;
                    }
                }
                _ => nonempty_cells += 1,
            }
        }

        Ok(SheetSummary {
            title: name.to_string(),
            max_row,
            max_column,
            nonempty_cells,
            formula_count,
        })
    }

    /// One summary per sheet, in workbook order
    pub fn all_summaries(&self) -> LensResult<Vec<SheetSummary>> {
        self.sheet_names
            .iter()
            .map(|name| self.sheet_summary(name))
            .collect()
    }

    pub fn totals(&self) -> LensResult<WorkbookTotals> {
        Ok(WorkbookTotals::from_summaries(&self.all_summaries()?))
    }

    /// Walk a sheet's cells in row-major order, joining both views.
    ///
    /// Every call returns a fresh iterator.
    pub fn cells(&self, name: &str) -> LensResult<CellIter<'_>> {
        let (sheet, formulas) = self
            .formula_view
            .get_key_value(name)
            .ok_or_else(|| LensError::SheetNotFound(name.to_string()))?;
        let values = self.value_sheet(name)?;
        Ok(CellIter::new(sheet, formulas, values))
    }

    /// Cached values from A1, clipped to the sheet extent and the given bounds
    pub fn preview(
        &self,
        name: &str,
        max_rows: u32,
        max_cols: u32,
    ) -> LensResult<Vec<Vec<CellValue>>> {
        let values = self.value_sheet(name)?;
        let (rows, cols) = extent(values);
        let rmax = rows.min(max_rows);
        let cmax = cols.min(max_cols);

        Ok((0..rmax)
            .map(|row| {
                (0..cmax)
                    .map(|col| {
                        values
                            .get_value((row, col))
                            .map(CellValue::from)
                            .unwrap_or(CellValue::Empty)
                    })
                    .collect()
            })
            .collect())
    }
}

/// 1-based (max_row, max_column) of the last cell holding content, (0, 0) when empty
pub(crate) fn extent<T: calamine::CellType>(range: &Range<T>) -> (u32, u32) {
    range
        .end()
        .map(|(row, col)| (row + 1, col + 1))
        .unwrap_or((0, 0))
}

fn load_error(path: &Path, e: impl std::fmt::Display) -> LensError {
    LensError::Load(format!("{}: {}", path.display(), e))
}

fn load_formula_view(path: &Path) -> LensResult<(Vec<String>, HashMap<String, Range<Data>>)> {
    let mut workbook = open_workbook_auto(path).map_err(|e| load_error(path, e))?;
    let sheet_names = workbook.sheet_names().to_vec();

    let mut view = HashMap::with_capacity(sheet_names.len());
    for name in &sheet_names {
        let values = workbook
            .worksheet_range(name)
            .map_err(|e| load_error(path, e))?;
        let formulas = workbook
            .worksheet_formula(name)
            .map_err(|e| load_error(path, e))?;
        debug!(
            sheet = name.as_str(),
            cells = values.get_size().0 * values.get_size().1,
            "formula view loaded"
        );
        view.insert(name.clone(), formula_preserving(values, &formulas));
    }

    Ok((sheet_names, view))
}

fn load_value_view(path: &Path, sheet_names: &[String]) -> LensResult<HashMap<String, Range<Data>>> {
    let mut workbook = open_workbook_auto(path).map_err(|e| load_error(path, e))?;

    let mut view = HashMap::with_capacity(sheet_names.len());
    for name in sheet_names {
        let values = workbook
            .worksheet_range(name)
            .map_err(|e| load_error(path, e))?;
        debug!(sheet = name.as_str(), "value view loaded");
        view.insert(name.clone(), values);
    }

    Ok(view)
}

/// Overlay formula text on the literal values.
///
/// Cells with a formula hold `Data::String("=...")`; every other cell keeps
/// its literal value. The result covers the union of both grids.
fn formula_preserving(values: Range<Data>, formulas: &Range<String>) -> Range<Data> {
    let (Some(f_start), Some(f_end)) = (formulas.start(), formulas.end()) else {
        return values;
    };

    let (start, end) = match (values.start(), values.end()) {
        (Some(v_start), Some(v_end)) => (
            (v_start.0.min(f_start.0), v_start.1.min(f_start.1)),
            (v_end.0.max(f_end.0), v_end.1.max(f_end.1)),
        ),
        _ => (f_start, f_end),
    };

    let mut raw = Range::new(start, end);
    if let Some((row0, col0)) = values.start() {
        for (row, col, value) in values.used_cells() {
            raw.set_value((row0 + row as u32, col0 + col as u32), value.clone());
        }
    }
    for (row, col, formula) in formulas.used_cells() {
        if formula.is_empty() {
            continue;
        }
        // calamine strips the leading =
        let text = if formula.starts_with(FORMULA_MARKER) {
            formula.clone()
        } else {
            format!("{}{}", FORMULA_MARKER, formula)
        };
        raw.set_value((f_start.0 + row as u32, f_start.1 + col as u32), Data::String(text));
    }

    raw
}
