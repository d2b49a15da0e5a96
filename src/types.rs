use calamine::Data;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;

//==============================================================================
// Cell values
//==============================================================================

/// A cached cell value as last saved by the authoring spreadsheet tool.
///
/// Serializes untagged: JSON sees a bare scalar, `null` for `Empty` and an
/// ISO-8601 string for `DateTime`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CellValue {
    Empty,
    Int(i64),
    Float(f64),
    Text(String),
    Bool(bool),
    DateTime(NaiveDateTime),
    /// Excel error literal such as `#DIV/0!`
    Error(String),
}

impl CellValue {
    pub fn is_empty(&self) -> bool {
        matches!(self, CellValue::Empty)
    }
}

impl From<&Data> for CellValue {
    fn from(data: &Data) -> Self {
        match data {
            Data::Empty => CellValue::Empty,
            Data::Int(i) => CellValue::Int(*i),
            Data::Float(f) => CellValue::Float(*f),
            Data::String(s) => CellValue::Text(s.clone()),
            Data::Bool(b) => CellValue::Bool(*b),
            Data::DateTime(dt) => match dt.as_datetime() {
                Some(ndt) => CellValue::DateTime(ndt),
                None => CellValue::Float(dt.as_f64()),
            },
            Data::Error(e) => CellValue::Error(e.to_string()),
            // DateTimeIso / DurationIso are already text
            other => CellValue::Text(other.to_string()),
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Empty => Ok(()),
            CellValue::Int(i) => write!(f, "{}", i),
            CellValue::Float(n) => write!(f, "{}", n),
            CellValue::Text(s) => write!(f, "{}", s),
            CellValue::Bool(b) => write!(f, "{}", if *b { "TRUE" } else { "FALSE" }),
            CellValue::DateTime(dt) => write!(f, "{}", dt.format("%Y-%m-%d %H:%M:%S")),
            CellValue::Error(e) => write!(f, "{}", e),
        }
    }
}

//==============================================================================
// Query results
//==============================================================================

/// One coordinate of a sheet, joining the formula view and the cached-value view
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CellRecord {
    pub sheet: String,
    /// A1-style address, e.g. `B12`
    pub address: String,
    pub value: CellValue,
    /// Formula text including the leading `=`
    pub formula: Option<String>,
}

/// Per-sheet statistics, recomputed on every request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SheetSummary {
    pub title: String,
    pub max_row: u32,
    pub max_column: u32,
    pub nonempty_cells: usize,
    pub formula_count: usize,
}

/// Workbook-wide totals shown by the dashboard
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkbookTotals {
    pub sheets: usize,
    pub nonempty_cells: usize,
    pub formula_count: usize,
}

impl WorkbookTotals {
    pub fn from_summaries(summaries: &[SheetSummary]) -> Self {
        summaries.iter().fold(
            WorkbookTotals {
                sheets: summaries.len(),
                ..Default::default()
            },
            |mut acc, s| {
                acc.nonempty_cells += s.nonempty_cells;
                acc.formula_count += s.formula_count;
                acc
            },
        )
    }
}

/// The exported summary document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkbookSummary {
    pub workbook: String,
    pub sheets: Vec<SheetSummary>,
}
