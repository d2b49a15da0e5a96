//! Read-only Excel workbook model
//!
//! A workbook is loaded in two views:
//! - Formula view: formula text (with leading `=`) where a cell has one,
//!   the literal value otherwise
//! - Value view: the values Excel cached on last save
//!
//! Nothing here evaluates formulas.

mod address;
mod cells;
mod search;
mod workbook;

pub use address::{cell_address, column_letter};
pub use cells::CellIter;
pub use workbook::{WorkbookModel, DEFAULT_PREVIEW_COLS, DEFAULT_PREVIEW_ROWS, FORMULA_MARKER};
