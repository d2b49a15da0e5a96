//! Sheetlens - read-only Excel workbook inspector
//!
//! Loads a workbook twice, once keeping formula text and once keeping the
//! values Excel cached on last save, and answers questions about it without
//! ever recalculating a formula.
//!
//! # Features
//!
//! - Per-sheet extents, non-empty cell counts and formula counts
//! - Lazy row-major walk joining formula text with cached values
//! - Case-insensitive substring search over formulas
//! - Bounded preview of cached values
//! - Summary export to JSON or YAML
//!
//! # Example
//!
//! ```no_run
//! use royalbit_sheetlens::excel::WorkbookModel;
//!
//! let model = WorkbookModel::open("plan.xlsx")?;
//!
//! for summary in model.all_summaries()? {
//!     println!("{}: {} formulas", summary.title, summary.formula_count);
//! }
//!
//! for hit in model.find_formulas("vlookup")? {
//!     println!("{}!{} {:?}", hit.sheet, hit.address, hit.formula);
//! }
//! # Ok::<(), royalbit_sheetlens::error::LensError>(())
//! ```

pub mod cli;
pub mod error;
pub mod excel;
pub mod types;
pub mod writer;

// Re-export commonly used types
pub use error::{LensError, LensResult};
pub use excel::WorkbookModel;
pub use types::{CellRecord, CellValue, SheetSummary, WorkbookSummary, WorkbookTotals};
