//! Case-insensitive substring search over formula text

use crate::error::LensResult;
use crate::excel::workbook::WorkbookModel;
use crate::types::CellRecord;

impl WorkbookModel {
    /// Every formula-bearing cell whose formula contains `query`, ignoring case.
    ///
    /// An empty query matches all formulas. Results follow sheet order, then
    /// row, then column.
    pub fn find_formulas(&self, query: &str) -> LensResult<Vec<CellRecord>> {
        let needle = query.to_lowercase();
        let mut results = Vec::new();

        for name in self.sheet_names() {
            for record in self.cells(name)? {
                if let Some(formula) = &record.formula {
                    if needle.is_empty() || formula.to_lowercase().contains(&needle) {
                        results.push(record);
                    }
                }
            }
        }

        tracing::debug!(query, matches = results.len(), "formula search");
        Ok(results)
    }
}
