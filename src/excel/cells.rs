//! Row-major walk over a sheet, joining formula text with cached values

use crate::excel::address::cell_address;
use crate::excel::workbook::FORMULA_MARKER;
use crate::types::{CellRecord, CellValue};
use calamine::{Data, Range};

/// Lazy iterator over the non-empty coordinates of one sheet.
///
/// Coordinates come from the formula view; the value at the same absolute
/// position is looked up in the value view. A coordinate empty in both
/// views is skipped.
#[derive(Debug, Clone)]
pub struct CellIter<'a> {
    sheet: &'a str,
    formulas: &'a Range<Data>,
    values: &'a Range<Data>,
    start_col: u32,
    end: (u32, u32),
    next_pos: Option<(u32, u32)>,
}

impl<'a> CellIter<'a> {
    pub(crate) fn new(sheet: &'a str, formulas: &'a Range<Data>, values: &'a Range<Data>) -> Self {
        let (start, end) = match (formulas.start(), formulas.end()) {
            (Some(start), Some(end)) => (Some(start), end),
            _ => (None, (0, 0)),
        };
        Self {
            sheet,
            formulas,
            values,
            start_col: start.map(|(_, col)| col).unwrap_or(0),
            end,
            next_pos: start,
        }
    }

    fn advance(&mut self, (row, col): (u32, u32)) {
        self.next_pos = if col < self.end.1 {
            Some((row, col + 1))
        } else if row < self.end.0 {
            Some((row + 1, self.start_col))
        } else {
            None
        };
    }
}

impl Iterator for CellIter<'_> {
    type Item = CellRecord;

    fn next(&mut self) -> Option<CellRecord> {
        loop {
            let pos = self.next_pos?;
            self.advance(pos);

            let formula = match self.formulas.get_value(pos) {
                Some(Data::String(s)) if s.starts_with(FORMULA_MARKER) => Some(s.clone()),
                _ => None,
            };
            let value = self
                .values
                .get_value(pos)
                .map(CellValue::from)
                .unwrap_or(CellValue::Empty);

            if !value.is_empty() || formula.is_some() {
                return Some(CellRecord {
                    sheet: self.sheet.to_string(),
                    address: cell_address(pos.0, pos.1),
                    value,
                    formula,
                });
            }
        }
    }
}
