//! In-memory cursor for exercising the marshalling layer without a
//! driver.
//!
//! Available to this crate's own tests, and to downstream crates
//! behind the `test-utils` feature.

use crate::cursor::{ColumnType, Cursor, DriverError};
use crate::holder::ScanSlot;
use crate::value::CellValue;

/// A [`Cursor`] over a fixed, fully in-memory result set, with
/// optional fault injection for error-path tests.
#[derive(Debug, Default)]
pub struct MemoryCursor {
    columns: Vec<String>,
    types: Vec<ColumnType>,
    rows: Vec<Vec<CellValue>>,
    /// Index of the row `advance` will move to next.
    next: usize,
    current: Option<usize>,
    scans: usize,
    fail_columns: bool,
    fail_scan_at: Option<usize>,
    fail_advance_at: Option<usize>,
}

impl MemoryCursor {
    /// Build a cursor over `(name, declared type name)` columns and
    /// the given rows, each of which must have one cell per column.
    pub fn new(columns: &[(&str, &str)], rows: Vec<Vec<CellValue>>) -> Self {
        Self {
            columns: columns.iter().map(|(name, _)| name.to_string()).collect(),
            types: columns.iter().map(|(_, ty)| ColumnType::new(*ty)).collect(),
            rows,
            ..Self::default()
        }
    }

    /// Fail every `columns`/`column_types` call.
    pub fn fail_columns(mut self) -> Self {
        self.fail_columns = true;
        self
    }

    /// Fail the scan of row `row` (0-based).
    pub fn fail_scan_at(mut self, row: usize) -> Self {
        self.fail_scan_at = Some(row);
        self
    }

    /// Fail the advance that would reach row `row` (0-based).
    pub fn fail_advance_at(mut self, row: usize) -> Self {
        self.fail_advance_at = Some(row);
        self
    }

    /// Drop all but the first `keep` column types, simulating a driver
    /// whose type list disagrees with its column list.
    pub fn truncate_types(mut self, keep: usize) -> Self {
        self.types.truncate(keep);
        self
    }

    /// Number of scan calls served so far.
    pub fn scans(&self) -> usize {
        self.scans
    }
}

impl Cursor for MemoryCursor {
    fn columns(&mut self) -> Result<Vec<String>, DriverError> {
        if self.fail_columns {
            return Err("column enumeration failed".into());
        }
        Ok(self.columns.clone())
    }

    fn column_types(&mut self) -> Result<Vec<ColumnType>, DriverError> {
        if self.fail_columns {
            return Err("column enumeration failed".into());
        }
        Ok(self.types.clone())
    }

    fn advance(&mut self) -> Result<bool, DriverError> {
        if self.fail_advance_at == Some(self.next) {
            return Err("driver connection lost".into());
        }
        if self.next < self.rows.len() {
            self.current = Some(self.next);
            self.next += 1;
            Ok(true)
        } else {
            self.current = None;
            Ok(false)
        }
    }

    fn scan(&mut self, slots: &mut [ScanSlot<'_>]) -> Result<(), DriverError> {
        let row = self.current.ok_or("scan called before advance")?;
        if self.fail_scan_at == Some(row) {
            return Err("scan failed".into());
        }
        self.scans += 1;
        let cells = &self.rows[row];
        if slots.len() != cells.len() {
            return Err(format!(
                "positional scan expects {} slots, got {}",
                cells.len(),
                slots.len()
            )
            .into());
        }
        for (slot, cell) in slots.iter_mut().zip(cells.clone()) {
            slot.write(cell)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn test_advance_walks_rows_then_ends() {
        let mut cursor = MemoryCursor::new(
            &[("id", "INT")],
            vec![vec![CellValue::Int(1)], vec![CellValue::Int(2)]],
        );
        assert!(cursor.advance().unwrap());
        assert!(cursor.advance().unwrap());
        assert!(!cursor.advance().unwrap());
    }

    #[rstest]
    fn test_scan_before_advance_is_a_driver_error() {
        let mut cursor = MemoryCursor::new(&[("id", "INT")], vec![vec![CellValue::Int(1)]]);
        let mut cell = CellValue::Null;
        let mut slots = [ScanSlot::Cell(&mut cell)];
        assert!(cursor.scan(&mut slots).is_err());
    }

    #[rstest]
    fn test_scan_enforces_slot_count() {
        let mut cursor = MemoryCursor::new(
            &[("a", "INT"), ("b", "INT")],
            vec![vec![CellValue::Int(1), CellValue::Int(2)]],
        );
        cursor.advance().unwrap();
        let mut cell = CellValue::Null;
        let mut slots = [ScanSlot::Cell(&mut cell)];
        assert!(cursor.scan(&mut slots).is_err());
    }
}
