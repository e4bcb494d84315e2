//! Map collection: whole result sets as column-name keyed mappings.

use std::collections::HashMap;

use crate::convert;
use crate::cursor::{advance_checked, Cursor};
use crate::error::RowError;
use crate::holder::ScanSlot;
use crate::value::CellValue;

/// Collect every remaining row as a map of column name to canonical
/// text. NULL cells become empty strings.
pub fn rows_to_string_maps(
    cursor: &mut dyn Cursor,
) -> Result<Vec<HashMap<String, String>>, RowError> {
    collect(cursor, convert::to_text)
}

/// Collect every remaining row as a map of column name to canonical
/// bytes. NULL cells become empty byte vectors.
pub fn rows_to_byte_maps(
    cursor: &mut dyn Cursor,
) -> Result<Vec<HashMap<String, Vec<u8>>>, RowError> {
    collect(cursor, convert::to_bytes)
}

/// Shared collection loop. The call fails atomically: any
/// enumeration, advance, scan, or conversion error discards rows
/// already collected.
fn collect<T, F>(cursor: &mut dyn Cursor, to_value: F) -> Result<Vec<HashMap<String, T>>, RowError>
where
    T: Default,
    F: Fn(&CellValue) -> Result<T, RowError>,
{
    let fields = cursor
        .columns()
        .map_err(|source| RowError::Columns { source })?;

    let mut results = Vec::new();
    while advance_checked(cursor, results.len())? {
        let mut cells = vec![CellValue::Null; fields.len()];
        {
            let mut slots: Vec<ScanSlot<'_>> = cells.iter_mut().map(ScanSlot::Cell).collect();
            cursor.scan(&mut slots).map_err(|source| RowError::Scan {
                row: results.len(),
                source,
            })?;
        }

        let mut row = HashMap::with_capacity(fields.len());
        for (name, cell) in fields.iter().zip(&cells) {
            let value = if cell.is_null() {
                T::default()
            } else {
                to_value(cell)?
            };
            row.insert(name.clone(), value);
        }
        results.push(row);
    }
    Ok(results)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    use crate::test_utils::MemoryCursor;

    fn users_cursor() -> MemoryCursor {
        MemoryCursor::new(
            &[("id", "INT"), ("name", "VARCHAR"), ("active", "BIT")],
            vec![
                vec![CellValue::Int(7), CellValue::from("alice"), CellValue::Null],
                vec![CellValue::Int(8), CellValue::from("bob"), CellValue::Bool(true)],
            ],
        )
    }

    #[rstest]
    fn test_string_maps_with_null_as_empty() {
        let mut cursor = users_cursor();
        let rows = rows_to_string_maps(&mut cursor).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0]["id"], "7");
        assert_eq!(rows[0]["name"], "alice");
        assert_eq!(rows[0]["active"], "");
        assert_eq!(rows[1]["active"], "true");
    }

    #[rstest]
    fn test_byte_maps_with_null_as_empty() {
        let mut cursor = users_cursor();
        let rows = rows_to_byte_maps(&mut cursor).unwrap();
        assert_eq!(rows[0]["id"], b"7".to_vec());
        assert_eq!(rows[0]["active"], Vec::<u8>::new());
    }

    #[rstest]
    fn test_byte_maps_keep_raw_binary() {
        let raw = vec![0xff, 0xfe, 0x00];
        let mut cursor = MemoryCursor::new(
            &[("payload", "BINARY")],
            vec![vec![CellValue::Bytes(raw.clone())]],
        );
        let rows = rows_to_byte_maps(&mut cursor).unwrap();
        assert_eq!(rows[0]["payload"], raw);
    }

    #[rstest]
    fn test_empty_result_set_yields_empty_collection() {
        let mut cursor = MemoryCursor::new(&[("id", "INT")], vec![]);
        assert!(rows_to_string_maps(&mut cursor).unwrap().is_empty());
    }

    #[rstest]
    fn test_column_enumeration_failure_aborts() {
        let mut cursor = users_cursor().fail_columns();
        let err = rows_to_string_maps(&mut cursor).unwrap_err();
        assert!(matches!(err, RowError::Columns { .. }));
    }

    #[rstest]
    fn test_scan_failure_discards_prior_rows() {
        let mut cursor = users_cursor().fail_scan_at(1);
        let err = rows_to_string_maps(&mut cursor).unwrap_err();
        assert!(matches!(err, RowError::Scan { row: 1, .. }));
    }

    #[rstest]
    fn test_advance_failure_discards_prior_rows() {
        let mut cursor = users_cursor().fail_advance_at(1);
        let err = rows_to_string_maps(&mut cursor).unwrap_err();
        assert!(matches!(err, RowError::Advance { row: 1, .. }));
    }

    #[rstest]
    fn test_unsupported_cell_fails_whole_call() {
        let mut cursor = MemoryCursor::new(
            &[("shape", "TEXT")],
            vec![vec![CellValue::Unsupported("GEOMETRY".to_string())]],
        );
        let err = rows_to_string_maps(&mut cursor).unwrap_err();
        assert!(matches!(err, RowError::UnsupportedType { .. }));
    }

    #[rstest]
    fn test_row_order_is_preserved() {
        let mut cursor = MemoryCursor::new(
            &[("n", "INT")],
            (0..5).map(|n| vec![CellValue::Int(n)]).collect(),
        );
        let rows = rows_to_string_maps(&mut cursor).unwrap();
        let got: Vec<_> = rows.iter().map(|r| r["n"].clone()).collect();
        assert_eq!(got, ["0", "1", "2", "3", "4"]);
    }
}
