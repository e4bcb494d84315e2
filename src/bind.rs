//! Typed record binding: row-to-struct mapping under two null
//! policies.
//!
//! Both binders drive the whole cursor iteration themselves and
//! return only fully materialized results. They differ in how SQL
//! NULL reaches the record:
//!
//! - [`bind_keep_raw`] scans straight into the record's fields and
//!   performs no substitution; nullability is whatever the field
//!   types model (use `Null*` field kinds for nullable columns).
//! - [`bind_collapse_null`] classifies every column's declared type
//!   up front, scans into nullable holders, and collapses NULL to
//!   each field's zero value.
//!
//! # Commit discipline
//!
//! Rows accumulate in a local buffer and are appended to the
//! destination only after the last row scanned cleanly. On any error
//! the destination is exactly as the caller passed it in.

use std::collections::{HashMap, HashSet};

use tracing::debug;

use crate::cursor::{advance_checked, Cursor};
use crate::error::RowError;
use crate::holder::{NullHolder, ScanSlot};
use crate::record::{FieldMut, Record};

/// Bind every remaining row to a fresh `R`, scanning column values
/// directly into same-named fields.
///
/// Columns without a matching field are scanned into an explicit
/// discard sink (the scan is positional, so every column must receive
/// a slot) and reported once at debug level. Field/column type
/// compatibility is enforced by the scan itself: an incompatible
/// pairing, including NULL against a non-nullable field kind, fails
/// the whole call.
pub fn bind_keep_raw<R: Record>(cursor: &mut dyn Cursor, dest: &mut Vec<R>) -> Result<(), RowError> {
    let columns = cursor
        .columns()
        .map_err(|source| RowError::Columns { source })?;
    log_unmatched::<R>(&columns, "keep-raw");

    let mut bound = Vec::new();
    while advance_checked(cursor, bound.len())? {
        let mut record = R::default();
        {
            let mut fields: HashMap<&'static str, FieldMut<'_>> =
                record.fields_mut().into_iter().collect();
            let mut slots: Vec<ScanSlot<'_>> = columns
                .iter()
                .map(|column| match fields.remove(column.as_str()) {
                    Some(field) => ScanSlot::Field(field),
                    None => ScanSlot::Discard,
                })
                .collect();
            cursor.scan(&mut slots).map_err(|source| RowError::Scan {
                row: bound.len(),
                source,
            })?;
        }
        bound.push(record);
    }
    dest.append(&mut bound);
    Ok(())
}

/// Bind every remaining row to a fresh `R`, collapsing NULL to each
/// field's zero value.
///
/// Setup classifies every column's declared database type into a
/// [`NullHolder`] before any row is read; a declared type outside the
/// recognized groups fails the call right there. Per row, the fixed
/// holder set is rescanned and values copy into same-named fields,
/// with the holder's kind driving the setter: NULL becomes the empty
/// string, 0, 0.0, false, the epoch timestamp, or `None` for nullable
/// field kinds. Columns without a matching field, and same-named
/// fields of a different kind, are skipped with a debug event.
pub fn bind_collapse_null<R: Record>(
    cursor: &mut dyn Cursor,
    dest: &mut Vec<R>,
) -> Result<(), RowError> {
    let columns = cursor
        .columns()
        .map_err(|source| RowError::Columns { source })?;
    let types = cursor
        .column_types()
        .map_err(|source| RowError::Columns { source })?;
    if types.len() != columns.len() {
        return Err(RowError::Columns {
            source: "column type list does not match column list".into(),
        });
    }
    log_unmatched::<R>(&columns, "collapse-null");

    // One holder per column, chosen once from the declared type name.
    let mut holders = Vec::with_capacity(columns.len());
    for (column, ty) in columns.iter().zip(&types) {
        let holder = NullHolder::for_type_name(ty.database_type_name()).ok_or_else(|| {
            RowError::UnsupportedColumnType {
                column: column.clone(),
                name: ty.database_type_name().to_string(),
            }
        })?;
        holders.push(holder);
    }

    let mut bound = Vec::new();
    while advance_checked(cursor, bound.len())? {
        {
            let mut slots: Vec<ScanSlot<'_>> =
                holders.iter_mut().map(ScanSlot::Nullable).collect();
            cursor.scan(&mut slots).map_err(|source| RowError::Scan {
                row: bound.len(),
                source,
            })?;
        }

        let mut record = R::default();
        {
            let mut fields: HashMap<&'static str, FieldMut<'_>> =
                record.fields_mut().into_iter().collect();
            for (column, holder) in columns.iter().zip(&holders) {
                let Some(field) = fields.remove(column.as_str()) else {
                    continue;
                };
                if !holder.collapse_into(field) {
                    debug!(
                        column = column.as_str(),
                        holder = holder.kind(),
                        "record field kind does not match column holder, skipping"
                    );
                }
            }
        }
        bound.push(record);
    }
    dest.append(&mut bound);
    Ok(())
}

/// Report, once per call, the columns that will never land in a field
/// because the record does not declare a matching name.
fn log_unmatched<R: Record>(columns: &[String], policy: &str) {
    let mut probe = R::default();
    let known: HashSet<&'static str> = probe
        .fields_mut()
        .into_iter()
        .map(|(name, _)| name)
        .collect();
    for column in columns {
        if !known.contains(column.as_str()) {
            debug!(
                column = column.as_str(),
                policy, "column has no matching record field, discarding"
            );
        }
    }
}
