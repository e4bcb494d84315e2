//! Canonical textual and byte forms for scanned cells.
//!
//! Every non-null cell reduces to a single deterministic string, and
//! to its byte encoding. Numeric formatting is the shortest decimal
//! form that round-trips (for floats, back to the same 64-bit value),
//! timestamps use RFC 3339 with nanosecond precision, and a byte
//! sequence of exactly one NUL byte is rewritten to the literal "0":
//! some drivers surface a false single-byte BIT column that way.

use chrono::SecondsFormat;

use crate::error::RowError;
use crate::value::CellValue;

/// Convert one scanned cell to its canonical text form.
///
/// NULL converts to the empty string. [`CellValue::Unsupported`] fails
/// with [`RowError::UnsupportedType`] naming the driver's type; no
/// best-effort output is produced. Byte sequences are decoded as
/// UTF-8, lossily; use [`to_bytes`] to keep raw bytes intact.
pub fn to_text(cell: &CellValue) -> Result<String, RowError> {
    match cell {
        CellValue::Int(i) => Ok(i.to_string()),
        CellValue::Uint(u) => Ok(u.to_string()),
        CellValue::Float(f) => Ok(f.to_string()),
        CellValue::Bool(b) => Ok(b.to_string()),
        CellValue::Complex { re, im } => Ok(format!("({re}{im:+}i)")),
        CellValue::Text(s) => Ok(s.clone()),
        CellValue::Bytes(b) if b.len() == 1 && b[0] == 0 => Ok("0".to_string()),
        CellValue::Bytes(b) => Ok(String::from_utf8_lossy(b).into_owned()),
        CellValue::Timestamp(ts) => Ok(ts.to_rfc3339_opts(SecondsFormat::AutoSi, true)),
        CellValue::Null => Ok(String::new()),
        CellValue::Unsupported(name) => Err(RowError::UnsupportedType { name: name.clone() }),
    }
}

/// Convert one scanned cell to its canonical byte form.
///
/// Same contract as [`to_text`], except byte-sequence cells pass
/// through verbatim (no UTF-8 transcoding), still honoring the
/// single-NUL-byte rewrite.
pub fn to_bytes(cell: &CellValue) -> Result<Vec<u8>, RowError> {
    match cell {
        CellValue::Bytes(b) if b.len() == 1 && b[0] == 0 => Ok(b"0".to_vec()),
        CellValue::Bytes(b) => Ok(b.clone()),
        other => to_text(other).map(String::into_bytes),
    }
}
