//! Scan slots and per-column null holders.
//!
//! A scan is strictly positional: every column of the current row is
//! written into exactly one [`ScanSlot`], whatever its fate. Columns
//! nobody wants still get a slot, the explicit [`ScanSlot::Discard`]
//! sink, which keeps the one-slot-per-column invariant visible at the
//! type level instead of hiding it behind an optional check.

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::record::FieldMut;
use crate::value::CellValue;

/// A scanned cell was delivered to a slot that cannot accept it.
#[derive(Error, Debug)]
pub enum SlotError {
    #[error("Cannot scan {got} value into {want} holder")]
    Incompatible { got: String, want: &'static str },

    #[error("Cannot scan NULL into non-nullable {want} field")]
    NullIntoScalar { want: &'static str },
}

/// A writable slot that receives one column's value during a row scan.
#[derive(Debug)]
pub enum ScanSlot<'a> {
    /// Generic holder: stores any cell verbatim.
    Cell(&'a mut CellValue),
    /// Pre-classified nullable holder, overwritten on every row.
    Nullable(&'a mut NullHolder),
    /// Direct target on a record field.
    Field(FieldMut<'a>),
    /// Explicit throwaway sink for columns with no destination.
    Discard,
}

impl ScanSlot<'_> {
    /// Deliver one scanned cell into this slot.
    pub fn write(&mut self, cell: CellValue) -> Result<(), SlotError> {
        match self {
            Self::Cell(target) => {
                **target = cell;
                Ok(())
            }
            Self::Nullable(holder) => holder.write(cell),
            Self::Field(field) => field.write(cell),
            Self::Discard => Ok(()),
        }
    }
}

/// Per-column scan holder for null-aware binding: nullable wrappers
/// for the scalar kinds plus a raw byte buffer for BINARY columns.
///
/// One holder is chosen per column at setup, from the declared
/// database type name, and the same holder is rescanned on every row.
#[derive(Debug, Clone, PartialEq)]
pub enum NullHolder {
    Text(Option<String>),
    Int(Option<i64>),
    Float(Option<f64>),
    Bool(Option<bool>),
    Timestamp(Option<DateTime<Utc>>),
    Bytes(Vec<u8>),
}

impl NullHolder {
    /// Select the holder for a declared database type name, or `None`
    /// when the name has no defined mapping.
    pub fn for_type_name(name: &str) -> Option<Self> {
        match name {
            "NVARCHAR" | "VARCHAR" | "CHAR" | "NCHAR" | "TEXT" => Some(Self::Text(None)),
            "INT" | "BIGINT" => Some(Self::Int(None)),
            "BIT" => Some(Self::Bool(None)),
            "FLOAT" | "DECIMAL" => Some(Self::Float(None)),
            "DATETIME" | "DATETIME2" => Some(Self::Timestamp(None)),
            "BINARY" => Some(Self::Bytes(Vec::new())),
            _ => None,
        }
    }

    /// Short name for this holder's kind, used in diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Text(_) => "nullable text",
            Self::Int(_) => "nullable integer",
            Self::Float(_) => "nullable float",
            Self::Bool(_) => "nullable boolean",
            Self::Timestamp(_) => "nullable timestamp",
            Self::Bytes(_) => "binary",
        }
    }

    pub(crate) fn write(&mut self, cell: CellValue) -> Result<(), SlotError> {
        if cell.is_null() {
            match self {
                Self::Text(v) => *v = None,
                Self::Int(v) => *v = None,
                Self::Float(v) => *v = None,
                Self::Bool(v) => *v = None,
                Self::Timestamp(v) => *v = None,
                Self::Bytes(v) => v.clear(),
            }
            return Ok(());
        }
        match (self, cell) {
            (Self::Text(v), CellValue::Text(s)) => *v = Some(s),
            (Self::Text(v), CellValue::Bytes(b)) => {
                *v = Some(String::from_utf8_lossy(&b).into_owned())
            }
            (Self::Int(v), CellValue::Int(i)) => *v = Some(i),
            (Self::Int(v), CellValue::Uint(u)) => {
                *v = Some(i64::try_from(u).map_err(|_| SlotError::Incompatible {
                    got: "out-of-range unsigned integer".to_string(),
                    want: "nullable integer",
                })?)
            }
            (Self::Float(v), CellValue::Float(f)) => *v = Some(f),
            (Self::Float(v), CellValue::Int(i)) => *v = Some(i as f64),
            (Self::Float(v), CellValue::Uint(u)) => *v = Some(u as f64),
            (Self::Bool(v), CellValue::Bool(b)) => *v = Some(b),
            // BIT columns commonly arrive as 0/1 integers or a single
            // raw byte, depending on the driver.
            (Self::Bool(v), CellValue::Int(i)) => *v = Some(i != 0),
            (Self::Bool(v), CellValue::Uint(u)) => *v = Some(u != 0),
            (Self::Bool(v), CellValue::Bytes(b)) if b.len() == 1 => *v = Some(b[0] != 0),
            (Self::Timestamp(v), CellValue::Timestamp(t)) => *v = Some(t),
            (Self::Bytes(v), CellValue::Bytes(b)) => *v = b,
            (Self::Bytes(v), CellValue::Text(s)) => *v = s.into_bytes(),
            (holder, cell) => {
                return Err(SlotError::Incompatible {
                    got: cell.kind().to_string(),
                    want: holder.kind(),
                });
            }
        }
        Ok(())
    }

    /// Copy this holder's value into `field`, collapsing NULL to the
    /// field's zero value (empty string, 0, 0.0, false, the epoch
    /// timestamp, or `None` for nullable field kinds).
    ///
    /// Returns false when the field's kind does not match this holder;
    /// the field is left untouched.
    pub(crate) fn collapse_into(&self, field: FieldMut<'_>) -> bool {
        match (self, field) {
            (Self::Text(v), FieldMut::Text(f)) => *f = v.clone().unwrap_or_default(),
            (Self::Text(v), FieldMut::NullText(f)) => *f = v.clone(),
            (Self::Int(v), FieldMut::Int(f)) => *f = v.unwrap_or(0),
            (Self::Int(v), FieldMut::NullInt(f)) => *f = *v,
            (Self::Float(v), FieldMut::Float(f)) => *f = v.unwrap_or(0.0),
            (Self::Float(v), FieldMut::NullFloat(f)) => *f = *v,
            (Self::Bool(v), FieldMut::Bool(f)) => *f = v.unwrap_or(false),
            (Self::Bool(v), FieldMut::NullBool(f)) => *f = *v,
            (Self::Timestamp(v), FieldMut::Timestamp(f)) => *f = v.unwrap_or_default(),
            (Self::Timestamp(v), FieldMut::NullTimestamp(f)) => *f = *v,
            (Self::Bytes(v), FieldMut::Bytes(f)) => *f = v.clone(),
            _ => return false,
        }
        true
    }
}
