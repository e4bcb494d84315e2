//! Dynamically typed cell values produced by a driver scan.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// One scanned column value, as reported by the driver at runtime.
///
/// The set of kinds is closed. Anything a driver cannot express as one
/// of the listed variants travels as [`CellValue::Unsupported`] carrying
/// the driver's name for the type, so a new driver value kind surfaces
/// as an explicit conversion failure instead of a silent gap.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum CellValue {
    Int(i64),
    Uint(u64),
    Float(f64),
    Bool(bool),
    /// Complex value, kept as its two components.
    Complex { re: f64, im: f64 },
    Text(String),
    Bytes(Vec<u8>),
    Timestamp(DateTime<Utc>),
    /// SQL NULL.
    Null,
    /// A driver value with no defined conversion, named after the
    /// driver's type so errors can point at the offender.
    Unsupported(String),
}

impl CellValue {
    /// Short name for this value's kind, used in error messages and
    /// mismatch diagnostics.
    pub fn kind(&self) -> &str {
        match self {
            Self::Int(_) => "integer",
            Self::Uint(_) => "unsigned integer",
            Self::Float(_) => "float",
            Self::Bool(_) => "boolean",
            Self::Complex { .. } => "complex",
            Self::Text(_) => "text",
            Self::Bytes(_) => "bytes",
            Self::Timestamp(_) => "timestamp",
            Self::Null => "null",
            Self::Unsupported(name) => name,
        }
    }

    /// True when this cell is SQL NULL.
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }
}

impl From<i64> for CellValue {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<u64> for CellValue {
    fn from(v: u64) -> Self {
        Self::Uint(v)
    }
}

impl From<f64> for CellValue {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<bool> for CellValue {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<&str> for CellValue {
    fn from(v: &str) -> Self {
        Self::Text(v.to_string())
    }
}

impl From<String> for CellValue {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

impl From<Vec<u8>> for CellValue {
    fn from(v: Vec<u8>) -> Self {
        Self::Bytes(v)
    }
}

impl From<DateTime<Utc>> for CellValue {
    fn from(v: DateTime<Utc>) -> Self {
        Self::Timestamp(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn test_kind_names_are_stable() {
        assert_eq!(CellValue::Int(1).kind(), "integer");
        assert_eq!(CellValue::Uint(1).kind(), "unsigned integer");
        assert_eq!(CellValue::Null.kind(), "null");
        assert_eq!(CellValue::Bytes(vec![1]).kind(), "bytes");
    }

    #[rstest]
    fn test_unsupported_kind_carries_driver_name() {
        let cell = CellValue::Unsupported("GEOMETRY".to_string());
        assert_eq!(cell.kind(), "GEOMETRY");
    }

    #[rstest]
    fn test_is_null_only_for_null() {
        assert!(CellValue::Null.is_null());
        assert!(!CellValue::Int(0).is_null());
        assert!(!CellValue::Text(String::new()).is_null());
    }

    #[rstest]
    fn test_from_conversions() {
        assert_eq!(CellValue::from(7i64), CellValue::Int(7));
        assert_eq!(CellValue::from("alice"), CellValue::Text("alice".to_string()));
        assert_eq!(CellValue::from(vec![0u8]), CellValue::Bytes(vec![0]));
    }
}
