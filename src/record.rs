//! Record binding seam: the field registry a caller's struct exposes.
//!
//! Column-to-field matching happens at runtime because the result
//! schema is only known at runtime. Instead of reflection, a record
//! declares its bindable fields explicitly through [`Record::fields_mut`],
//! and the binders match column names against those declarations
//! exactly and case-sensitively. Fields a record does not list simply
//! never receive column data.

use chrono::{DateTime, Utc};

use crate::holder::SlotError;
use crate::value::CellValue;

/// Mutable, typed access to one named record field.
///
/// The `Null*` kinds model nullable columns. Under null-opaque binding
/// they receive SQL NULL as `None`; scanning NULL into any other kind
/// is a scan error, since no substitution is performed there.
#[derive(Debug)]
pub enum FieldMut<'a> {
    Text(&'a mut String),
    Int(&'a mut i64),
    Float(&'a mut f64),
    Bool(&'a mut bool),
    Timestamp(&'a mut DateTime<Utc>),
    Bytes(&'a mut Vec<u8>),
    NullText(&'a mut Option<String>),
    NullInt(&'a mut Option<i64>),
    NullFloat(&'a mut Option<f64>),
    NullBool(&'a mut Option<bool>),
    NullTimestamp(&'a mut Option<DateTime<Utc>>),
}

impl FieldMut<'_> {
    /// Short name for this field's kind, used in diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Text(_) => "text",
            Self::Int(_) => "integer",
            Self::Float(_) => "float",
            Self::Bool(_) => "boolean",
            Self::Timestamp(_) => "timestamp",
            Self::Bytes(_) => "bytes",
            Self::NullText(_) => "nullable text",
            Self::NullInt(_) => "nullable integer",
            Self::NullFloat(_) => "nullable float",
            Self::NullBool(_) => "nullable boolean",
            Self::NullTimestamp(_) => "nullable timestamp",
        }
    }

    /// Write one scanned cell directly into the underlying field.
    ///
    /// Compatibility is enforced here: a cell the field cannot
    /// represent fails with [`SlotError::Incompatible`], and NULL
    /// into a non-nullable kind fails with
    /// [`SlotError::NullIntoScalar`].
    pub(crate) fn write(&mut self, cell: CellValue) -> Result<(), SlotError> {
        if cell.is_null() {
            return match self {
                Self::NullText(f) => {
                    **f = None;
                    Ok(())
                }
                Self::NullInt(f) => {
                    **f = None;
                    Ok(())
                }
                Self::NullFloat(f) => {
                    **f = None;
                    Ok(())
                }
                Self::NullBool(f) => {
                    **f = None;
                    Ok(())
                }
                Self::NullTimestamp(f) => {
                    **f = None;
                    Ok(())
                }
                other => Err(SlotError::NullIntoScalar { want: other.kind() }),
            };
        }
        match (self, cell) {
            (Self::Text(f), CellValue::Text(s)) => **f = s,
            (Self::Text(f), CellValue::Bytes(b)) => **f = String::from_utf8_lossy(&b).into_owned(),
            (Self::Int(f), CellValue::Int(i)) => **f = i,
            (Self::Int(f), CellValue::Uint(u)) => {
                **f = i64::try_from(u).map_err(|_| SlotError::Incompatible {
                    got: "out-of-range unsigned integer".to_string(),
                    want: "integer",
                })?
            }
            (Self::Float(f), CellValue::Float(x)) => **f = x,
            (Self::Float(f), CellValue::Int(i)) => **f = i as f64,
            (Self::Float(f), CellValue::Uint(u)) => **f = u as f64,
            (Self::Bool(f), CellValue::Bool(b)) => **f = b,
            (Self::Bool(f), CellValue::Int(i)) if i == 0 || i == 1 => **f = i == 1,
            (Self::Bool(f), CellValue::Uint(u)) if u <= 1 => **f = u == 1,
            (Self::Timestamp(f), CellValue::Timestamp(t)) => **f = t,
            (Self::Bytes(f), CellValue::Bytes(b)) => **f = b,
            (Self::Bytes(f), CellValue::Text(s)) => **f = s.into_bytes(),
            (Self::NullText(f), CellValue::Text(s)) => **f = Some(s),
            (Self::NullText(f), CellValue::Bytes(b)) => {
                **f = Some(String::from_utf8_lossy(&b).into_owned())
            }
            (Self::NullInt(f), CellValue::Int(i)) => **f = Some(i),
            (Self::NullInt(f), CellValue::Uint(u)) => {
                **f = Some(i64::try_from(u).map_err(|_| SlotError::Incompatible {
                    got: "out-of-range unsigned integer".to_string(),
                    want: "nullable integer",
                })?)
            }
            (Self::NullFloat(f), CellValue::Float(x)) => **f = Some(x),
            (Self::NullFloat(f), CellValue::Int(i)) => **f = Some(i as f64),
            (Self::NullFloat(f), CellValue::Uint(u)) => **f = Some(u as f64),
            (Self::NullBool(f), CellValue::Bool(b)) => **f = Some(b),
            (Self::NullBool(f), CellValue::Int(i)) if i == 0 || i == 1 => **f = Some(i == 1),
            (Self::NullBool(f), CellValue::Uint(u)) if u <= 1 => **f = Some(u == 1),
            (Self::NullTimestamp(f), CellValue::Timestamp(t)) => **f = Some(t),
            (field, cell) => {
                return Err(SlotError::Incompatible {
                    got: cell.kind().to_string(),
                    want: field.kind(),
                });
            }
        }
        Ok(())
    }
}

/// A caller-defined struct that rows can be bound into.
///
/// `fields_mut` is the explicit field registry: every bindable field
/// appears once, under the exact name the matching column must carry.
///
/// # Example
///
/// ```
/// use rowbind::{FieldMut, Record};
///
/// #[derive(Debug, Default)]
/// struct User {
///     id: i64,
///     name: String,
///     active: bool,
/// }
///
/// impl Record for User {
///     fn fields_mut(&mut self) -> Vec<(&'static str, FieldMut<'_>)> {
///         vec![
///             ("id", FieldMut::Int(&mut self.id)),
///             ("name", FieldMut::Text(&mut self.name)),
///             ("active", FieldMut::Bool(&mut self.active)),
///         ]
///     }
/// }
/// ```
pub trait Record: Default {
    /// Expose every bindable field as a named, typed slot.
    fn fields_mut(&mut self) -> Vec<(&'static str, FieldMut<'_>)>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn test_null_into_scalar_field_is_an_error() {
        let mut id = 0i64;
        let err = FieldMut::Int(&mut id).write(CellValue::Null).unwrap_err();
        assert_eq!(err.to_string(), "Cannot scan NULL into non-nullable integer field");
    }

    #[rstest]
    fn test_null_into_nullable_field_is_none() {
        let mut name = Some("stale".to_string());
        FieldMut::NullText(&mut name).write(CellValue::Null).unwrap();
        assert_eq!(name, None);
    }

    #[rstest]
    fn test_direct_write_sets_matching_kind() {
        let mut name = String::new();
        FieldMut::Text(&mut name)
            .write(CellValue::Text("alice".to_string()))
            .unwrap();
        assert_eq!(name, "alice");
    }

    #[rstest]
    fn test_int_widens_into_float_field() {
        let mut score = 0.0f64;
        FieldMut::Float(&mut score).write(CellValue::Int(3)).unwrap();
        assert_eq!(score, 3.0);
    }

    #[rstest]
    fn test_bool_field_accepts_zero_one_only() {
        let mut active = false;
        FieldMut::Bool(&mut active).write(CellValue::Int(1)).unwrap();
        assert!(active);
        let err = FieldMut::Bool(&mut active).write(CellValue::Int(2)).unwrap_err();
        assert!(matches!(err, SlotError::Incompatible { .. }));
    }

    #[rstest]
    fn test_incompatible_pairing_names_both_sides() {
        let mut id = 0i64;
        let err = FieldMut::Int(&mut id)
            .write(CellValue::Text("seven".to_string()))
            .unwrap_err();
        assert_eq!(err.to_string(), "Cannot scan text value into integer holder");
    }

    #[rstest]
    fn test_text_field_accepts_raw_bytes() {
        let mut body = String::new();
        FieldMut::Text(&mut body)
            .write(CellValue::Bytes(b"hello".to_vec()))
            .unwrap();
        assert_eq!(body, "hello");
    }
}
