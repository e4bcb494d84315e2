//! Row marshalling for driver result sets.
//!
//! This crate turns the rows behind an executing query cursor into
//! in-memory shapes application code can use: column-name keyed maps
//! (textual or binary) and caller-defined typed records. It owns the
//! whole iteration for each call and returns fully materialized
//! results; statement execution, connections, and SQL stay behind the
//! [`Cursor`] trait.
//!
//! # Architecture
//!
//! Drivers report cell types only at runtime, so all marshalling runs
//! through [`CellValue`], a closed tagged variant, and [`ScanSlot`],
//! the writable holders a positional scan fills. Four entry points
//! cover the two output shapes and, for records, the two NULL
//! policies:
//!
//! - [`rows_to_string_maps`] / [`rows_to_byte_maps`]: every cell in
//!   canonical text or byte form, NULL as the empty value.
//! - [`bind_keep_raw`]: scans straight into record fields, leaving
//!   nullability to the field types.
//! - [`bind_collapse_null`]: classifies declared column types into
//!   nullable holders up front and collapses NULL to zero values.
//!
//! Every call is all-or-nothing: an error returns the destination and
//! result exactly as they were, never a partial row set.

pub mod bind;
pub mod convert;
pub mod cursor;
pub mod error;
pub mod holder;
pub mod maps;
pub mod record;
pub mod value;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use bind::{bind_collapse_null, bind_keep_raw};
pub use cursor::{ColumnType, Cursor, DriverError};
pub use error::RowError;
pub use holder::{NullHolder, ScanSlot, SlotError};
pub use maps::{rows_to_byte_maps, rows_to_string_maps};
pub use record::{FieldMut, Record};
pub use value::CellValue;
