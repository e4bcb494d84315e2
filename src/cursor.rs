//! Cursor seam to the query-execution layer.
//!
//! This module defines the narrow interface the marshalling layer
//! requires from a driver: ordered column names, declared column
//! types, row advancement, and a positional scan into caller-supplied
//! slots. Everything else about statement execution (connections,
//! SQL, pooling, transactions) stays on the driver's side of this
//! trait.
//!
//! # Architecture
//!
//! Drivers report values with runtime-only types, so scanning is
//! mediated by [`ScanSlot`]: the driver produces one [`CellValue`] per
//! column and delivers it with [`ScanSlot::write`], which enforces
//! whatever typing the slot's owner chose. A cursor is exclusively
//! borrowed for the whole duration of an entry operation and is not
//! reentrant.

use crate::error::RowError;
use crate::holder::ScanSlot;

/// Boxed error type drivers use to report failures across the cursor
/// boundary.
pub type DriverError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Declared database type of one result column.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct ColumnType {
    name: String,
}

impl ColumnType {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// The driver-reported database type name, e.g. "INT" or
    /// "VARCHAR".
    pub fn database_type_name(&self) -> &str {
        &self.name
    }
}

/// Live handle over an executing query's result stream, advanced row
/// by row.
pub trait Cursor {
    /// Ordered result column names, unique within a row. Called once
    /// per entry operation.
    fn columns(&mut self) -> Result<Vec<String>, DriverError>;

    /// Declared database types, ordered parallel to
    /// [`columns`](Cursor::columns). Only null-aware binding needs
    /// this.
    fn column_types(&mut self) -> Result<Vec<ColumnType>, DriverError>;

    /// Advance to the next row. `Ok(false)` is end-of-results; an
    /// `Err` is a mid-iteration driver failure.
    fn advance(&mut self) -> Result<bool, DriverError>;

    /// Scan the current row into `slots`, exactly one per column in
    /// column order. Implementations deliver one [`CellValue`] per
    /// column via [`ScanSlot::write`] and propagate any slot error.
    ///
    /// [`CellValue`]: crate::CellValue
    fn scan(&mut self, slots: &mut [ScanSlot<'_>]) -> Result<(), DriverError>;
}

/// Advance `cursor`, mapping a driver failure onto the row index it
/// prevented from being read.
pub(crate) fn advance_checked(cursor: &mut dyn Cursor, row: usize) -> Result<bool, RowError> {
    cursor
        .advance()
        .map_err(|source| RowError::Advance { row, source })
}
