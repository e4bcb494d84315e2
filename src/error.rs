//! Error taxonomy for the marshalling layer.

use thiserror::Error;

use crate::cursor::DriverError;

/// Errors returned by the map collectors and record binders.
///
/// Every failure is fatal for the call that produced it: no entry
/// point returns a non-empty partial result alongside an error. The
/// only deliberately non-erroring path is the discard sink for
/// columns without a matching record field, which is logged at debug
/// level instead.
#[derive(Error, Debug)]
pub enum RowError {
    #[error("Failed to enumerate result columns: {source}")]
    Columns { source: DriverError },

    #[error("Cursor failed to advance to row {row}: {source}")]
    Advance { row: usize, source: DriverError },

    #[error("Failed to scan row {row}: {source}")]
    Scan { row: usize, source: DriverError },

    #[error("Unsupported value type '{name}'")]
    UnsupportedType { name: String },

    #[error("Unsupported column type '{name}' for column '{column}'")]
    UnsupportedColumnType { column: String, name: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn test_unsupported_type_names_the_offender() {
        let err = RowError::UnsupportedType {
            name: "GEOMETRY".to_string(),
        };
        assert_eq!(err.to_string(), "Unsupported value type 'GEOMETRY'");
    }

    #[rstest]
    fn test_unsupported_column_type_names_column_and_type() {
        let err = RowError::UnsupportedColumnType {
            column: "payload".to_string(),
            name: "XML".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Unsupported column type 'XML' for column 'payload'"
        );
    }

    #[rstest]
    fn test_scan_error_reports_row_index() {
        let err = RowError::Scan {
            row: 3,
            source: "driver went away".into(),
        };
        assert_eq!(err.to_string(), "Failed to scan row 3: driver went away");
    }
}
