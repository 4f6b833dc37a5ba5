//! Tracker error types

use thiserror::Error;

/// Errors raised by tracker export and import
#[derive(Error, Debug)]
pub enum TrackerError {
    /// Export requested with no entries recorded
    #[error("No data to export yet")]
    NothingToExport,

    /// CSV file could not be read
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// A CSV row is missing a column or holds an unparseable value
    #[error("Row {row}: {message}")]
    InvalidRow { row: usize, message: String },

    /// I/O operation failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for tracker operations
pub type TrackerResult<T> = Result<T, TrackerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(
            TrackerError::NothingToExport.to_string(),
            "No data to export yet"
        );

        let err = TrackerError::InvalidRow {
            row: 3,
            message: "bad date".to_string(),
        };
        assert_eq!(err.to_string(), "Row 3: bad date");
    }
}
