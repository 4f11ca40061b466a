//! Error types for schedule loading and event building

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Result type alias for classcal core operations
pub type Result<T> = std::result::Result<T, ClasscalError>;

/// Error type for schedule loading and event building
#[derive(Error, Debug)]
pub enum ClasscalError {
    /// Failed to open the schedule file
    #[error("Failed to read schedule file {path}: {source}")]
    Io {
        /// Path to the file that failed to open
        path: PathBuf,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// The CSV reader rejected the input
    #[error("Malformed schedule table: {0}")]
    Csv(#[from] csv::Error),

    /// A required column is absent from the header row
    #[error("Schedule table has no \"{column}\" column")]
    MissingColumn {
        /// Header name that was expected
        column: &'static str,
    },

    /// A kept row carries a start date that is not `month/day/year`
    #[error("Row {row}: cannot parse start date {value:?} (expected month/day/four-digit year)")]
    DateParse {
        /// 1-based data row (header excluded)
        row: usize,
        /// Raw cell value
        value: String,
        /// Underlying chrono error, absent when the year is not four digits
        source: Option<chrono::ParseError>,
    },

    /// Period number outside 1..=7
    #[error("Period {0} is out of range (expected 1-7)")]
    InvalidPeriod(u8),

    /// Clock time literal that is not `h:mm[:ss] AM|PM`
    #[error("Invalid clock time {value:?} (expected e.g. \"7:30:00 AM\")")]
    InvalidClockTime {
        /// Raw value
        value: String,
    },

    /// Period table that does not have seven well-ordered slots
    #[error("Invalid period table: {message}")]
    InvalidPeriodTable {
        /// What is wrong with the table
        message: String,
    },
}

impl ClasscalError {
    /// Create an I/O error for a schedule file
    #[inline]
    #[must_use = "returns ClasscalError for file read failures"]
    pub fn io<P: AsRef<Path>>(path: P, source: std::io::Error) -> Self {
        Self::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Create an invalid period table error
    #[inline]
    #[must_use = "returns ClasscalError for invalid period tables"]
    pub fn invalid_table(message: impl Into<String>) -> Self {
        Self::InvalidPeriodTable {
            message: message.into(),
        }
    }
}
