//! Data error types.

use thiserror::Error;

/// Errors raised while locating, reading or validating a dataset.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DataError {
    /// Dataset file does not exist
    #[error("File not found: {0}")]
    FileNotFound(String),

    /// Failed to read the file or parse CSV structure
    #[error("CSV error: {0}")]
    Csv(String),

    /// No column named `date` after alias resolution
    #[error("Missing 'date' column")]
    MissingDateColumn,

    /// A cell in the date column could not be parsed
    #[error("Invalid date at row {row}: '{value}'")]
    InvalidDate { row: usize, value: String },

    /// A cell in a data column is not a finite number
    #[error("Invalid value at row {row}, column '{column}': '{value}'")]
    InvalidValue {
        row: usize,
        column: String,
        value: String,
    },

    /// Dates must be strictly increasing
    #[error("Dates are not strictly increasing at row {row}")]
    UnorderedDates { row: usize },

    /// Only a date column was present
    #[error("No data columns besides 'date'")]
    NoDataColumns,

    /// Header present but no rows
    #[error("No data rows")]
    NoData,

    /// Dataset key is not part of the catalog
    #[error("Unknown dataset: {0}")]
    UnknownDataset(String),

    /// Two headers resolve to the same name
    #[error("Duplicate column: {0}")]
    DuplicateColumn(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl From<csv::Error> for DataError {
    fn from(err: csv::Error) -> Self {
        DataError::Csv(err.to_string())
    }
}
