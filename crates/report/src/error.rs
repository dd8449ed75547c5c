//! Report error types.

use data_facade::DataError;
use thiserror::Error;
use var_facade::VarError;

/// Errors raised while producing or exporting a forecast report.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ReportError {
    #[error(transparent)]
    Data(#[from] DataError),

    #[error(transparent)]
    Var(#[from] VarError),

    /// Chart rendering failed
    #[error("Chart error: {0}")]
    Chart(String),

    /// CSV export failed
    #[error("CSV export error: {0}")]
    Csv(String),
}

impl From<csv::Error> for ReportError {
    fn from(err: csv::Error) -> Self {
        ReportError::Csv(err.to_string())
    }
}

/// Result type for report operations.
pub type Result<T> = std::result::Result<T, ReportError>;
