//! Error module containing the data error type and result alias

mod data_error;

pub use data_error::DataError;

/// Result type for data operations.
pub type Result<T> = std::result::Result<T, DataError>;
