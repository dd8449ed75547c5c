//! Error module containing the VAR error type and result alias

mod var_error;

pub use var_error::VarError;

/// Result type for VAR operations.
pub type Result<T> = std::result::Result<T, VarError>;
