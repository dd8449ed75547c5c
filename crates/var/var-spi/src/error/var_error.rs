//! VAR error types

use thiserror::Error;

/// Errors that can occur while selecting, fitting or forecasting a VAR
#[derive(Error, Debug, Clone, PartialEq)]
pub enum VarError {
    /// Insufficient observations for the requested lag order
    #[error("Insufficient data: need at least {required} observations, got {actual}")]
    InsufficientData { required: usize, actual: usize },

    /// Invalid parameter value
    #[error("Invalid parameter '{name}': {reason}")]
    InvalidParameter { name: String, reason: String },

    /// Model must be fitted before forecasting
    #[error("Model must be fitted before forecasting")]
    NotFitted,

    /// Numerical computation error
    #[error("Numerical error: {0}")]
    NumericalError(String),

    /// Observation width does not match the number of equations
    #[error("Dimension mismatch: expected {expected} series, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },
}

impl VarError {
    pub fn invalid_parameter(name: &str, reason: impl Into<String>) -> Self {
        VarError::InvalidParameter {
            name: name.to_string(),
            reason: reason.into(),
        }
    }
}
