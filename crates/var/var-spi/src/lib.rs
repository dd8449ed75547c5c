//! Vector Autoregression Service Provider Interface
//!
//! Defines the multivariate predictor contract, lag-order selection results,
//! forecast containers and the error type shared by VAR implementations.

pub mod contract;
pub mod error;
pub mod model;

// Re-export all public items at crate root for convenience
pub use contract::MultivariatePredictor;
pub use error::{Result, VarError};
pub use model::{CriteriaRow, InformationCriterion, LagOrderSelection, VarForecast};
