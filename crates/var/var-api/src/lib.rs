//! VAR Consumer API
//!
//! Configuration types and builder APIs for lag selection and forecasting.

mod config;

pub use config::{
    VarConfig, VarConfigBuilder, DEFAULT_INTERVAL_LEVEL, DEFAULT_MAX_LAGS, DEFAULT_STEPS, MAX_STEPS,
};

// Re-export traits and types from SPI
pub use var_spi::{
    CriteriaRow, InformationCriterion, LagOrderSelection, MultivariatePredictor, Result,
    VarError, VarForecast,
};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::{InformationCriterion, VarConfig, VarConfigBuilder, VarError};
}
