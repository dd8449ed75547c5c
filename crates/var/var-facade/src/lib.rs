//! VAR Facade
//!
//! High-level API for vector autoregression. Re-exports all public types
//! from the VAR stack for convenient usage.

// Re-export everything from API (which includes the SPI types)
pub use var_api::*;

// Re-export core modules for direct access
pub use var_core::{model, predictor, selection};

// Re-export estimation entry points at root
pub use var_core::{select_order, VarModel, VarPredictor};
