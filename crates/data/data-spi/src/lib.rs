//! Dataset Service Provider Interface
//!
//! Defines the frame model, the dataset source contract and the errors raised
//! while turning a CSV file into a multivariate monthly series.

pub mod contract;
pub mod error;
pub mod model;

// Re-export all public items at crate root for convenience
pub use contract::DatasetSource;
pub use error::{DataError, Result};
pub use model::{DatasetEntry, Frame, DATE_COLUMN};
