//! Dataset Facade
//!
//! Unified re-exports for the dataset module.
//!
//! This facade provides a single entry point for all dataset functionality:
//! - `data_spi` - Frame model, source contract and errors
//! - `data_api` - Catalog configuration and builders
//! - `data_core` - CSV loading, header aliases, catalog and calendar
//!
//! # Example
//!
//! ```rust,ignore
//! use data_facade::{CatalogConfig, CatalogSource, DatasetSource};
//!
//! let source = CatalogSource::from_config(&CatalogConfig::with_data_dir("data"));
//! let frame = source.load("integrated").unwrap();
//! println!("{} rows, target '{}'", frame.nobs(), frame.target_column());
//! ```

// Re-export everything from SPI
pub use data_spi::*;

// Re-export everything from API
pub use data_api::*;

// Re-export everything from Core
pub use data_core::*;
