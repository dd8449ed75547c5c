//! Dataset Consumer API
//!
//! Configuration types and builders for the dataset catalog.

mod config;

pub use config::{builtin_entries, CatalogConfig, CatalogConfigBuilder, DEFAULT_DATA_DIR};
