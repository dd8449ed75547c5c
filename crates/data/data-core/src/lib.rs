//! Dataset Core
//!
//! Implementations for dataset loading: CSV parsing, header renaming through a
//! lookup table, the file-backed built-in catalog and the monthly calendar used
//! to date forecasts.

pub mod aliases;
pub mod calendar;
pub mod catalog;
pub mod loader;

pub use aliases::ColumnAliases;
pub use calendar::{month_starts, parse_date};
pub use catalog::{Catalog, CatalogSource};
pub use loader::{load_csv_path, load_csv_reader, load_csv_str};
