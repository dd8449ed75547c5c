//! Contract module containing trait definitions for dataset access

mod dataset_source;

pub use dataset_source::DatasetSource;
