//! Model module containing data structures

mod dataset_entry;
mod frame;

pub use dataset_entry::DatasetEntry;
pub use frame::{Frame, DATE_COLUMN};
