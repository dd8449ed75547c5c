//! Dataset source trait definition.

use crate::error::Result;
use crate::model::{DatasetEntry, Frame};

/// Something that can hand out frames by dataset key.
///
/// The catalog-backed implementation lives in `data-core`; tests and the
/// server swap in their own sources.
pub trait DatasetSource: Send + Sync {
    /// Data source name.
    fn name(&self) -> &str;

    /// Datasets this source can serve.
    fn entries(&self) -> &[DatasetEntry];

    /// Whether the dataset's backing data is currently available.
    fn is_available(&self, key: &str) -> bool;

    /// Load the dataset identified by `key`.
    fn load(&self, key: &str) -> Result<Frame>;
}
