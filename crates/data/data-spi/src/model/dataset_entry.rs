//! Built-in dataset descriptor

use serde::{Deserialize, Serialize};

/// One of the bundled CCI component datasets.
///
/// The file backing an entry is `tar<file_number>.csv` inside the data
/// directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetEntry {
    /// Stable identifier used in URLs and on the command line
    pub key: String,
    /// Human readable label
    pub label: String,
    /// Number in the `tar<N>.csv` file name
    pub file_number: u32,
}

impl DatasetEntry {
    pub fn new(key: &str, label: &str, file_number: u32) -> Self {
        Self {
            key: key.to_string(),
            label: label.to_string(),
            file_number,
        }
    }

    /// File name of the backing CSV.
    pub fn file_name(&self) -> String {
        format!("tar{}.csv", self.file_number)
    }
}
