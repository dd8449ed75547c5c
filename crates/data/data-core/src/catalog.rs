//! File-backed catalog of built-in datasets

use std::path::{Path, PathBuf};

use data_api::CatalogConfig;
use data_spi::{DataError, DatasetEntry, DatasetSource, Frame, Result};
use tracing::{info, warn};

use crate::aliases::ColumnAliases;
use crate::loader::load_csv_path;

/// Resolves dataset keys to files inside a data directory.
#[derive(Debug, Clone)]
pub struct Catalog {
    data_dir: PathBuf,
    entries: Vec<DatasetEntry>,
}

impl Catalog {
    pub fn new(data_dir: impl Into<PathBuf>, entries: Vec<DatasetEntry>) -> Self {
        Self {
            data_dir: data_dir.into(),
            entries,
        }
    }

    /// The eight CCI components rooted at `data_dir`.
    pub fn builtin(data_dir: impl Into<PathBuf>) -> Self {
        Self::new(data_dir, data_api::builtin_entries())
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn entries(&self) -> &[DatasetEntry] {
        &self.entries
    }

    /// Look up an entry by key, label (case-insensitive) or file number.
    pub fn resolve(&self, key: &str) -> Result<&DatasetEntry> {
        let key = key.trim();
        self.entries
            .iter()
            .find(|e| e.key == key)
            .or_else(|| self.entries.iter().find(|e| e.label.eq_ignore_ascii_case(key)))
            .or_else(|| {
                key.parse::<u32>()
                    .ok()
                    .and_then(|n| self.entries.iter().find(|e| e.file_number == n))
            })
            .ok_or_else(|| DataError::UnknownDataset(key.to_string()))
    }

    /// Path of the CSV file backing an entry.
    pub fn path(&self, entry: &DatasetEntry) -> PathBuf {
        self.data_dir.join(entry.file_name())
    }
}

/// [`DatasetSource`] over a [`Catalog`], renaming headers on load.
#[derive(Debug, Clone)]
pub struct CatalogSource {
    catalog: Catalog,
    aliases: ColumnAliases,
}

impl CatalogSource {
    pub fn new(catalog: Catalog, aliases: ColumnAliases) -> Self {
        Self { catalog, aliases }
    }

    /// Build from configuration: built-in aliases plus configured overrides.
    pub fn from_config(config: &CatalogConfig) -> Self {
        let mut aliases = ColumnAliases::builtin();
        aliases.extend(&config.aliases);
        Self::new(
            Catalog::new(config.data_dir.clone(), config.entries.clone()),
            aliases,
        )
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn aliases(&self) -> &ColumnAliases {
        &self.aliases
    }
}

impl DatasetSource for CatalogSource {
    fn name(&self) -> &str {
        "catalog"
    }

    fn entries(&self) -> &[DatasetEntry] {
        self.catalog.entries()
    }

    fn is_available(&self, key: &str) -> bool {
        self.catalog
            .resolve(key)
            .map(|entry| self.catalog.path(entry).is_file())
            .unwrap_or(false)
    }

    fn load(&self, key: &str) -> Result<Frame> {
        let entry = self.catalog.resolve(key)?;
        let path = self.catalog.path(entry);
        match load_csv_path(&path, &self.aliases) {
            Ok(frame) => {
                info!(dataset = %entry.key, rows = frame.nobs(), "dataset loaded");
                Ok(frame)
            }
            Err(err) => {
                warn!(dataset = %entry.key, path = %path.display(), error = %err, "dataset load failed");
                Err(err)
            }
        }
    }
}
