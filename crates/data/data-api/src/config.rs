//! Dataset catalog configuration types.

use data_spi::{DataError, DatasetEntry};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Directory searched for `tar<N>.csv` files when nothing else is configured.
pub const DEFAULT_DATA_DIR: &str = "data";

/// The eight CCI component datasets, in menu order.
pub fn builtin_entries() -> Vec<DatasetEntry> {
    vec![
        DatasetEntry::new("integrated", "Integrated", 1),
        DatasetEntry::new("materials", "Materials", 2),
        DatasetEntry::new("labor", "Labor", 3),
        DatasetEntry::new("frame", "Frame", 4),
        DatasetEntry::new("finishing", "Finishing", 5),
        DatasetEntry::new("architectural-finishing", "Architectural finishing", 6),
        DatasetEntry::new("mechanical-finishing", "Mechanical finishing", 7),
        DatasetEntry::new("electrical-finishing", "Electrical finishing", 8),
    ]
}

/// Where built-in datasets live and how their headers are renamed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Directory holding the `tar<N>.csv` files
    pub data_dir: PathBuf,
    /// Datasets offered to the user
    pub entries: Vec<DatasetEntry>,
    /// Extra `raw header -> name` renames applied after the built-in table
    pub aliases: Vec<(String, String)>,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            entries: builtin_entries(),
            aliases: Vec::new(),
        }
    }
}

impl CatalogConfig {
    /// Default catalog rooted at `data_dir`.
    pub fn with_data_dir(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            ..Self::default()
        }
    }

    pub fn builder() -> CatalogConfigBuilder {
        CatalogConfigBuilder::new()
    }
}

/// Builder for CatalogConfig.
#[derive(Debug, Default)]
pub struct CatalogConfigBuilder {
    data_dir: Option<PathBuf>,
    entries: Option<Vec<DatasetEntry>>,
    aliases: Vec<(String, String)>,
}

impl CatalogConfigBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the data directory.
    pub fn data_dir(mut self, data_dir: impl Into<PathBuf>) -> Self {
        self.data_dir = Some(data_dir.into());
        self
    }

    /// Replace the built-in dataset list.
    pub fn entries(mut self, entries: Vec<DatasetEntry>) -> Self {
        self.entries = Some(entries);
        self
    }

    /// Add a header rename.
    pub fn alias(mut self, raw: &str, name: &str) -> Self {
        self.aliases.push((raw.to_string(), name.to_string()));
        self
    }

    /// Parse and add a `RAW=NAME` rename.
    pub fn alias_spec(self, spec: &str) -> Result<Self, DataError> {
        let (raw, name) = spec
            .split_once('=')
            .map(|(r, n)| (r.trim(), n.trim()))
            .filter(|(r, n)| !r.is_empty() && !n.is_empty())
            .ok_or_else(|| DataError::ConfigError(format!("alias must be RAW=NAME, got '{}'", spec)))?;
        Ok(self.alias(raw, name))
    }

    /// Build the configuration.
    pub fn build(self) -> Result<CatalogConfig, DataError> {
        let entries = self.entries.unwrap_or_else(builtin_entries);
        if entries.is_empty() {
            return Err(DataError::ConfigError("catalog has no datasets".to_string()));
        }
        for (i, entry) in entries.iter().enumerate() {
            if entries[..i].iter().any(|e| e.key == entry.key) {
                return Err(DataError::ConfigError(format!(
                    "duplicate dataset key '{}'",
                    entry.key
                )));
            }
        }

        Ok(CatalogConfig {
            data_dir: self
                .data_dir
                .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR)),
            entries,
            aliases: self.aliases,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_entries_order() {
        let entries = builtin_entries();
        assert_eq!(entries.len(), 8);
        for (i, entry) in entries.iter().enumerate() {
            assert_eq!(entry.file_number as usize, i + 1);
        }
        assert_eq!(entries[0].key, "integrated");
        assert_eq!(entries[7].key, "electrical-finishing");
    }

    #[test]
    fn test_default_config() {
        let config = CatalogConfig::default();
        assert_eq!(config.data_dir, PathBuf::from("data"));
        assert_eq!(config.entries.len(), 8);
        assert!(config.aliases.is_empty());
    }

    #[test]
    fn test_with_data_dir() {
        let config = CatalogConfig::with_data_dir("/srv/cci");
        assert_eq!(config.data_dir, PathBuf::from("/srv/cci"));
    }

    #[test]
    fn test_builder_aliases() {
        let config = CatalogConfig::builder()
            .data_dir("fixtures")
            .alias("CCI", "integrated")
            .alias_spec(" Steel = materials ")
            .unwrap()
            .build()
            .unwrap();
        assert_eq!(config.data_dir, PathBuf::from("fixtures"));
        assert_eq!(
            config.aliases,
            vec![
                ("CCI".to_string(), "integrated".to_string()),
                ("Steel".to_string(), "materials".to_string()),
            ]
        );
    }

    #[test]
    fn test_builder_rejects_bad_alias() {
        assert!(CatalogConfigBuilder::new().alias_spec("no-equals").is_err());
        assert!(CatalogConfigBuilder::new().alias_spec("=name").is_err());
    }

    #[test]
    fn test_builder_rejects_duplicate_keys() {
        let result = CatalogConfigBuilder::new()
            .entries(vec![
                DatasetEntry::new("a", "A", 1),
                DatasetEntry::new("a", "A again", 2),
            ])
            .build();
        assert!(matches!(result, Err(DataError::ConfigError(_))));
    }

    #[test]
    fn test_builder_rejects_empty_catalog() {
        let result = CatalogConfigBuilder::new().entries(vec![]).build();
        assert!(result.is_err());
    }

    #[test]
    fn test_config_serializes() {
        let json = serde_json::to_value(CatalogConfig::default()).unwrap();
        assert_eq!(json["data_dir"], "data");
        assert_eq!(json["entries"].as_array().unwrap().len(), 8);
    }
}
