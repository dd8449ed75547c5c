//! Header rename lookup table
//!
//! Source workbooks label columns with the Korean component names; the rest of
//! the system works with the catalog keys. Lookups are exact after trimming,
//! and later entries win over earlier ones so user aliases override the
//! built-in table.

use data_spi::DATE_COLUMN;

const BUILTIN: &[(&str, &str)] = &[
    ("날짜", DATE_COLUMN),
    ("통합", "integrated"),
    ("재료", "materials"),
    ("노무", "labor"),
    ("골조", "frame"),
    ("마감", "finishing"),
    ("건축마감", "architectural-finishing"),
    ("설비마감", "mechanical-finishing"),
    ("전기마감", "electrical-finishing"),
];

/// Ordered `raw header -> canonical name` table.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ColumnAliases {
    entries: Vec<(String, String)>,
}

impl ColumnAliases {
    /// An empty table; every header keeps its own name.
    pub fn new() -> Self {
        Self::default()
    }

    /// The component-name table shipped with the catalog.
    pub fn builtin() -> Self {
        Self {
            entries: BUILTIN
                .iter()
                .map(|(raw, name)| (raw.to_string(), name.to_string()))
                .collect(),
        }
    }

    /// Append a rename; it takes precedence over existing entries.
    pub fn with(mut self, raw: &str, name: &str) -> Self {
        self.insert(raw, name);
        self
    }

    pub fn insert(&mut self, raw: &str, name: &str) {
        self.entries
            .push((raw.trim().to_string(), name.trim().to_string()));
    }

    /// Append every pair from a configuration list.
    pub fn extend<'a, I>(&mut self, pairs: I)
    where
        I: IntoIterator<Item = &'a (String, String)>,
    {
        for (raw, name) in pairs {
            self.insert(raw, name);
        }
    }

    /// Canonical name for a header.
    pub fn resolve(&self, header: &str) -> String {
        let header = header.trim();
        self.entries
            .iter()
            .rev()
            .find(|(raw, _)| raw == header)
            .map(|(_, name)| name.clone())
            .unwrap_or_else(|| header.to_string())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
