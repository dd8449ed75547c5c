//! Shared application state

use std::collections::VecDeque;
use std::sync::Arc;

use data_facade::{CatalogConfig, CatalogSource, ColumnAliases, DatasetSource};
use report::ForecastReport;
use tokio::sync::RwLock;

use crate::config::ServerConfig;

/// Results kept for CSV download.
pub const RESULT_CAPACITY: usize = 64;

/// Recent forecast results addressed by id, oldest evicted first.
#[derive(Debug)]
pub struct ResultStore {
    capacity: usize,
    next_id: u64,
    entries: VecDeque<(u64, Arc<ForecastReport>)>,
}

impl ResultStore {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            next_id: 1,
            entries: VecDeque::with_capacity(capacity),
        }
    }

    /// Store a shared report and return its id.
    pub fn insert(&mut self, report: Arc<ForecastReport>) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        if self.entries.len() == self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back((id, report));
        id
    }

    pub fn get(&self, id: u64) -> Option<Arc<ForecastReport>> {
        self.entries
            .iter()
            .find(|(key, _)| *key == id)
            .map(|(_, report)| Arc::clone(report))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub source: Arc<dyn DatasetSource>,
    /// Header renames applied to uploaded files
    pub aliases: Arc<ColumnAliases>,
    pub config: Arc<ServerConfig>,
    pub results: Arc<RwLock<ResultStore>>,
}

impl AppState {
    /// State backed by the built-in catalog under `config.data_dir`.
    pub fn new(config: ServerConfig) -> Self {
        let source = CatalogSource::from_config(&CatalogConfig::with_data_dir(config.data_dir.clone()));
        let aliases = source.aliases().clone();
        Self::with_source(config, Arc::new(source), aliases)
    }

    pub fn with_source(
        config: ServerConfig,
        source: Arc<dyn DatasetSource>,
        aliases: ColumnAliases,
    ) -> Self {
        Self {
            source,
            aliases: Arc::new(aliases),
            config: Arc::new(config),
            results: Arc::new(RwLock::new(ResultStore::new(RESULT_CAPACITY))),
        }
    }
}
