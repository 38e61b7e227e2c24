//! Shared application state for the web server.

use std::sync::{Arc, Mutex};

use finsight_common::Locale;
use finsight_llm::LlmBackend;
use finsight_statement::LabelKeys;

use crate::cache::{Analysis, StatementCache};
use crate::config::Config;

/// Shared state injected into every Axum handler.
pub struct AppState {
    pub config: Config,
    /// `None` when no API credential is available.
    pub llm: Option<Arc<dyn LlmBackend>>,
    cache: Mutex<StatementCache>,
}

impl AppState {
    pub fn new(config: Config, llm: Option<Arc<dyn LlmBackend>>) -> Self {
        let cache = Mutex::new(StatementCache::new(config.server.cache_entries));
        Self { config, llm, cache }
    }

    pub fn locale(&self) -> Locale {
        self.config.ui.locale
    }

    pub fn labels(&self) -> &LabelKeys {
        &self.config.labels
    }

    pub fn cached(&self, digest: &str) -> Option<Arc<Analysis>> {
        self.cache.lock().ok()?.get(digest)
    }

    pub fn remember(&self, digest: String, analysis: Analysis) -> Arc<Analysis> {
        match self.cache.lock() {
            Ok(mut cache) => cache.insert(digest, analysis),
            // A poisoned cache only loses memoization.
            Err(_) => Arc::new(analysis),
        }
    }
}

pub type SharedState = Arc<AppState>;
