//! Application state shared across handlers.

use std::sync::Arc;

use crate::clock::{Clock, SystemClock};
use crate::config::Config;
use crate::services::Backend;
use crate::translation::TranslationClient;

/// Cheaply cloneable via `Arc`.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: Config,
    backend: Arc<dyn Backend>,
    translations: TranslationClient,
    clock: Arc<dyn Clock>,
}

impl AppState {
    pub fn new(config: Config, backend: Arc<dyn Backend>, translations: TranslationClient) -> Self {
        Self::with_clock(config, backend, translations, Arc::new(SystemClock))
    }

    pub fn with_clock(
        config: Config,
        backend: Arc<dyn Backend>,
        translations: TranslationClient,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                config,
                backend,
                translations,
                clock,
            }),
        }
    }

    pub fn config(&self) -> &Config {
        &self.inner.config
    }

    pub fn backend(&self) -> &dyn Backend {
        self.inner.backend.as_ref()
    }

    pub fn translations(&self) -> &TranslationClient {
        &self.inner.translations
    }

    pub fn clock(&self) -> Arc<dyn Clock> {
        Arc::clone(&self.inner.clock)
    }
}
