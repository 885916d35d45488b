//! Guest-facing bilingual wedding invitation site.
//!
//! Serves a wedding's invitation in English or Spanish, collects RSVPs and
//! shows the wedding party. The couple's own copy is machine-translated on
//! demand and cached.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use tracing::info;

pub mod clock;
pub mod config;
pub mod countdown;
pub mod db;
pub mod error;
pub mod i18n;
pub mod invitation;
pub mod memory;
pub mod models;
pub mod openai;
pub mod party;
pub mod preferences;
pub mod retry;
pub mod routes;
pub mod rsvp;
pub mod security;
pub mod services;
pub mod state;
pub mod storage;
pub mod translation;
pub mod translator;
pub mod views;

use config::{Config, TranslationProvider};
use db::Database;
use memory::MemoryBackend;
use services::Backend;
use state::AppState;
use storage::{KeyValueStore, MemoryStore};
use translation::TranslationClient;
use translator::{DisabledTranslator, FunctionTranslator, RemoteTranslator};

const HTTP_TIMEOUT: Duration = Duration::from_secs(30);

pub fn http_client() -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(HTTP_TIMEOUT)
        .build()
        .context("Failed to build HTTP client")
}

/// The translator that answers cache misses for the configured provider.
pub fn remote_translator(
    provider: &TranslationProvider,
    http: reqwest::Client,
) -> Arc<dyn RemoteTranslator> {
    match provider {
        TranslationProvider::Function { url, api_key } => {
            info!("Translation provider: function at {}", url);
            Arc::new(FunctionTranslator::new(http, url.clone(), api_key.clone()))
        }
        TranslationProvider::OpenAi {
            api_key,
            model,
            api_url,
        } => {
            info!("Translation provider: OpenAI ({})", model);
            Arc::new(openai::OpenAiTranslator::new(
                http,
                api_key.clone(),
                model.clone(),
                api_url.clone(),
            ))
        }
        TranslationProvider::Disabled => {
            info!("Translation disabled; custom copy is shown as written");
            Arc::new(DisabledTranslator)
        }
    }
}

/// Backend services and the translation cache store. Postgres when
/// `DATABASE_URL` is set, otherwise in memory (seeded from `SEED_FILE`).
pub async fn connect_backend(
    config: &Config,
) -> Result<(Arc<dyn Backend>, Arc<dyn KeyValueStore>)> {
    if let Some(url) = &config.database_url {
        let db = Arc::new(
            Database::connect(url)
                .await
                .context("Failed to connect to database")?,
        );
        let backend: Arc<dyn Backend> = db.clone();
        let store: Arc<dyn KeyValueStore> = db;
        return Ok((backend, store));
    }

    let backend = match &config.seed_file {
        Some(path) => MemoryBackend::from_seed_file(path)?,
        None => {
            info!("No DATABASE_URL or SEED_FILE; starting with an empty in-memory backend");
            MemoryBackend::new()
        }
    };
    let backend: Arc<dyn Backend> = Arc::new(backend);
    let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
    Ok((backend, store))
}

/// Wire configuration, backend and translator into the application state.
pub async fn build_state(config: Config) -> Result<AppState> {
    let (backend, store) = connect_backend(&config).await?;
    let remote = remote_translator(&config.translation_provider, http_client()?);
    let translations = TranslationClient::new(remote, store)
        .with_prefix(config.translation_cache_prefix.clone())
        .with_default_ttl(config.translation_cache_ttl);
    Ok(AppState::new(config, backend, translations))
}

/// The application router.
pub fn app(state: AppState) -> axum::Router {
    routes::routes(state)
}
