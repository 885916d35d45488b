//! Cached machine translation of dynamic invitation text.
//!
//! Every successful remote translation is stored in a key-value store under
//! `prefix::domain::source::target::text`, with the text cut to
//! `MAX_KEY_TEXT_CHARS` characters. Two long texts that share that prefix
//! share one entry. Entries carry the time they were written and count as
//! absent once older than the caller's TTL; nothing is ever purged.
//!
//! Overlapping requests for the same text are not coordinated. Whichever
//! remote call finishes last writes the entry that later lookups see.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::clock::{Clock, SystemClock};
use crate::i18n::{Language, TranslationMetrics, TranslationValidator};
use crate::storage::KeyValueStore;
use crate::translator::{RemoteTranslator, TranslateError, TranslateRequest};

/// Cache lifetime used when the caller does not pick one (7 days).
pub const DEFAULT_TTL: Duration = Duration::from_secs(7 * 24 * 60 * 60);

/// Longest source text, in characters, that goes into a cache key.
pub const MAX_KEY_TEXT_CHARS: usize = 1900;

pub const DEFAULT_PREFIX: &str = "wedding-translate";

/// Domain segment used when the caller does not scope the translation.
pub const DEFAULT_DOMAIN: &str = "default";

/// Source language of a translation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SourceLanguage {
    #[default]
    Auto,
    Explicit(Language),
}

impl SourceLanguage {
    pub fn code(&self) -> &'static str {
        match self {
            SourceLanguage::Auto => "auto",
            SourceLanguage::Explicit(language) => language.code(),
        }
    }

    pub fn language(&self) -> Option<Language> {
        match self {
            SourceLanguage::Auto => None,
            SourceLanguage::Explicit(language) => Some(*language),
        }
    }
}

impl From<Option<Language>> for SourceLanguage {
    fn from(language: Option<Language>) -> Self {
        language.map_or(SourceLanguage::Auto, SourceLanguage::Explicit)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslateOptions {
    pub source: SourceLanguage,
    pub target: Language,
    pub domain: Option<String>,
    pub ttl: Duration,
}

impl TranslateOptions {
    /// Auto-detected source, no domain, default TTL.
    pub fn to(target: Language) -> Self {
        Self {
            source: SourceLanguage::Auto,
            target,
            domain: None,
            ttl: DEFAULT_TTL,
        }
    }

    pub fn with_source(mut self, source: impl Into<SourceLanguage>) -> Self {
        self.source = source.into();
        self
    }

    pub fn with_domain(mut self, domain: impl Into<String>) -> Self {
        self.domain = Some(domain.into());
        self
    }

    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }
}

impl From<Language> for SourceLanguage {
    fn from(language: Language) -> Self {
        SourceLanguage::Explicit(language)
    }
}

/// Stored form of a cached translation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
struct CacheEntry {
    value: String,
    /// Milliseconds since the Unix epoch
    timestamp: i64,
}

impl CacheEntry {
    fn is_fresh(&self, now: DateTime<Utc>, ttl: Duration) -> bool {
        let age_ms = now.timestamp_millis() - self.timestamp;
        let ttl_ms = i64::try_from(ttl.as_millis()).unwrap_or(i64::MAX);
        age_ms <= ttl_ms
    }
}

/// Build the store key for one translation.
pub fn cache_key(
    prefix: &str,
    domain: Option<&str>,
    source: SourceLanguage,
    target: Language,
    text: &str,
) -> String {
    let truncated: String = text.chars().take(MAX_KEY_TEXT_CHARS).collect();
    format!(
        "{}::{}::{}::{}::{}",
        prefix,
        domain.unwrap_or(DEFAULT_DOMAIN),
        source.code(),
        target.code(),
        truncated
    )
}

/// Client that answers from the cache when it can and calls the remote
/// translator otherwise.
pub struct TranslationClient {
    remote: Arc<dyn RemoteTranslator>,
    store: Arc<dyn KeyValueStore>,
    prefix: String,
    clock: Arc<dyn Clock>,
    default_ttl: Duration,
    metrics: Arc<TranslationMetrics>,
}

impl TranslationClient {
    pub fn new(remote: Arc<dyn RemoteTranslator>, store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            remote,
            store,
            prefix: DEFAULT_PREFIX.to_string(),
            clock: Arc::new(SystemClock),
            default_ttl: DEFAULT_TTL,
            metrics: Arc::new(TranslationMetrics::new()),
        }
    }

    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// TTL used by `options`.
    pub fn with_default_ttl(mut self, ttl: Duration) -> Self {
        self.default_ttl = ttl;
        self
    }

    /// Options targeting `target` with this client's default TTL.
    pub fn options(&self, target: Language) -> TranslateOptions {
        TranslateOptions::to(target).with_ttl(self.default_ttl)
    }

    pub fn metrics(&self) -> &TranslationMetrics {
        &self.metrics
    }

    /// Translate one text.
    ///
    /// Empty or whitespace-only input yields `""`. A fresh cache entry is
    /// returned as-is. An explicit source equal to the target returns the
    /// trimmed input. Otherwise the remote translator is called and its
    /// answer cached. Remote errors are returned unchanged and nothing is
    /// cached for them.
    pub async fn translate(
        &self,
        text: &str,
        options: &TranslateOptions,
    ) -> Result<String, TranslateError> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Ok(String::new());
        }

        let key = cache_key(
            &self.prefix,
            options.domain.as_deref(),
            options.source,
            options.target,
            trimmed,
        );

        if let Some(cached) = self.lookup(&key, options.ttl).await {
            self.metrics.record_cache_hit();
            return Ok(cached);
        }
        self.metrics.record_cache_miss();

        if options.source.language() == Some(options.target) {
            return Ok(trimmed.to_string());
        }

        let request = TranslateRequest {
            text: trimmed.to_string(),
            source: options.source.language(),
            target: options.target,
            domain: options.domain.clone(),
        };

        self.metrics.record_api_call();
        let translated = match self.remote.translate(&request).await {
            Ok(translated) => translated,
            Err(e) => {
                self.metrics.record_api_failure();
                return Err(e);
            }
        };

        let validation = TranslationValidator::validate(trimmed, &translated);
        if !validation.is_clean() {
            warn!(
                "Translation to {} has issues: errors={:?} warnings={:?}",
                options.target.code(),
                validation.errors,
                validation.warnings
            );
        }

        self.store(&key, &translated).await;
        Ok(translated)
    }

    /// Translate each text in order, one at a time. The first failure
    /// aborts the batch and is returned.
    pub async fn translate_batch<S: AsRef<str>>(
        &self,
        texts: &[S],
        options: &TranslateOptions,
    ) -> Result<Vec<String>, TranslateError> {
        let mut translated = Vec::with_capacity(texts.len());
        for text in texts {
            translated.push(self.translate(text.as_ref(), options).await?);
        }
        Ok(translated)
    }

    /// Translate for display: any failure shows the original text.
    pub async fn translate_or_original(&self, text: &str, options: &TranslateOptions) -> String {
        match self.translate(text, options).await {
            Ok(translated) => translated,
            Err(e) => {
                debug!("Showing original text, translation failed: {}", e);
                text.to_string()
            }
        }
    }

    async fn lookup(&self, key: &str, ttl: Duration) -> Option<String> {
        let raw = match self.store.get(key).await {
            Ok(raw) => raw?,
            Err(e) => {
                warn!("Translation cache read failed: {}", e);
                return None;
            }
        };

        let entry: CacheEntry = match serde_json::from_value(raw) {
            Ok(entry) => entry,
            Err(e) => {
                debug!("Ignoring unreadable translation cache entry: {}", e);
                return None;
            }
        };

        entry
            .is_fresh(self.clock.now(), ttl)
            .then_some(entry.value)
    }

    async fn store(&self, key: &str, value: &str) {
        let entry = CacheEntry {
            value: value.to_string(),
            timestamp: self.clock.now().timestamp_millis(),
        };

        let json = match serde_json::to_value(&entry) {
            Ok(json) => json,
            Err(e) => {
                warn!("Failed to encode translation cache entry: {}", e);
                return;
            }
        };

        if let Err(e) = self.store.set(key, json).await {
            warn!("Translation cache write failed: {}", e);
        }
    }
}
