use std::net::SocketAddr;
use std::time::Duration;

use anyhow::{bail, Context, Result};

use crate::openai;
use crate::translation::DEFAULT_PREFIX;

/// Which remote translator answers cache misses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TranslationProvider {
    /// Hosted translation function reached over HTTP
    Function { url: String, api_key: Option<String> },
    OpenAi {
        api_key: String,
        model: String,
        api_url: String,
    },
    /// Dynamic text is always shown as written
    Disabled,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub environment: String,
    pub port: u16,

    // Backend
    pub database_url: Option<String>,
    pub seed_file: Option<String>,

    /// Weddings are served at `<subdomain>.<base_domain>` when set
    pub base_domain: Option<String>,

    // Translation
    pub translation_provider: TranslationProvider,
    pub translation_cache_prefix: String,
    pub translation_cache_ttl: Duration,

    // Security
    pub api_key: Option<String>,
    pub cookie_secure: bool,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let environment =
            std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string());

        Ok(Self {
            port: std::env::var("PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(8080),

            // Backend
            database_url: non_empty_var("DATABASE_URL"),
            seed_file: non_empty_var("SEED_FILE"),
            base_domain: non_empty_var("BASE_DOMAIN")
                .map(|d| d.trim_start_matches('.').to_lowercase()),

            // Translation
            translation_provider: provider_from_env()?,
            translation_cache_prefix: std::env::var("TRANSLATION_CACHE_PREFIX")
                .unwrap_or_else(|_| DEFAULT_PREFIX.to_string()),
            translation_cache_ttl: Duration::from_secs(
                std::env::var("TRANSLATION_CACHE_TTL_HOURS")
                    .ok()
                    .and_then(|v| v.parse::<u64>().ok())
                    .unwrap_or(168)
                    * 60
                    * 60,
            ),

            // Security
            api_key: non_empty_var("API_KEY"),
            cookie_secure: std::env::var("COOKIE_SECURE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(environment == "production"),

            environment,
        })
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::from(([0, 0, 0, 0], self.port))
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

fn provider_from_env() -> Result<TranslationProvider> {
    let provider = std::env::var("TRANSLATION_PROVIDER").unwrap_or_else(|_| "none".to_string());

    match provider.trim().to_lowercase().as_str() {
        "function" => Ok(TranslationProvider::Function {
            url: non_empty_var("TRANSLATE_FUNCTION_URL")
                .context("TRANSLATE_FUNCTION_URL not set")?,
            api_key: non_empty_var("TRANSLATE_FUNCTION_KEY"),
        }),
        "openai" => Ok(TranslationProvider::OpenAi {
            api_key: non_empty_var("OPENAI_API_KEY").context("OPENAI_API_KEY not set")?,
            model: std::env::var("OPENAI_MODEL").unwrap_or_else(|_| "gpt-4o-mini".to_string()),
            api_url: std::env::var("OPENAI_API_URL")
                .unwrap_or_else(|_| openai::DEFAULT_API_URL.to_string()),
        }),
        "none" | "" => Ok(TranslationProvider::Disabled),
        other => bail!(
            "Unknown TRANSLATION_PROVIDER '{}' (expected function, openai or none)",
            other
        ),
    }
}
