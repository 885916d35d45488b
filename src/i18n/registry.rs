//! Language registry: Single source of truth for the invitation site's languages.
//!
//! The registry is built once on first access (`OnceLock`) and is immutable
//! afterwards. Each entry carries the localized copy used by the renderer.

use std::sync::OnceLock;

use super::strings::{LanguageStrings, ENGLISH_STRINGS, SPANISH_STRINGS};

/// Configuration for a supported language.
#[derive(Debug, Clone)]
pub struct LanguageConfig {
    /// ISO 639-1 language code (e.g., "en", "es")
    pub code: &'static str,

    /// English name of the language (e.g., "English", "Spanish")
    pub name: &'static str,

    /// Native name of the language (e.g., "English", "Español")
    pub native_name: &'static str,

    /// Whether this is the canonical language (the fallback for everything)
    pub is_canonical: bool,

    /// Whether guests may select this language
    pub enabled: bool,

    /// Localized user-facing copy
    pub strings: &'static LanguageStrings,
}

/// Global language registry singleton.
pub struct LanguageRegistry {
    languages: Vec<LanguageConfig>,
}

static REGISTRY: OnceLock<LanguageRegistry> = OnceLock::new();

impl LanguageRegistry {
    /// Get the global language registry instance.
    pub fn get() -> &'static LanguageRegistry {
        REGISTRY.get_or_init(|| LanguageRegistry {
            languages: default_languages(),
        })
    }

    /// Get a language configuration by its code.
    ///
    /// # Returns
    /// * `Some(&LanguageConfig)` if the language exists
    /// * `None` if the language is not found
    pub fn get_by_code(&self, code: &str) -> Option<&LanguageConfig> {
        self.languages.iter().find(|lang| lang.code == code)
    }

    /// Get all enabled languages, in display order.
    pub fn list_enabled(&self) -> Vec<&LanguageConfig> {
        self.languages.iter().filter(|lang| lang.enabled).collect()
    }

    /// Get the canonical language configuration.
    ///
    /// # Panics
    /// Panics if the registry does not contain exactly one canonical language.
    /// The registry is static, so this only fires on a programming error.
    pub fn canonical(&self) -> &LanguageConfig {
        let canonical_langs: Vec<_> = self
            .languages
            .iter()
            .filter(|lang| lang.is_canonical)
            .collect();

        match canonical_langs.as_slice() {
            [only] => only,
            [] => panic!("No canonical language found in registry"),
            _ => panic!("Multiple canonical languages found in registry"),
        }
    }
}

/// English is canonical; Spanish is the only other language guests can pick.
fn default_languages() -> Vec<LanguageConfig> {
    vec![
        LanguageConfig {
            code: "en",
            name: "English",
            native_name: "English",
            is_canonical: true,
            enabled: true,
            strings: &ENGLISH_STRINGS,
        },
        LanguageConfig {
            code: "es",
            name: "Spanish",
            native_name: "Español",
            is_canonical: false,
            enabled: true,
            strings: &SPANISH_STRINGS,
        },
    ]
}
