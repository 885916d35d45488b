//! Viewer preferences: interface language and colour theme.
//!
//! A `Preferences` value is built once per request from the persisted
//! cookies plus what the browser reports about itself, handed to every view
//! that renders, and changed only through `Preferences::apply`.

use std::convert::Infallible;

use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::http::HeaderMap;
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::{Deserialize, Serialize};

use crate::i18n::Language;

pub const LANGUAGE_COOKIE: &str = "wedding.lang";
pub const THEME_COOKIE: &str = "wedding.theme";

/// Client hint through which the browser reports its colour-scheme preference.
pub const COLOR_SCHEME_HINT: &str = "Sec-CH-Prefers-Color-Scheme";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    Light,
    Dark,
    #[default]
    System,
}

impl ThemeMode {
    pub fn as_str(self) -> &'static str {
        match self {
            ThemeMode::Light => "light",
            ThemeMode::Dark => "dark",
            ThemeMode::System => "system",
        }
    }

    pub fn parse(value: &str) -> Option<ThemeMode> {
        match value.trim() {
            "light" => Some(ThemeMode::Light),
            "dark" => Some(ThemeMode::Dark),
            "system" => Some(ThemeMode::System),
            _ => None,
        }
    }
}

/// Theme actually applied to the page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ColorScheme {
    #[default]
    Light,
    Dark,
}

impl ColorScheme {
    pub fn as_str(self) -> &'static str {
        match self {
            ColorScheme::Light => "light",
            ColorScheme::Dark => "dark",
        }
    }

    /// Parse a `Sec-CH-Prefers-Color-Scheme` value, which may be quoted.
    pub fn from_client_hint(value: &str) -> Option<ColorScheme> {
        match value.trim().trim_matches('"') {
            "dark" => Some(ColorScheme::Dark),
            "light" => Some(ColorScheme::Light),
            _ => None,
        }
    }
}

/// Raw values read back from persistent storage.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PersistedPreferences {
    pub language: Option<String>,
    pub theme: Option<String>,
}

impl PersistedPreferences {
    pub fn from_cookies(jar: &CookieJar) -> Self {
        Self {
            language: jar.get(LANGUAGE_COOKIE).map(|c| c.value().to_string()),
            theme: jar.get(THEME_COOKIE).map(|c| c.value().to_string()),
        }
    }
}

/// What the browser reports about its environment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvironmentProbe {
    pub accept_language: Option<String>,
    pub color_scheme: Option<ColorScheme>,
}

impl EnvironmentProbe {
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let header = |name: &str| {
            headers
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string)
        };

        Self {
            accept_language: header("accept-language"),
            color_scheme: header(COLOR_SCHEME_HINT)
                .as_deref()
                .and_then(ColorScheme::from_client_hint),
        }
    }

    /// Language suggested by the first `Accept-Language` tag.
    pub fn browser_language(&self) -> Option<Language> {
        let first = self.accept_language.as_deref()?.split(',').next()?;
        let tag = first.split(';').next()?.trim();
        if tag.is_empty() {
            return None;
        }
        Some(Language::from_browser_tag(tag))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreferenceChange {
    Language(Language),
    Theme(ThemeMode),
    /// The host reported a new colour-scheme preference
    SystemScheme(ColorScheme),
}

/// Value that must be written back to persistent storage after a change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PersistWrite {
    Language(Language),
    Theme(ThemeMode),
}

impl PersistWrite {
    pub fn into_cookie(self, secure: bool) -> Cookie<'static> {
        let (name, value) = match self {
            PersistWrite::Language(language) => (LANGUAGE_COOKIE, language.code()),
            PersistWrite::Theme(mode) => (THEME_COOKIE, mode.as_str()),
        };
        Cookie::build((name, value))
            .path("/")
            .same_site(SameSite::Lax)
            .secure(secure)
            .permanent()
            .build()
    }
}

/// Attributes set on the document root.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DocumentAttributes {
    pub lang: &'static str,
    pub theme: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Preferences {
    language: Language,
    theme_mode: ThemeMode,
    system_scheme: ColorScheme,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            language: Language::canonical(),
            theme_mode: ThemeMode::default(),
            system_scheme: ColorScheme::default(),
        }
    }
}

impl Preferences {
    /// Language comes from the persisted value when it is a known code, then
    /// from the browser, then falls back to English. An unreadable theme
    /// falls back to following the system.
    pub fn load(persisted: &PersistedPreferences, probe: &EnvironmentProbe) -> Self {
        let language = persisted
            .language
            .as_deref()
            .and_then(|code| Language::from_code(code).ok())
            .or_else(|| probe.browser_language())
            .unwrap_or_else(Language::canonical);

        let theme_mode = persisted
            .theme
            .as_deref()
            .and_then(ThemeMode::parse)
            .unwrap_or_default();

        Self {
            language,
            theme_mode,
            system_scheme: probe.color_scheme.unwrap_or_default(),
        }
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn theme_mode(&self) -> ThemeMode {
        self.theme_mode
    }

    pub fn resolved_theme(&self) -> ColorScheme {
        match self.theme_mode {
            ThemeMode::Light => ColorScheme::Light,
            ThemeMode::Dark => ColorScheme::Dark,
            ThemeMode::System => self.system_scheme,
        }
    }

    /// Apply a change and return what has to be persisted, if anything.
    /// Theme changes persist the chosen mode, never the resolved scheme.
    pub fn apply(&mut self, change: PreferenceChange) -> Option<PersistWrite> {
        match change {
            PreferenceChange::Language(language) => {
                self.language = language;
                Some(PersistWrite::Language(language))
            }
            PreferenceChange::Theme(mode) => {
                self.theme_mode = mode;
                Some(PersistWrite::Theme(mode))
            }
            PreferenceChange::SystemScheme(scheme) => {
                self.system_scheme = scheme;
                None
            }
        }
    }

    pub fn document_attributes(&self) -> DocumentAttributes {
        DocumentAttributes {
            lang: self.language.code(),
            theme: self.resolved_theme().as_str(),
        }
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for Preferences
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);
        Ok(Preferences::load(
            &PersistedPreferences::from_cookies(&jar),
            &EnvironmentProbe::from_headers(&parts.headers),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn persisted(language: Option<&str>, theme: Option<&str>) -> PersistedPreferences {
        PersistedPreferences {
            language: language.map(str::to_string),
            theme: theme.map(str::to_string),
        }
    }

    fn probe(accept_language: Option<&str>, scheme: Option<ColorScheme>) -> EnvironmentProbe {
        EnvironmentProbe {
            accept_language: accept_language.map(str::to_string),
            color_scheme: scheme,
        }
    }

    // ==================== Language Tests ====================

    #[test]
    fn test_persisted_language_wins_over_browser() {
        let prefs = Preferences::load(&persisted(Some("en"), None), &probe(Some("es-MX"), None));
        assert_eq!(prefs.language(), Language::ENGLISH);
    }

    #[test]
    fn test_invalid_persisted_language_uses_browser() {
        let prefs = Preferences::load(
            &persisted(Some("fr"), None),
            &probe(Some("es-MX,en;q=0.8"), None),
        );
        assert_eq!(prefs.language(), Language::SPANISH);
    }

    #[test]
    fn test_browser_heuristic_uses_first_tag_only() {
        let prefs = Preferences::load(&persisted(None, None), &probe(Some("en-US,es;q=0.9"), None));
        assert_eq!(prefs.language(), Language::ENGLISH);
    }

    #[test]
    fn test_defaults_to_english() {
        let prefs = Preferences::load(&persisted(None, None), &probe(None, None));
        assert_eq!(prefs.language(), Language::ENGLISH);

        let prefs = Preferences::load(&persisted(None, None), &probe(Some("de-DE"), None));
        assert_eq!(prefs.language(), Language::ENGLISH);
    }

    #[test]
    fn test_language_change_persists_and_updates_document() {
        let mut prefs = Preferences::default();
        let write = prefs.apply(PreferenceChange::Language(Language::SPANISH));

        assert_eq!(write, Some(PersistWrite::Language(Language::SPANISH)));
        assert_eq!(prefs.document_attributes().lang, "es");
    }

    // ==================== Theme Tests ====================

    #[test]
    fn test_system_theme_resolves_against_host_preference() {
        let prefs = Preferences::load(
            &persisted(None, None),
            &probe(None, Some(ColorScheme::Dark)),
        );
        assert_eq!(prefs.theme_mode(), ThemeMode::System);
        assert_eq!(prefs.resolved_theme(), ColorScheme::Dark);
    }

    #[test]
    fn test_system_theme_re_resolves_on_preference_change() {
        let mut prefs = Preferences::load(
            &persisted(Some("es"), Some("system")),
            &probe(None, None),
        );
        assert_eq!(prefs.resolved_theme(), ColorScheme::Light);

        let write = prefs.apply(PreferenceChange::SystemScheme(ColorScheme::Dark));

        assert_eq!(write, None);
        assert_eq!(prefs.document_attributes().theme, "dark");
    }

    #[test]
    fn test_explicit_theme_ignores_host_preference() {
        let mut prefs = Preferences::load(
            &persisted(None, Some("light")),
            &probe(None, Some(ColorScheme::Dark)),
        );
        assert_eq!(prefs.resolved_theme(), ColorScheme::Light);

        prefs.apply(PreferenceChange::SystemScheme(ColorScheme::Dark));
        assert_eq!(prefs.resolved_theme(), ColorScheme::Light);
    }

    #[test]
    fn test_theme_change_persists_mode_not_resolved_value() {
        let mut prefs = Preferences::load(
            &persisted(None, Some("dark")),
            &probe(None, Some(ColorScheme::Dark)),
        );
        let write = prefs.apply(PreferenceChange::Theme(ThemeMode::System));

        assert_eq!(write, Some(PersistWrite::Theme(ThemeMode::System)));
        let cookie = write.unwrap().into_cookie(false);
        assert_eq!(cookie.name(), THEME_COOKIE);
        assert_eq!(cookie.value(), "system");
    }

    #[test]
    fn test_unknown_persisted_theme_follows_system() {
        let prefs = Preferences::load(&persisted(None, Some("sepia")), &probe(None, None));
        assert_eq!(prefs.theme_mode(), ThemeMode::System);
    }

    // ==================== Header Parsing Tests ====================

    #[test]
    fn test_client_hint_parsing() {
        assert_eq!(ColorScheme::from_client_hint("\"dark\""), Some(ColorScheme::Dark));
        assert_eq!(ColorScheme::from_client_hint("light"), Some(ColorScheme::Light));
        assert_eq!(ColorScheme::from_client_hint("no-preference"), None);
    }

    #[test]
    fn test_probe_from_headers() {
        let mut headers = HeaderMap::new();
        headers.insert("accept-language", HeaderValue::from_static("es-ES,es;q=0.9"));
        headers.insert(COLOR_SCHEME_HINT, HeaderValue::from_static("\"dark\""));

        let probe = EnvironmentProbe::from_headers(&headers);
        assert_eq!(probe.browser_language(), Some(Language::SPANISH));
        assert_eq!(probe.color_scheme, Some(ColorScheme::Dark));
    }

    #[test]
    fn test_persisted_from_cookies() {
        let jar = CookieJar::new()
            .add(Cookie::new(LANGUAGE_COOKIE, "es"))
            .add(Cookie::new(THEME_COOKIE, "dark"));
        let persisted = PersistedPreferences::from_cookies(&jar);

        assert_eq!(persisted.language.as_deref(), Some("es"));
        assert_eq!(persisted.theme.as_deref(), Some("dark"));
    }

    #[test]
    fn test_cookie_attributes() {
        let cookie = PersistWrite::Language(Language::SPANISH).into_cookie(true);
        assert_eq!(cookie.name(), LANGUAGE_COOKIE);
        assert_eq!(cookie.value(), "es");
        assert_eq!(cookie.path(), Some("/"));
        assert_eq!(cookie.secure(), Some(true));
    }
}
