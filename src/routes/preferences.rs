//! Language and theme switcher.

use axum::{extract::State, response::Redirect, Form};
use axum_extra::extract::cookie::CookieJar;
use serde::Deserialize;
use tracing::{debug, instrument};

use crate::i18n::Language;
use crate::preferences::{PreferenceChange, Preferences, ThemeMode};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct PreferencesForm {
    pub lang: Option<String>,
    pub theme: Option<String>,
    pub return_to: Option<String>,
}

/// Only same-site absolute paths are followed; anything else goes home.
pub(crate) fn safe_return_to(raw: Option<&str>) -> String {
    match raw.map(str::trim) {
        Some(path) if path.starts_with('/') && !path.starts_with("//") && !path.contains('\\') => {
            path.to_string()
        }
        _ => "/".to_string(),
    }
}

/// `POST /preferences`
///
/// Applies the submitted language and theme, persists them as cookies and
/// redirects back with 303. Unknown values are ignored.
#[instrument(skip(state, preferences, jar))]
pub async fn update(
    State(state): State<AppState>,
    mut preferences: Preferences,
    jar: CookieJar,
    Form(form): Form<PreferencesForm>,
) -> (CookieJar, Redirect) {
    let secure = state.config().cookie_secure;
    let mut jar = jar;

    let mut changes = Vec::new();
    if let Some(language) = form
        .lang
        .as_deref()
        .and_then(|c| Language::from_code(c.trim()).ok())
    {
        changes.push(PreferenceChange::Language(language));
    }
    if let Some(mode) = form.theme.as_deref().and_then(ThemeMode::parse) {
        changes.push(PreferenceChange::Theme(mode));
    }

    for change in changes {
        if let Some(write) = preferences.apply(change) {
            debug!(?write, "Persisting preference");
            jar = jar.add(write.into_cookie(secure));
        }
    }

    (jar, Redirect::to(&safe_return_to(form.return_to.as_deref())))
}
