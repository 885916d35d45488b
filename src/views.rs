//! Askama templates and the page chrome shared by every page.

use askama::Template;
use axum::response::Html;
use url::form_urlencoded::Serializer;

use crate::i18n::{LanguageRegistry, LanguageStrings};
use crate::invitation::InvitationView;
use crate::models::ThemeSettings;
use crate::party::PartyView;
use crate::preferences::{Preferences, ThemeMode};

#[derive(Debug, Clone)]
pub struct OptionView {
    pub value: String,
    pub label: String,
    pub selected: bool,
}

#[derive(Debug, Clone)]
pub struct NavLink {
    pub href: String,
    pub label: String,
    pub current: bool,
}

/// Document attributes, colours, navigation and the preference switcher.
#[derive(Debug, Clone)]
pub struct Chrome {
    pub lang: String,
    pub theme: String,
    pub title: String,
    pub primary_color: String,
    pub accent_color: String,
    pub return_to: String,
    pub language_label: String,
    pub theme_label: String,
    pub apply_label: String,
    pub languages: Vec<OptionView>,
    pub themes: Vec<OptionView>,
    pub nav: Vec<NavLink>,
}

impl Chrome {
    pub fn new(
        preferences: &Preferences,
        title: impl Into<String>,
        return_to: impl Into<String>,
    ) -> Self {
        let strings = preferences.language().strings();
        let document = preferences.document_attributes();
        let defaults = ThemeSettings::default();

        let languages = LanguageRegistry::get()
            .list_enabled()
            .into_iter()
            .map(|config| OptionView {
                value: config.code.to_string(),
                label: config.native_name.to_string(),
                selected: config.code == preferences.language().code(),
            })
            .collect();

        let themes = [
            (ThemeMode::Light, strings.theme_light),
            (ThemeMode::Dark, strings.theme_dark),
            (ThemeMode::System, strings.theme_system),
        ]
        .into_iter()
        .map(|(mode, label)| OptionView {
            value: mode.as_str().to_string(),
            label: label.to_string(),
            selected: mode == preferences.theme_mode(),
        })
        .collect();

        Self {
            lang: document.lang.to_string(),
            theme: document.theme.to_string(),
            title: title.into(),
            primary_color: defaults.primary_color,
            accent_color: defaults.accent_color,
            return_to: return_to.into(),
            language_label: strings.language_label.to_string(),
            theme_label: strings.theme_label.to_string(),
            apply_label: strings.apply.to_string(),
            languages,
            themes,
            nav: Vec::new(),
        }
    }

    /// Colours must already be sanitized.
    pub fn with_colors(mut self, primary: &str, accent: &str) -> Self {
        self.primary_color = primary.to_string();
        self.accent_color = accent.to_string();
        self
    }

    /// Links between a wedding's invitation and party pages. The invite code
    /// is carried along so the guest keeps their personal invitation.
    pub fn with_wedding_nav(
        mut self,
        wedding_id: &str,
        invite_code: Option<&str>,
        current: Page,
        strings: &LanguageStrings,
    ) -> Self {
        let query = invite_code
            .map(|code| {
                let encoded = Serializer::new(String::new())
                    .append_pair("invite", code)
                    .finish();
                format!("?{}", encoded)
            })
            .unwrap_or_default();
        self.nav = vec![
            NavLink {
                href: format!("/w/{}{}", wedding_id, query),
                label: strings.nav_invitation.to_string(),
                current: current == Page::Invitation,
            },
            NavLink {
                href: format!("/w/{}/party{}", wedding_id, query),
                label: strings.nav_party.to_string(),
                current: current == Page::Party,
            },
        ];
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Invitation,
    Party,
}

#[derive(Template)]
#[template(path = "invitation.html")]
pub struct InvitationTemplate {
    pub chrome: Chrome,
    pub view: InvitationView,
}

#[derive(Template)]
#[template(path = "party.html")]
pub struct PartyTemplate {
    pub chrome: Chrome,
    pub view: PartyView,
}

#[derive(Template)]
#[template(path = "message.html")]
pub struct MessageTemplate {
    pub chrome: Chrome,
    pub message: String,
    pub retry_url: Option<String>,
    pub retry_label: String,
}

pub fn render_template<T: Template>(template: T) -> Result<Html<String>, askama::Error> {
    template.render().map(Html)
}
