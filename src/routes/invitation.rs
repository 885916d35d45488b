//! Invitation page, by wedding id or by subdomain.

use axum::{
    extract::{Path, Query, State},
    http::{header::HOST, HeaderMap},
    response::{Html, IntoResponse, Response},
};
use serde::Deserialize;
use tracing::instrument;

use crate::error::{AppError, PageError};
use crate::invitation::{self, RsvpSectionView};
use crate::models::{Guest, Wedding};
use crate::preferences::Preferences;
use crate::services::{GuestService, WeddingService};
use crate::state::AppState;
use crate::views::{render_template, Chrome, InvitationTemplate, Page};

#[derive(Debug, Default, Deserialize)]
pub struct InviteQuery {
    pub invite: Option<String>,
}

impl InviteQuery {
    pub fn code(&self) -> Option<&str> {
        invite_code(self.invite.as_deref())
    }
}

/// A blank invite code counts as no code at all.
pub(crate) fn invite_code(raw: Option<&str>) -> Option<&str> {
    raw.map(str::trim).filter(|code| !code.is_empty())
}

/// `path` with the invite code appended as a query string.
pub(crate) fn with_invite(path: &str, invite: Option<&str>) -> String {
    match invite {
        Some(code) => format!(
            "{}?{}",
            path,
            url::form_urlencoded::Serializer::new(String::new())
                .append_pair("invite", code)
                .finish()
        ),
        None => path.to_string(),
    }
}

pub(crate) fn invitation_path(wedding_id: &str, invite: Option<&str>) -> String {
    with_invite(&format!("/w/{}", wedding_id), invite)
}

pub(crate) async fn find_wedding(state: &AppState, wedding_id: &str) -> Result<Wedding, AppError> {
    state
        .backend()
        .wedding_by_id(wedding_id)
        .await?
        .ok_or(AppError::WeddingNotFound)
}

/// Resolve the guest behind an invite code. A code for a removed guest is
/// reported as revoked; a code from another wedding as unknown.
pub(crate) async fn find_guest(
    state: &AppState,
    wedding: &Wedding,
    invite: &str,
) -> Result<Guest, AppError> {
    let guest = state
        .backend()
        .guest_by_invite_code(invite)
        .await?
        .filter(|g| g.wedding_id == wedding.id)
        .ok_or(AppError::GuestNotFound)?;

    if guest.is_deleted {
        return Err(AppError::InvitationRevoked);
    }
    Ok(guest)
}

/// Compose and render the invitation. `customize_rsvp` gets the localized
/// wedding and may adjust the RSVP section before rendering.
pub(crate) async fn render_invitation<F>(
    state: &AppState,
    preferences: &Preferences,
    wedding: &Wedding,
    guest: Option<&Guest>,
    customize_rsvp: F,
) -> Result<Html<String>, AppError>
where
    F: FnOnce(&Wedding, &mut RsvpSectionView),
{
    let language = preferences.language();
    let strings = language.strings();

    let mut localized = wedding.clone();
    localized.settings =
        invitation::localize_settings(state.translations(), &wedding.settings, language).await;

    let mut view = invitation::compose(&localized, guest, language, state.clock().now());
    if let Some(section) = view.rsvp.as_mut() {
        customize_rsvp(&localized, section);
    }

    let invite = guest.map(|g| g.invite_code.as_str());
    let chrome = Chrome::new(preferences, view.title.clone(), invitation_path(&wedding.id, invite))
        .with_colors(&view.primary_color, &view.accent_color)
        .with_wedding_nav(&wedding.id, invite, Page::Invitation, strings);

    Ok(render_template(InvitationTemplate { chrome, view })?)
}

async fn show_wedding(
    state: &AppState,
    preferences: &Preferences,
    wedding: Wedding,
    invite: Option<&str>,
) -> Result<Html<String>, AppError> {
    let guest = match invite {
        Some(code) => Some(find_guest(state, &wedding, code).await?),
        None => None,
    };
    render_invitation(state, preferences, &wedding, guest.as_ref(), |_, _| {}).await
}

/// `GET /w/:wedding_id`
#[instrument(skip(state, preferences, query))]
pub async fn show(
    State(state): State<AppState>,
    Path(wedding_id): Path<String>,
    Query(query): Query<InviteQuery>,
    preferences: Preferences,
) -> Result<Response, PageError> {
    let invite = query.code();
    let result = match find_wedding(&state, &wedding_id).await {
        Ok(wedding) => show_wedding(&state, &preferences, wedding, invite).await,
        Err(e) => Err(e),
    };
    result
        .map(IntoResponse::into_response)
        .map_err(|e| e.into_page(preferences, invitation_path(&wedding_id, invite)))
}

/// Subdomain of `base_domain` named by a `Host` header, if any.
pub(crate) fn subdomain_of(host: &str, base_domain: &str) -> Option<String> {
    let host = host.trim().to_ascii_lowercase();
    let host = host.split(':').next().unwrap_or_default();
    let label = host.strip_suffix(base_domain)?.strip_suffix('.')?;
    if label.is_empty() || label.contains('.') || label == "www" {
        return None;
    }
    Some(label.to_string())
}

async fn wedding_for_host(state: &AppState, headers: &HeaderMap) -> Result<Wedding, AppError> {
    let subdomain = state
        .config()
        .base_domain
        .as_deref()
        .and_then(|base| {
            headers
                .get(HOST)
                .and_then(|v| v.to_str().ok())
                .and_then(|host| subdomain_of(host, base))
        })
        .ok_or(AppError::WeddingNotFound)?;

    state
        .backend()
        .wedding_by_subdomain(&subdomain)
        .await?
        .ok_or(AppError::WeddingNotFound)
}

/// `GET /`: the wedding is chosen by the subdomain the site is served on.
#[instrument(skip(state, preferences, headers, query))]
pub async fn home(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<InviteQuery>,
    preferences: Preferences,
) -> Result<Response, PageError> {
    let invite = query.code();
    let result = match wedding_for_host(&state, &headers).await {
        Ok(wedding) => show_wedding(&state, &preferences, wedding, invite).await,
        Err(e) => Err(e),
    };
    result
        .map(IntoResponse::into_response)
        .map_err(|e| e.into_page(preferences, with_invite("/", invite)))
}
