//! Wedding party page.

use axum::{
    extract::{Path, Query, State},
    response::{Html, IntoResponse, Response},
};
use tracing::instrument;

use crate::error::{AppError, PageError};
use crate::invitation::sanitize_theme;
use crate::party;
use crate::preferences::Preferences;
use crate::routes::invitation::{find_wedding, with_invite, InviteQuery};
use crate::services::WeddingPartyService;
use crate::state::AppState;
use crate::views::{render_template, Chrome, Page, PartyTemplate};

async fn render(
    state: &AppState,
    preferences: &Preferences,
    wedding_id: &str,
    invite: Option<&str>,
) -> Result<Html<String>, AppError> {
    let wedding = find_wedding(state, wedding_id).await?;
    let members = state.backend().party_members(&wedding.id).await?;
    let language = preferences.language();

    let view = party::compose(&wedding, &members, language, state.translations()).await;
    let theme = sanitize_theme(&wedding.settings.theme);
    let chrome = Chrome::new(
        preferences,
        format!("{} · {}", view.title, view.couple_names),
        with_invite(&format!("/w/{}/party", wedding.id), invite),
    )
    .with_colors(&theme.primary_color, &theme.accent_color)
    .with_wedding_nav(&wedding.id, invite, Page::Party, language.strings());

    Ok(render_template(PartyTemplate { chrome, view })?)
}

/// `GET /w/:wedding_id/party`
#[instrument(skip(state, preferences, query))]
pub async fn show(
    State(state): State<AppState>,
    Path(wedding_id): Path<String>,
    Query(query): Query<InviteQuery>,
    preferences: Preferences,
) -> Result<Response, PageError> {
    let invite = query.code();
    render(&state, &preferences, &wedding_id, invite)
        .await
        .map(IntoResponse::into_response)
        .map_err(|e| {
            e.into_page(
                preferences,
                with_invite(&format!("/w/{}/party", wedding_id), invite),
            )
        })
}
