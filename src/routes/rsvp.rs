//! RSVP form actions.
//!
//! Every button posts the whole form. Plus-one edits and attendance changes
//! just re-render it; only `submit` validates and reaches the backend.

use axum::{
    extract::{Path, State},
    response::{Html, IntoResponse, Response},
    Form,
};
use tracing::{info, instrument, warn};

use crate::error::{AppError, PageError};
use crate::preferences::Preferences;
use crate::routes::invitation::{
    find_guest, find_wedding, invitation_path, invite_code, render_invitation,
};
use crate::rsvp::{thanks_message, FieldErrors, RsvpAction, RsvpForm};
use crate::services::GuestService;
use crate::state::AppState;

/// Posted fields as ordered pairs, so dynamic names such as `event.<id>`
/// and `plus_one_name.<n>` survive.
type PostedFields = Vec<(String, String)>;

fn posted<'a>(fields: &'a PostedFields, name: &str) -> Option<&'a str> {
    fields
        .iter()
        .find(|(key, _)| key == name)
        .map(|(_, value)| value.as_str())
}

/// `POST /w/:wedding_id/rsvp`
#[instrument(skip(state, preferences, fields))]
pub async fn submit(
    State(state): State<AppState>,
    Path(wedding_id): Path<String>,
    preferences: Preferences,
    Form(fields): Form<PostedFields>,
) -> Result<Response, PageError> {
    let invite = invite_code(posted(&fields, "invite")).map(str::to_string);
    handle(&state, &preferences, &wedding_id, invite.as_deref(), &fields)
        .await
        .map(IntoResponse::into_response)
        .map_err(|e| e.into_page(preferences, invitation_path(&wedding_id, invite.as_deref())))
}

async fn handle(
    state: &AppState,
    preferences: &Preferences,
    wedding_id: &str,
    invite: Option<&str>,
    fields: &PostedFields,
) -> Result<Html<String>, AppError> {
    let wedding = find_wedding(state, wedding_id).await?;
    if !wedding.settings.section_visibility.rsvp {
        return Err(AppError::BadRequest("RSVP is not open for this wedding".to_string()));
    }
    let invite = invite.ok_or_else(|| AppError::BadRequest("missing invite code".to_string()))?;
    let mut guest = find_guest(state, &wedding, invite).await?;
    let strings = preferences.language().strings();

    let mut form = RsvpForm::for_guest(&wedding, &guest);
    form.apply_fields(fields.iter().map(|(k, v)| (k.as_str(), v.as_str())));

    let action = posted(fields, "action")
        .and_then(RsvpAction::parse)
        .unwrap_or(RsvpAction::Submit);

    let mut errors = FieldErrors::default();
    let mut notice = None;
    let mut failure = None;
    let mut keep_form = true;

    match action {
        RsvpAction::AddPlusOne => {
            form.add_plus_one();
        }
        RsvpAction::RemovePlusOne(index) => {
            form.remove_plus_one(index);
        }
        RsvpAction::Refresh => {}
        RsvpAction::Submit => match form.validate(state.clock().now()) {
            Err(field_errors) => errors = field_errors,
            Ok(submission) => match state.backend().submit_rsvp(&submission).await {
                Ok(()) => {
                    info!(
                        guest_id = %guest.id,
                        status = submission.rsvp_status.as_str(),
                        "RSVP saved"
                    );
                    guest.rsvp_status = submission.rsvp_status;
                    guest.plus_ones = submission.plus_ones.clone();
                    notice = thanks_message(submission.rsvp_status, strings);
                    keep_form = false;
                }
                Err(e) => {
                    warn!(guest_id = %guest.id, error = %e, "RSVP submission failed");
                    failure = Some(strings.rsvp_submit_failed);
                }
            },
        },
    }

    render_invitation(state, preferences, &wedding, Some(&guest), |localized, section| {
        if keep_form {
            section.show_form(localized, &guest.invite_code, &form, &errors, strings);
        }
        section.notice = notice.map(str::to_string);
        section.error = failure.map(str::to_string);
    })
    .await
}
