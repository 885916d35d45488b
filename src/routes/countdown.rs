//! Live countdown as server-sent events.

use std::time::Duration;

use axum::{
    extract::{Path, State},
    response::sse::{Event, KeepAlive, Sse},
};
use futures::{Stream, StreamExt};
use tracing::instrument;

use crate::countdown;
use crate::error::AppError;
use crate::routes::invitation::find_wedding;
use crate::state::AppState;

const TICK: Duration = Duration::from_secs(1);

/// `GET /w/:wedding_id/countdown`
///
/// One JSON event per second; the stream ends after the zero value.
#[instrument(skip(state))]
pub async fn stream(
    State(state): State<AppState>,
    Path(wedding_id): Path<String>,
) -> Result<Sse<impl Stream<Item = Result<Event, axum::Error>>>, AppError> {
    let wedding = find_wedding(&state, &wedding_id).await?;

    let events = countdown::ticks(wedding.wedding_date, state.clock(), TICK)
        .map(|parts| Event::default().json_data(parts));

    Ok(Sse::new(events).keep_alive(KeepAlive::default()))
}
