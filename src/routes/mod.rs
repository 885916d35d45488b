//! HTTP route handlers.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                              - Invitation for the wedding on this subdomain
//! GET  /health                        - Health check
//!
//! # Invitation
//! GET  /w/:wedding_id                 - Invitation page (?invite=CODE for a guest)
//! POST /w/:wedding_id/rsvp            - RSVP form actions
//! GET  /w/:wedding_id/party           - Wedding party page
//! GET  /w/:wedding_id/countdown       - Countdown (server-sent events)
//!
//! # Preferences
//! POST /preferences                   - Set language/theme cookies, redirect back
//!
//! # API
//! POST /api/translate                 - On-demand translation (JSON)
//! GET  /admin/translation-metrics     - Translation counters (X-API-Key)
//! ```

pub mod api;
pub mod countdown;
pub mod invitation;
pub mod party;
pub mod preferences;
pub mod rsvp;

use axum::{
    http::{header::VARY, HeaderName, HeaderValue},
    middleware,
    response::Response,
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::preferences::COLOR_SCHEME_HINT;
use crate::state::AppState;

const ACCEPT_CH: HeaderName = HeaderName::from_static("accept-ch");

/// Create the per-wedding routes router.
pub fn wedding_routes() -> Router<AppState> {
    Router::new()
        .route("/:wedding_id", get(invitation::show))
        .route("/:wedding_id/rsvp", post(rsvp::submit))
        .route("/:wedding_id/party", get(party::show))
        .route("/:wedding_id/countdown", get(countdown::stream))
}

/// Create the JSON API routes router.
pub fn api_routes() -> Router<AppState> {
    Router::new().route("/translate", post(api::translate))
}

/// Create the admin routes router.
pub fn admin_routes() -> Router<AppState> {
    Router::new().route("/translation-metrics", get(api::translation_metrics))
}

async fn health() -> &'static str {
    "ok"
}

/// Ask browsers for their colour-scheme preference on later requests, and
/// tell caches that pages depend on it and on the language inputs.
async fn client_hints(mut response: Response) -> Response {
    let headers = response.headers_mut();
    headers.insert(ACCEPT_CH, HeaderValue::from_static(COLOR_SCHEME_HINT));
    headers.append(
        VARY,
        HeaderValue::from_static("Sec-CH-Prefers-Color-Scheme, Accept-Language, Cookie"),
    );
    response
}

/// The full application router.
pub fn routes(state: AppState) -> Router {
    Router::new()
        .route("/", get(invitation::home))
        .route("/health", get(health))
        .route("/preferences", post(preferences::update))
        .nest("/w", wedding_routes())
        .nest("/api", api_routes())
        .nest("/admin", admin_routes())
        .layer(middleware::map_response(client_hints))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
