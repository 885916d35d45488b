//! Unified error handling.
//!
//! Handlers return `Result<T, AppError>`. API and admin routes respond with
//! plain text; guest-facing pages wrap the error in a `PageError` so the
//! guest sees a localized message page instead.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::i18n::LanguageStrings;
use crate::preferences::Preferences;
use crate::services::ServiceError;
use crate::views::{render_template, Chrome, MessageTemplate};

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Wedding not found")]
    WeddingNotFound,

    #[error("Guest not found")]
    GuestNotFound,

    /// The invite code belongs to a guest that was removed.
    #[error("Invitation revoked")]
    InvitationRevoked,

    #[error("Service error: {0}")]
    Service(#[from] ServiceError),

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<askama::Error> for AppError {
    fn from(err: askama::Error) -> Self {
        AppError::Internal(format!("template rendering failed: {}", err))
    }
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::WeddingNotFound | Self::GuestNotFound => StatusCode::NOT_FOUND,
            Self::InvitationRevoked => StatusCode::GONE,
            Self::Service(ServiceError::Unavailable(_)) => StatusCode::SERVICE_UNAVAILABLE,
            Self::Service(ServiceError::Backend(_)) => StatusCode::BAD_GATEWAY,
            Self::Service(ServiceError::Decode(_)) | Self::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
        }
    }

    /// Whether trying again later may succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::Service(ServiceError::Unavailable(_)) | Self::Service(ServiceError::Backend(_))
        )
    }

    /// Guest-facing message. Never includes internal detail.
    pub fn localized_message(&self, strings: &LanguageStrings) -> &'static str {
        match self {
            Self::WeddingNotFound => strings.wedding_not_found,
            Self::GuestNotFound => strings.guest_not_found,
            Self::InvitationRevoked => strings.invitation_revoked,
            Self::Service(ServiceError::Unavailable(_))
            | Self::Service(ServiceError::Backend(_)) => strings.unavailable,
            _ => strings.error_generic,
        }
    }

    /// Render as a localized page. `retry_url` is only offered when the
    /// error is retryable.
    pub fn into_page(self, preferences: Preferences, retry_url: impl Into<String>) -> PageError {
        PageError {
            error: self,
            preferences,
            retry_url: retry_url.into(),
        }
    }

    fn log(&self) {
        if self.status().is_server_error() {
            tracing::error!(error = %self, "Request error");
        } else {
            tracing::debug!(error = %self, "Request rejected");
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        self.log();

        let status = self.status();

        // Don't expose internal error details to clients
        let message = match &self {
            Self::Service(_) | Self::Internal(_) => status
                .canonical_reason()
                .unwrap_or("Internal server error")
                .to_string(),
            _ => self.to_string(),
        };

        (status, message).into_response()
    }
}

/// An `AppError` shown to a guest as a localized page.
#[derive(Debug)]
pub struct PageError {
    error: AppError,
    preferences: Preferences,
    retry_url: String,
}

impl PageError {
    pub fn error(&self) -> &AppError {
        &self.error
    }
}

impl IntoResponse for PageError {
    fn into_response(self) -> Response {
        self.error.log();

        let strings = self.preferences.language().strings();
        let status = self.error.status();
        let message = self.error.localized_message(strings);
        let template = MessageTemplate {
            chrome: Chrome::new(&self.preferences, message, self.retry_url.clone()),
            message: message.to_string(),
            retry_url: self.error.is_retryable().then_some(self.retry_url),
            retry_label: strings.retry.to_string(),
        };

        match render_template(template) {
            Ok(html) => (status, html).into_response(),
            Err(e) => {
                tracing::error!(error = %e, "Failed to render error page");
                (status, message).into_response()
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::Language;
    use crate::preferences::PreferenceChange;

    #[test]
    fn test_status_mapping() {
        assert_eq!(AppError::WeddingNotFound.status(), StatusCode::NOT_FOUND);
        assert_eq!(AppError::InvitationRevoked.status(), StatusCode::GONE);
        assert_eq!(
            AppError::Service(ServiceError::Unavailable("down".into())).status(),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            AppError::Service(ServiceError::Decode("bad".into())).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(AppError::Unauthorized.status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn test_only_backend_failures_are_retryable() {
        assert!(AppError::Service(ServiceError::Unavailable("x".into())).is_retryable());
        assert!(AppError::Service(ServiceError::Backend("x".into())).is_retryable());
        assert!(!AppError::WeddingNotFound.is_retryable());
        assert!(!AppError::Internal("x".into()).is_retryable());
    }

    #[test]
    fn test_revoked_message_differs_from_not_found() {
        let strings = Language::SPANISH.strings();
        assert_ne!(
            AppError::InvitationRevoked.localized_message(strings),
            AppError::GuestNotFound.localized_message(strings)
        );
        assert_eq!(
            AppError::Internal("secret".into()).localized_message(strings),
            strings.error_generic
        );
    }

    #[tokio::test]
    async fn test_internal_detail_is_hidden() {
        let response = AppError::Internal("db password wrong".into()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert!(!String::from_utf8_lossy(&body).contains("password"));
    }

    #[tokio::test]
    async fn test_page_error_renders_localized_retry() {
        let mut prefs = Preferences::default();
        prefs.apply(PreferenceChange::Language(Language::SPANISH));

        let response = AppError::Service(ServiceError::Unavailable("timeout".into()))
            .into_page(prefs, "/w/w1")
            .into_response();

        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let html = String::from_utf8_lossy(&body);
        assert!(html.contains(Language::SPANISH.strings().retry));
        assert!(!html.contains("timeout"));
    }
}
