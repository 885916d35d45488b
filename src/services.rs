//! Contracts of the backend collaborators the site reads from and writes to.
//!
//! The invitation site owns no data. Weddings, guests, RSVP responses and the
//! wedding party live behind these traits; `db::Database` implements them on
//! Postgres and `memory::MemoryBackend` in process.

use async_trait::async_trait;
use thiserror::Error;

use crate::models::{Guest, RsvpSubmission, Wedding, WeddingPartyMember};

#[derive(Debug, Error)]
pub enum ServiceError {
    /// The backend could not be reached or timed out.
    #[error("backend unavailable: {0}")]
    Unavailable(String),

    /// The backend answered with an error.
    #[error("backend error: {0}")]
    Backend(String),

    /// The backend answered with a record this site cannot read.
    #[error("malformed record: {0}")]
    Decode(String),
}

impl From<sqlx::Error> for ServiceError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => {
                ServiceError::Unavailable(err.to_string())
            }
            sqlx::Error::ColumnDecode { .. } | sqlx::Error::Decode(_) => {
                ServiceError::Decode(err.to_string())
            }
            other => ServiceError::Backend(other.to_string()),
        }
    }
}

impl From<serde_json::Error> for ServiceError {
    fn from(err: serde_json::Error) -> Self {
        ServiceError::Decode(err.to_string())
    }
}

#[async_trait]
pub trait WeddingService: Send + Sync {
    async fn wedding_by_id(&self, id: &str) -> Result<Option<Wedding>, ServiceError>;

    async fn wedding_by_subdomain(&self, subdomain: &str)
        -> Result<Option<Wedding>, ServiceError>;
}

#[async_trait]
pub trait GuestService: Send + Sync {
    /// Look up a guest by invite code. Deleted guests are returned with
    /// `is_deleted` set so the caller can tell "revoked" from "unknown".
    async fn guest_by_invite_code(&self, invite_code: &str) -> Result<Option<Guest>, ServiceError>;

    async fn submit_rsvp(&self, submission: &RsvpSubmission) -> Result<(), ServiceError>;
}

#[async_trait]
pub trait WeddingPartyService: Send + Sync {
    /// Members of the wedding party ordered by display order.
    async fn party_members(&self, wedding_id: &str)
        -> Result<Vec<WeddingPartyMember>, ServiceError>;
}

/// Everything the site needs from the backend, behind one object.
pub trait Backend: WeddingService + GuestService + WeddingPartyService {}

impl<T> Backend for T where T: WeddingService + GuestService + WeddingPartyService {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sqlx_pool_timeout_is_unavailable() {
        let err: ServiceError = sqlx::Error::PoolTimedOut.into();
        assert!(matches!(err, ServiceError::Unavailable(_)));
    }

    #[test]
    fn test_sqlx_row_not_found_is_backend_error() {
        let err: ServiceError = sqlx::Error::RowNotFound.into();
        assert!(matches!(err, ServiceError::Backend(_)));
    }

    #[test]
    fn test_json_error_is_decode() {
        let json_err = serde_json::from_str::<u32>("nope").unwrap_err();
        let err: ServiceError = json_err.into();
        assert!(matches!(err, ServiceError::Decode(_)));
        assert!(err.to_string().starts_with("malformed record"));
    }
}
