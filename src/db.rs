//! Postgres backend.
//!
//! Tables:
//! - `weddings`: one row per wedding, settings as JSONB
//! - `guests`: invitees, looked up by invite code
//! - `rsvp_responses`: every submitted RSVP payload, append-only
//! - `wedding_party_members`: roster rows
//! - `kv_store`: translation cache entries

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use sqlx::postgres::PgPoolOptions;
use sqlx::types::Json;
use sqlx::PgPool;
use tracing::{debug, info};

use crate::models::{
    Guest, PlusOne, RsvpStatus, RsvpSubmission, Wedding, WeddingPartyMember, WeddingSettings,
};
use crate::retry::{with_retry_if, RetryConfig};
use crate::services::{GuestService, ServiceError, WeddingPartyService, WeddingService};
use crate::storage::{KeyValueStore, StorageError};

const SCHEMA: &[&str] = &[
    "CREATE TABLE IF NOT EXISTS weddings (
        id TEXT PRIMARY KEY,
        subdomain TEXT UNIQUE,
        partner_one TEXT NOT NULL,
        partner_two TEXT NOT NULL,
        wedding_date TIMESTAMPTZ NOT NULL,
        settings JSONB NOT NULL DEFAULT '{}'::jsonb
    )",
    "CREATE TABLE IF NOT EXISTS guests (
        id TEXT PRIMARY KEY,
        wedding_id TEXT NOT NULL REFERENCES weddings(id),
        name TEXT NOT NULL,
        invite_code TEXT NOT NULL UNIQUE,
        rsvp_status TEXT NOT NULL DEFAULT 'pending',
        max_plus_ones SMALLINT,
        email TEXT,
        phone TEXT,
        is_deleted BOOLEAN NOT NULL DEFAULT FALSE,
        invited_events JSONB NOT NULL DEFAULT '[]'::jsonb,
        plus_ones JSONB NOT NULL DEFAULT '[]'::jsonb,
        dietary_restrictions TEXT
    )",
    "CREATE TABLE IF NOT EXISTS rsvp_responses (
        id BIGSERIAL PRIMARY KEY,
        wedding_id TEXT NOT NULL,
        guest_id TEXT NOT NULL REFERENCES guests(id),
        payload JSONB NOT NULL,
        submitted_at TIMESTAMPTZ NOT NULL
    )",
    "CREATE TABLE IF NOT EXISTS wedding_party_members (
        id TEXT PRIMARY KEY,
        wedding_id TEXT NOT NULL REFERENCES weddings(id),
        name TEXT NOT NULL,
        role TEXT NOT NULL,
        side TEXT NOT NULL,
        display_order INTEGER NOT NULL DEFAULT 0,
        photo_url TEXT,
        bio TEXT
    )",
    "CREATE TABLE IF NOT EXISTS kv_store (
        key TEXT PRIMARY KEY,
        value JSONB NOT NULL,
        updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
    )",
];

#[derive(Debug, sqlx::FromRow)]
struct WeddingRow {
    id: String,
    subdomain: Option<String>,
    partner_one: String,
    partner_two: String,
    wedding_date: DateTime<Utc>,
    settings: Json<serde_json::Value>,
}

#[derive(Debug, sqlx::FromRow)]
struct GuestRow {
    id: String,
    wedding_id: String,
    name: String,
    invite_code: String,
    rsvp_status: String,
    max_plus_ones: Option<i16>,
    email: Option<String>,
    phone: Option<String>,
    is_deleted: bool,
    invited_events: Json<Vec<String>>,
    plus_ones: Json<Vec<PlusOne>>,
    dietary_restrictions: Option<String>,
}

#[derive(Debug, sqlx::FromRow)]
struct PartyMemberRow {
    id: String,
    wedding_id: String,
    name: String,
    role: String,
    side: String,
    display_order: i32,
    photo_url: Option<String>,
    bio: Option<String>,
}

/// Parse a snake_case enum stored as text.
fn parse_text_enum<T: DeserializeOwned>(value: &str) -> Result<T, ServiceError> {
    Ok(serde_json::from_value(serde_json::Value::String(value.to_string()))?)
}

impl TryFrom<WeddingRow> for Wedding {
    type Error = ServiceError;

    fn try_from(row: WeddingRow) -> Result<Self, Self::Error> {
        let settings: WeddingSettings = serde_json::from_value(row.settings.0)?;
        Ok(Wedding {
            id: row.id,
            subdomain: row.subdomain,
            partner_one: row.partner_one,
            partner_two: row.partner_two,
            wedding_date: row.wedding_date,
            settings,
        })
    }
}

impl TryFrom<GuestRow> for Guest {
    type Error = ServiceError;

    fn try_from(row: GuestRow) -> Result<Self, Self::Error> {
        let rsvp_status = RsvpStatus::parse(&row.rsvp_status).ok_or_else(|| {
            ServiceError::Decode(format!("unknown rsvp status '{}'", row.rsvp_status))
        })?;
        let max_plus_ones = row
            .max_plus_ones
            .map(|n| u8::try_from(n.max(0)).unwrap_or(u8::MAX));

        Ok(Guest {
            id: row.id,
            wedding_id: row.wedding_id,
            name: row.name,
            invite_code: row.invite_code,
            rsvp_status,
            max_plus_ones,
            email: row.email,
            phone: row.phone,
            is_deleted: row.is_deleted,
            invited_events: row.invited_events.0,
            plus_ones: row.plus_ones.0,
            dietary_restrictions: row.dietary_restrictions,
        })
    }
}

impl TryFrom<PartyMemberRow> for WeddingPartyMember {
    type Error = ServiceError;

    fn try_from(row: PartyMemberRow) -> Result<Self, Self::Error> {
        Ok(WeddingPartyMember {
            id: row.id,
            wedding_id: row.wedding_id,
            name: row.name,
            role: parse_text_enum(&row.role)?,
            side: parse_text_enum(&row.side)?,
            display_order: row.display_order,
            photo_url: row.photo_url,
            bio: row.bio,
        })
    }
}

fn is_connect_error(err: &sqlx::Error) -> bool {
    matches!(
        err,
        sqlx::Error::Io(_) | sqlx::Error::PoolTimedOut | sqlx::Error::Tls(_)
    )
}

#[derive(Clone)]
pub struct Database {
    pool: PgPool,
}

impl Database {
    /// Connect, retrying while the server is unreachable, and create the
    /// tables that do not exist yet.
    pub async fn connect(database_url: &str) -> Result<Self, sqlx::Error> {
        let pool = with_retry_if(
            &RetryConfig::database_connect(),
            "Database connect",
            || {
                PgPoolOptions::new()
                    .max_connections(10)
                    .acquire_timeout(Duration::from_secs(10))
                    .connect(database_url)
            },
            is_connect_error,
        )
        .await?;

        let db = Self { pool };
        db.ensure_schema().await?;
        info!("Database ready");
        Ok(db)
    }

    async fn ensure_schema(&self) -> Result<(), sqlx::Error> {
        for statement in SCHEMA {
            sqlx::query(statement).execute(&self.pool).await?;
        }
        Ok(())
    }
}

const WEDDING_COLUMNS: &str = "id, subdomain, partner_one, partner_two, wedding_date, settings";

#[async_trait]
impl WeddingService for Database {
    async fn wedding_by_id(&self, id: &str) -> Result<Option<Wedding>, ServiceError> {
        let row: Option<WeddingRow> =
            sqlx::query_as(&format!("SELECT {} FROM weddings WHERE id = $1", WEDDING_COLUMNS))
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;
        row.map(Wedding::try_from).transpose()
    }

    async fn wedding_by_subdomain(
        &self,
        subdomain: &str,
    ) -> Result<Option<Wedding>, ServiceError> {
        let row: Option<WeddingRow> = sqlx::query_as(&format!(
            "SELECT {} FROM weddings WHERE lower(subdomain) = lower($1)",
            WEDDING_COLUMNS
        ))
        .bind(subdomain)
        .fetch_optional(&self.pool)
        .await?;
        row.map(Wedding::try_from).transpose()
    }
}

#[async_trait]
impl GuestService for Database {
    async fn guest_by_invite_code(&self, invite_code: &str) -> Result<Option<Guest>, ServiceError> {
        let row: Option<GuestRow> = sqlx::query_as(
            "SELECT id, wedding_id, name, invite_code, rsvp_status, max_plus_ones, email, phone,
                    is_deleted, invited_events, plus_ones, dietary_restrictions
             FROM guests WHERE invite_code = $1",
        )
        .bind(invite_code)
        .fetch_optional(&self.pool)
        .await?;
        row.map(Guest::try_from).transpose()
    }

    async fn submit_rsvp(&self, submission: &RsvpSubmission) -> Result<(), ServiceError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            "INSERT INTO rsvp_responses (wedding_id, guest_id, payload, submitted_at)
             VALUES ($1, $2, $3, $4)",
        )
        .bind(&submission.wedding_id)
        .bind(&submission.guest_id)
        .bind(Json(submission))
        .bind(submission.submitted_at)
        .execute(&mut *tx)
        .await?;

        let updated = sqlx::query(
            "UPDATE guests
             SET rsvp_status = $1,
                 plus_ones = $2,
                 dietary_restrictions = COALESCE($3, dietary_restrictions),
                 email = COALESCE($4, email),
                 phone = COALESCE($5, phone)
             WHERE id = $6 AND wedding_id = $7 AND NOT is_deleted",
        )
        .bind(submission.rsvp_status.as_str())
        .bind(Json(&submission.plus_ones))
        .bind(&submission.dietary_restrictions)
        .bind(&submission.contact_email)
        .bind(&submission.contact_phone)
        .bind(&submission.guest_id)
        .bind(&submission.wedding_id)
        .execute(&mut *tx)
        .await?;

        if updated.rows_affected() == 0 {
            return Err(ServiceError::Backend(format!(
                "guest {} is not an active guest of wedding {}",
                submission.guest_id, submission.wedding_id
            )));
        }

        tx.commit().await?;
        debug!("Stored RSVP for guest {}", submission.guest_id);
        Ok(())
    }
}

#[async_trait]
impl WeddingPartyService for Database {
    async fn party_members(
        &self,
        wedding_id: &str,
    ) -> Result<Vec<WeddingPartyMember>, ServiceError> {
        let rows: Vec<PartyMemberRow> = sqlx::query_as(
            "SELECT id, wedding_id, name, role, side, display_order, photo_url, bio
             FROM wedding_party_members
             WHERE wedding_id = $1
             ORDER BY display_order, name",
        )
        .bind(wedding_id)
        .fetch_all(&self.pool)
        .await?;
        rows.into_iter().map(WeddingPartyMember::try_from).collect()
    }
}

#[async_trait]
impl KeyValueStore for Database {
    async fn get(&self, key: &str) -> Result<Option<serde_json::Value>, StorageError> {
        let value: Option<(Json<serde_json::Value>,)> =
            sqlx::query_as("SELECT value FROM kv_store WHERE key = $1")
                .bind(key)
                .fetch_optional(&self.pool)
                .await?;
        Ok(value.map(|(json,)| json.0))
    }

    async fn set(&self, key: &str, value: serde_json::Value) -> Result<(), StorageError> {
        sqlx::query(
            "INSERT INTO kv_store (key, value, updated_at) VALUES ($1, $2, NOW())
             ON CONFLICT (key) DO UPDATE SET value = EXCLUDED.value, updated_at = EXCLUDED.updated_at",
        )
        .bind(key)
        .bind(Json(value))
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{PartyRole, PartySide};
    use chrono::TimeZone;

    fn guest_row(status: &str) -> GuestRow {
        GuestRow {
            id: "g1".to_string(),
            wedding_id: "w1".to_string(),
            name: "Eva".to_string(),
            invite_code: "EVA123".to_string(),
            rsvp_status: status.to_string(),
            max_plus_ones: Some(2),
            email: None,
            phone: None,
            is_deleted: false,
            invited_events: Json(vec!["ceremony".to_string()]),
            plus_ones: Json(Vec::new()),
            dietary_restrictions: None,
        }
    }

    #[test]
    fn test_schema_creates_every_table_idempotently() {
        for table in ["weddings", "guests", "rsvp_responses", "wedding_party_members", "kv_store"] {
            assert!(SCHEMA
                .iter()
                .any(|s| s.contains(&format!("CREATE TABLE IF NOT EXISTS {} (", table))));
        }
    }

    #[test]
    fn test_wedding_row_with_sparse_settings() {
        let row = WeddingRow {
            id: "w1".to_string(),
            subdomain: Some("ana-luis".to_string()),
            partner_one: "Ana".to_string(),
            partner_two: "Luis".to_string(),
            wedding_date: Utc.with_ymd_and_hms(2027, 5, 1, 22, 0, 0).unwrap(),
            settings: Json(serde_json::json!({"sectionVisibility": {"gallery": false}})),
        };

        let wedding = Wedding::try_from(row).unwrap();

        assert!(!wedding.settings.section_visibility.gallery);
        assert!(wedding.settings.section_visibility.rsvp);
    }

    #[test]
    fn test_guest_row_conversion() {
        let guest = Guest::try_from(guest_row("maybe")).unwrap();
        assert_eq!(guest.rsvp_status, RsvpStatus::Maybe);
        assert_eq!(guest.max_plus_ones, Some(2));
        assert!(guest.is_invited_to("ceremony"));
    }

    #[test]
    fn test_guest_row_with_unknown_status_is_decode_error() {
        let err = Guest::try_from(guest_row("attending")).unwrap_err();
        assert!(matches!(err, ServiceError::Decode(_)));
    }

    #[test]
    fn test_party_member_row_conversion() {
        let row = PartyMemberRow {
            id: "m1".to_string(),
            wedding_id: "w1".to_string(),
            name: "Rosa y Jorge".to_string(),
            role: "padrinos_arras".to_string(),
            side: "couple".to_string(),
            display_order: 3,
            photo_url: None,
            bio: None,
        };
        let member = WeddingPartyMember::try_from(row).unwrap();
        assert_eq!(member.role, PartyRole::PadrinosArras);
        assert_eq!(member.side, PartySide::Couple);
    }

    #[test]
    fn test_connect_error_classification() {
        assert!(is_connect_error(&sqlx::Error::PoolTimedOut));
        assert!(!is_connect_error(&sqlx::Error::RowNotFound));
    }
}
