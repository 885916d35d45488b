//! In-process backend, seeded from a JSON file.
//!
//! Used for local development, previews and tests. Submissions update the
//! guest's status and plus-ones the same way the Postgres backend does and
//! are also kept in a list for inspection.

use std::path::Path;
use std::sync::RwLock;

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, info};

use crate::models::{Guest, RsvpSubmission, Wedding, WeddingPartyMember};
use crate::services::{GuestService, ServiceError, WeddingPartyService, WeddingService};

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Seed {
    pub weddings: Vec<Wedding>,
    pub guests: Vec<Guest>,
    pub party: Vec<WeddingPartyMember>,
}

#[derive(Debug, Default)]
pub struct MemoryBackend {
    weddings: RwLock<Vec<Wedding>>,
    guests: RwLock<Vec<Guest>>,
    party: RwLock<Vec<WeddingPartyMember>>,
    submissions: RwLock<Vec<RsvpSubmission>>,
    fail_submissions: RwLock<Option<String>>,
}

fn poisoned<E: std::fmt::Display>(err: E) -> ServiceError {
    ServiceError::Backend(format!("lock poisoned: {}", err))
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_seed(seed: Seed) -> Self {
        Self {
            weddings: RwLock::new(seed.weddings),
            guests: RwLock::new(seed.guests),
            party: RwLock::new(seed.party),
            ..Self::default()
        }
    }

    pub fn from_seed_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read seed file {}", path.display()))?;
        let seed: Seed = serde_json::from_str(&raw)
            .with_context(|| format!("Failed to parse seed file {}", path.display()))?;
        info!(
            "Loaded seed: {} weddings, {} guests, {} party members",
            seed.weddings.len(),
            seed.guests.len(),
            seed.party.len()
        );
        Ok(Self::from_seed(seed))
    }

    /// Ids of the seeded weddings, in seed order.
    pub fn wedding_ids(&self) -> Vec<String> {
        self.weddings
            .read()
            .map(|w| w.iter().map(|w| w.id.clone()).collect())
            .unwrap_or_default()
    }

    /// Every submission accepted so far, oldest first.
    pub fn submissions(&self) -> Vec<RsvpSubmission> {
        self.submissions
            .read()
            .map(|s| s.clone())
            .unwrap_or_default()
    }

    /// Make every following submission fail as if the backend were down.
    /// `None` restores normal behavior.
    pub fn fail_submissions_with(&self, reason: Option<&str>) {
        if let Ok(mut slot) = self.fail_submissions.write() {
            *slot = reason.map(str::to_string);
        }
    }
}

#[async_trait]
impl WeddingService for MemoryBackend {
    async fn wedding_by_id(&self, id: &str) -> Result<Option<Wedding>, ServiceError> {
        let weddings = self.weddings.read().map_err(poisoned)?;
        Ok(weddings.iter().find(|w| w.id == id).cloned())
    }

    async fn wedding_by_subdomain(
        &self,
        subdomain: &str,
    ) -> Result<Option<Wedding>, ServiceError> {
        let weddings = self.weddings.read().map_err(poisoned)?;
        Ok(weddings
            .iter()
            .find(|w| {
                w.subdomain
                    .as_deref()
                    .is_some_and(|s| s.eq_ignore_ascii_case(subdomain))
            })
            .cloned())
    }
}

#[async_trait]
impl GuestService for MemoryBackend {
    async fn guest_by_invite_code(&self, invite_code: &str) -> Result<Option<Guest>, ServiceError> {
        let guests = self.guests.read().map_err(poisoned)?;
        Ok(guests.iter().find(|g| g.invite_code == invite_code).cloned())
    }

    async fn submit_rsvp(&self, submission: &RsvpSubmission) -> Result<(), ServiceError> {
        if let Some(reason) = self.fail_submissions.read().map_err(poisoned)?.clone() {
            return Err(ServiceError::Unavailable(reason));
        }

        {
            let mut guests = self.guests.write().map_err(poisoned)?;
            let guest = guests
                .iter_mut()
                .find(|g| {
                    g.id == submission.guest_id
                        && g.wedding_id == submission.wedding_id
                        && !g.is_deleted
                })
                .ok_or_else(|| {
                    ServiceError::Backend(format!(
                        "guest {} is not an active guest of wedding {}",
                        submission.guest_id, submission.wedding_id
                    ))
                })?;

            guest.rsvp_status = submission.rsvp_status;
            guest.plus_ones = submission.plus_ones.clone();
            if submission.dietary_restrictions.is_some() {
                guest.dietary_restrictions = submission.dietary_restrictions.clone();
            }
            if submission.contact_email.is_some() {
                guest.email = submission.contact_email.clone();
            }
            if submission.contact_phone.is_some() {
                guest.phone = submission.contact_phone.clone();
            }
        }

        self.submissions
            .write()
            .map_err(poisoned)?
            .push(submission.clone());
        debug!("Stored RSVP for guest {}", submission.guest_id);
        Ok(())
    }
}

#[async_trait]
impl WeddingPartyService for MemoryBackend {
    async fn party_members(
        &self,
        wedding_id: &str,
    ) -> Result<Vec<WeddingPartyMember>, ServiceError> {
        let party = self.party.read().map_err(poisoned)?;
        let mut members: Vec<_> = party
            .iter()
            .filter(|m| m.wedding_id == wedding_id)
            .cloned()
            .collect();
        members.sort_by(|a, b| {
            a.display_order
                .cmp(&b.display_order)
                .then_with(|| a.name.cmp(&b.name))
        });
        Ok(members)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{PlusOne, RsvpStatus};
    use chrono::Utc;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const SEED: &str = r#"{
        "weddings": [
            {
                "id": "w1",
                "subdomain": "ana-luis",
                "partnerOne": "Ana",
                "partnerTwo": "Luis",
                "weddingDate": "2027-05-01T22:00:00Z"
            }
        ],
        "guests": [
            {"id": "g1", "weddingId": "w1", "name": "Eva", "inviteCode": "EVA123"},
            {"id": "g2", "weddingId": "w1", "name": "Old", "inviteCode": "OLD999", "isDeleted": true}
        ],
        "party": [
            {"id": "m2", "weddingId": "w1", "name": "Zoe", "role": "bridesmaid", "side": "bride", "displayOrder": 2},
            {"id": "m1", "weddingId": "w1", "name": "Lia", "role": "maid_of_honor", "side": "bride", "displayOrder": 1},
            {"id": "m3", "weddingId": "w2", "name": "Other", "role": "usher", "side": "groom"}
        ]
    }"#;

    fn seeded() -> MemoryBackend {
        MemoryBackend::from_seed(serde_json::from_str(SEED).unwrap())
    }

    fn submission(guest_id: &str, status: RsvpStatus) -> RsvpSubmission {
        RsvpSubmission {
            wedding_id: "w1".to_string(),
            guest_id: guest_id.to_string(),
            rsvp_status: status,
            event_attendance: Vec::new(),
            plus_ones: vec![PlusOne {
                name: "Tom".to_string(),
                dietary_restrictions: None,
            }],
            dietary_restrictions: Some("vegetarian".to_string()),
            needs_transportation: false,
            needs_accommodation: false,
            contact_email: None,
            contact_phone: None,
            emergency_contact_name: None,
            emergency_contact_phone: None,
            message: None,
            submitted_at: Utc::now(),
        }
    }

    // ==================== Seed Loading ====================

    #[test]
    fn test_from_seed_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(SEED.as_bytes()).unwrap();

        let backend = MemoryBackend::from_seed_file(file.path()).unwrap();

        assert_eq!(backend.wedding_ids(), vec!["w1".to_string()]);
        assert_eq!(backend.guests.read().unwrap().len(), 2);
    }

    #[test]
    fn test_from_seed_file_reports_parse_errors() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"{ not json").unwrap();

        let err = MemoryBackend::from_seed_file(file.path()).unwrap_err();
        assert!(err.to_string().contains("Failed to parse seed file"));
    }

    #[test]
    fn test_from_missing_seed_file() {
        let err = MemoryBackend::from_seed_file("/nonexistent/seed.json").unwrap_err();
        assert!(err.to_string().contains("Failed to read seed file"));
    }

    // ==================== Lookups ====================

    #[tokio::test]
    async fn test_wedding_lookups() {
        let backend = seeded();
        assert!(backend.wedding_by_id("w1").await.unwrap().is_some());
        assert!(backend.wedding_by_id("nope").await.unwrap().is_none());
        assert!(backend
            .wedding_by_subdomain("ANA-LUIS")
            .await
            .unwrap()
            .is_some());
    }

    #[tokio::test]
    async fn test_deleted_guest_is_still_returned() {
        let backend = seeded();
        let guest = backend.guest_by_invite_code("OLD999").await.unwrap().unwrap();
        assert!(guest.is_deleted);
        assert!(backend.guest_by_invite_code("nope").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_party_members_filtered_and_ordered() {
        let backend = seeded();
        let members = backend.party_members("w1").await.unwrap();
        let names: Vec<_> = members.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["Lia", "Zoe"]);
    }

    // ==================== Submissions ====================

    #[tokio::test]
    async fn test_submit_updates_guest() {
        let backend = seeded();

        backend
            .submit_rsvp(&submission("g1", RsvpStatus::Confirmed))
            .await
            .unwrap();

        let guest = backend.guest_by_invite_code("EVA123").await.unwrap().unwrap();
        assert_eq!(guest.rsvp_status, RsvpStatus::Confirmed);
        assert_eq!(guest.plus_ones.len(), 1);
        assert_eq!(guest.dietary_restrictions.as_deref(), Some("vegetarian"));
        assert_eq!(backend.submissions().len(), 1);
    }

    #[tokio::test]
    async fn test_submit_for_deleted_guest_fails() {
        let backend = seeded();
        let err = backend
            .submit_rsvp(&submission("g2", RsvpStatus::Confirmed))
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Backend(_)));
        assert!(backend.submissions().is_empty());
    }

    #[tokio::test]
    async fn test_injected_submission_failure() {
        let backend = seeded();
        backend.fail_submissions_with(Some("connection reset"));

        let err = backend
            .submit_rsvp(&submission("g1", RsvpStatus::Declined))
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Unavailable(_)));

        backend.fail_submissions_with(None);
        backend
            .submit_rsvp(&submission("g1", RsvpStatus::Declined))
            .await
            .unwrap();
        assert_eq!(backend.submissions().len(), 1);
    }
}
