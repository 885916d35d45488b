//! RSVP form state, field visibility and validation.
//!
//! The form is rebuilt from the posted fields on every request. Adding or
//! removing a plus-one re-renders the form; only `Submit` runs validation and
//! reaches the submission collaborator.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};

use crate::i18n::{fill, LanguageStrings};
use crate::models::{
    EventAttendance, Guest, PlusOne, RsvpSettings, RsvpStatus, RsvpSubmission, Wedding,
};

/// Button the guest pressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RsvpAction {
    Submit,
    AddPlusOne,
    RemovePlusOne(usize),
    /// Re-render with the posted answers, e.g. after attendance changed
    Refresh,
}

impl RsvpAction {
    pub fn parse(value: &str) -> Option<RsvpAction> {
        match value {
            "submit" => Some(RsvpAction::Submit),
            "add_plus_one" => Some(RsvpAction::AddPlusOne),
            "refresh" => Some(RsvpAction::Refresh),
            _ => value
                .strip_prefix("remove_plus_one:")
                .and_then(|index| index.parse().ok())
                .map(RsvpAction::RemovePlusOne),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventChoice {
    pub event_id: String,
    pub attending: bool,
}

/// Which optional fields the form shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldVisibility {
    pub events: bool,
    pub plus_ones: bool,
    pub dietary: bool,
    pub transportation: bool,
    pub accommodation: bool,
    pub contact: bool,
    pub emergency_contact: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldError {
    AttendanceRequired,
    PlusOneNameRequired,
    PlusOneLimit(u8),
}

impl FieldError {
    pub fn message(self, strings: &LanguageStrings) -> String {
        match self {
            FieldError::AttendanceRequired => strings.error_attendance_required.to_string(),
            FieldError::PlusOneNameRequired => strings.error_plus_one_name_required.to_string(),
            FieldError::PlusOneLimit(max) => {
                fill(strings.error_plus_one_limit, &[("count", &max.to_string())])
            }
        }
    }
}

pub const ATTENDANCE_FIELD: &str = "attendance";
pub const PLUS_ONES_FIELD: &str = "plus_ones";
/// Hidden marker posted only when the event checkboxes were on the page
pub const EVENTS_SHOWN_FIELD: &str = "events_shown";

pub fn plus_one_name_field(index: usize) -> String {
    format!("plus_one_name.{}", index)
}

/// Validation errors keyed by field name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<String, FieldError>);

impl FieldErrors {
    pub fn insert(&mut self, field: impl Into<String>, error: FieldError) {
        self.0.insert(field.into(), error);
    }

    pub fn get(&self, field: &str) -> Option<FieldError> {
        self.0.get(field).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn message(&self, field: &str, strings: &LanguageStrings) -> Option<String> {
        self.get(field).map(|e| e.message(strings))
    }
}

/// Notice shown once a response has been saved.
pub fn thanks_message(status: RsvpStatus, strings: &LanguageStrings) -> Option<&'static str> {
    match status {
        RsvpStatus::Confirmed => Some(strings.rsvp_thanks_confirmed),
        RsvpStatus::Declined => Some(strings.rsvp_thanks_declined),
        RsvpStatus::Maybe => Some(strings.rsvp_thanks_maybe),
        RsvpStatus::Pending => None,
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RsvpForm {
    pub wedding_id: String,
    pub guest_id: String,
    /// `None` until the guest picks an answer
    pub attendance: Option<RsvpStatus>,
    pub events: Vec<EventChoice>,
    pub plus_ones: Vec<PlusOne>,
    pub max_plus_ones: u8,
    pub dietary_restrictions: String,
    pub needs_transportation: bool,
    pub needs_accommodation: bool,
    pub contact_email: String,
    pub contact_phone: String,
    pub emergency_contact_name: String,
    pub emergency_contact_phone: String,
    pub message: String,
    settings: RsvpSettings,
}

impl RsvpForm {
    /// Form prefilled from the guest record. A pending guest starts with no
    /// attendance selected.
    pub fn for_guest(wedding: &Wedding, guest: &Guest) -> Self {
        let settings = wedding.settings.rsvp.clone();
        let attendance = match guest.rsvp_status {
            RsvpStatus::Pending => None,
            status => Some(status),
        };

        let events = wedding
            .settings
            .events
            .iter()
            .filter(|event| guest.is_invited_to(&event.id))
            .map(|event| EventChoice {
                event_id: event.id.clone(),
                attending: attendance != Some(RsvpStatus::Declined),
            })
            .collect();

        Self {
            wedding_id: wedding.id.clone(),
            guest_id: guest.id.clone(),
            attendance,
            events,
            plus_ones: guest.plus_ones.clone(),
            max_plus_ones: guest.plus_one_allowance(&settings),
            dietary_restrictions: guest.dietary_restrictions.clone().unwrap_or_default(),
            needs_transportation: false,
            needs_accommodation: false,
            contact_email: guest.email.clone().unwrap_or_default(),
            contact_phone: guest.phone.clone().unwrap_or_default(),
            emergency_contact_name: String::new(),
            emergency_contact_phone: String::new(),
            message: String::new(),
            settings,
        }
    }

    /// Overwrite the form with posted fields. Unknown fields are ignored.
    /// Checkboxes absent from the post are unchecked, except the event
    /// checkboxes when they were not on the page: those default to the
    /// posted attendance.
    pub fn apply_fields<'a, I>(&mut self, fields: I)
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut names: BTreeMap<usize, String> = BTreeMap::new();
        let mut diets: BTreeMap<usize, String> = BTreeMap::new();
        let mut checked_events: Vec<String> = Vec::new();
        let mut events_shown = false;

        self.attendance = None;
        self.needs_transportation = false;
        self.needs_accommodation = false;

        for (name, value) in fields {
            match name {
                "attendance" => {
                    self.attendance = RsvpStatus::parse(value).filter(|s| *s != RsvpStatus::Pending)
                }
                EVENTS_SHOWN_FIELD => events_shown = true,
                "dietary" => self.dietary_restrictions = value.to_string(),
                "transportation" => self.needs_transportation = true,
                "accommodation" => self.needs_accommodation = true,
                "email" => self.contact_email = value.to_string(),
                "phone" => self.contact_phone = value.to_string(),
                "emergency_name" => self.emergency_contact_name = value.to_string(),
                "emergency_phone" => self.emergency_contact_phone = value.to_string(),
                "message" => self.message = value.to_string(),
                _ => {
                    if let Some(id) = name.strip_prefix("event.") {
                        checked_events.push(id.to_string());
                    } else if let Some(index) = indexed(name, "plus_one_name.") {
                        names.insert(index, value.to_string());
                    } else if let Some(index) = indexed(name, "plus_one_dietary.") {
                        diets.insert(index, value.to_string());
                    }
                }
            }
        }

        let attending = self.is_attending();
        for event in &mut self.events {
            event.attending = if events_shown {
                checked_events.iter().any(|id| *id == event.event_id)
            } else {
                attending
            };
        }

        self.plus_ones = names
            .into_iter()
            .map(|(index, name)| PlusOne {
                name,
                dietary_restrictions: diets.remove(&index).filter(|d| !d.trim().is_empty()),
            })
            .collect();
    }

    pub fn is_attending(&self) -> bool {
        matches!(
            self.attendance,
            Some(RsvpStatus::Confirmed) | Some(RsvpStatus::Maybe)
        )
    }

    pub fn visibility(&self) -> FieldVisibility {
        let attending = self.is_attending();
        let answered_no = self.attendance == Some(RsvpStatus::Declined);
        FieldVisibility {
            events: attending && !self.events.is_empty(),
            plus_ones: attending && self.max_plus_ones > 0,
            dietary: self.settings.ask_dietary && !answered_no,
            transportation: self.settings.ask_transportation && !answered_no,
            accommodation: self.settings.ask_accommodation && !answered_no,
            contact: self.settings.ask_contact && !answered_no,
            emergency_contact: self.settings.ask_emergency_contact && !answered_no,
        }
    }

    pub fn can_add_plus_one(&self) -> bool {
        self.plus_ones.len() < usize::from(self.max_plus_ones)
    }

    /// Append an empty plus-one entry. Returns false and leaves the form
    /// unchanged once the allowance is reached.
    pub fn add_plus_one(&mut self) -> bool {
        if !self.can_add_plus_one() {
            return false;
        }
        self.plus_ones.push(PlusOne {
            name: String::new(),
            dietary_restrictions: None,
        });
        true
    }

    pub fn remove_plus_one(&mut self, index: usize) -> bool {
        if index >= self.plus_ones.len() {
            return false;
        }
        self.plus_ones.remove(index);
        true
    }

    /// Check required fields and build the submission payload. Fields hidden
    /// by the current answers are left out of the payload.
    pub fn validate(&self, now: DateTime<Utc>) -> Result<RsvpSubmission, FieldErrors> {
        let mut errors = FieldErrors::default();

        let Some(status) = self.attendance else {
            errors.insert(ATTENDANCE_FIELD, FieldError::AttendanceRequired);
            return Err(errors);
        };

        let visible = self.visibility();

        if visible.plus_ones {
            if self.plus_ones.len() > usize::from(self.max_plus_ones) {
                errors.insert(PLUS_ONES_FIELD, FieldError::PlusOneLimit(self.max_plus_ones));
            }
            for (index, plus_one) in self.plus_ones.iter().enumerate() {
                if plus_one.name.trim().is_empty() {
                    errors.insert(plus_one_name_field(index), FieldError::PlusOneNameRequired);
                }
            }
        }

        if !errors.is_empty() {
            return Err(errors);
        }

        let plus_ones = if visible.plus_ones {
            self.plus_ones
                .iter()
                .map(|p| PlusOne {
                    name: p.name.trim().to_string(),
                    dietary_restrictions: p.dietary_restrictions.as_deref().and_then(non_empty),
                })
                .collect()
        } else {
            Vec::new()
        };

        let event_attendance = self
            .events
            .iter()
            .map(|e| EventAttendance {
                event_id: e.event_id.clone(),
                attending: self.is_attending() && e.attending,
            })
            .collect();

        let when = |shown: bool, value: &str| if shown { non_empty(value) } else { None };

        Ok(RsvpSubmission {
            wedding_id: self.wedding_id.clone(),
            guest_id: self.guest_id.clone(),
            rsvp_status: status,
            event_attendance,
            plus_ones,
            dietary_restrictions: when(visible.dietary, &self.dietary_restrictions),
            needs_transportation: visible.transportation && self.needs_transportation,
            needs_accommodation: visible.accommodation && self.needs_accommodation,
            contact_email: when(visible.contact, &self.contact_email),
            contact_phone: when(visible.contact, &self.contact_phone),
            emergency_contact_name: when(visible.emergency_contact, &self.emergency_contact_name),
            emergency_contact_phone: when(visible.emergency_contact, &self.emergency_contact_phone),
            message: non_empty(&self.message),
            submitted_at: now,
        })
    }
}

fn indexed(name: &str, prefix: &str) -> Option<usize> {
    name.strip_prefix(prefix)?.parse().ok()
}

fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::Language;
    use crate::models::{EventDetails, EventKind, WeddingSettings};
    use chrono::TimeZone;

    fn wedding(max_plus_ones: u8) -> Wedding {
        let mut settings = WeddingSettings::default();
        settings.rsvp.max_plus_ones = max_plus_ones;
        settings.events = vec![
            EventDetails {
                id: "ceremony".to_string(),
                kind: EventKind::Ceremony,
                title: None,
                starts_at: None,
                venue: None,
                address: None,
                map_url: None,
                notes: None,
            },
            EventDetails {
                id: "reception".to_string(),
                kind: EventKind::Reception,
                title: None,
                starts_at: None,
                venue: None,
                address: None,
                map_url: None,
                notes: None,
            },
        ];
        Wedding {
            id: "w1".to_string(),
            subdomain: None,
            partner_one: "Ana".to_string(),
            partner_two: "Luis".to_string(),
            wedding_date: Utc.with_ymd_and_hms(2027, 5, 1, 22, 0, 0).unwrap(),
            settings,
        }
    }

    fn guest(status: RsvpStatus) -> Guest {
        Guest {
            id: "g1".to_string(),
            wedding_id: "w1".to_string(),
            name: "Eva".to_string(),
            invite_code: "EVA123".to_string(),
            rsvp_status: status,
            max_plus_ones: None,
            email: Some("eva@example.com".to_string()),
            phone: None,
            is_deleted: false,
            invited_events: Vec::new(),
            plus_ones: Vec::new(),
            dietary_restrictions: None,
        }
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2027, 3, 1, 9, 0, 0).unwrap()
    }

    // ==================== Initialisation Tests ====================

    #[test]
    fn test_pending_guest_starts_unselected() {
        let form = RsvpForm::for_guest(&wedding(0), &guest(RsvpStatus::Pending));
        assert_eq!(form.attendance, None);
    }

    #[test]
    fn test_answered_guest_starts_with_answer() {
        let form = RsvpForm::for_guest(&wedding(0), &guest(RsvpStatus::Maybe));
        assert_eq!(form.attendance, Some(RsvpStatus::Maybe));
        assert_eq!(form.contact_email, "eva@example.com");
    }

    #[test]
    fn test_only_invited_events_are_listed() {
        let mut g = guest(RsvpStatus::Pending);
        g.invited_events = vec!["reception".to_string()];
        let form = RsvpForm::for_guest(&wedding(0), &g);
        assert_eq!(form.events.len(), 1);
        assert_eq!(form.events[0].event_id, "reception");
    }

    // ==================== Plus-one Tests ====================

    #[test]
    fn test_add_plus_one_rejected_at_limit() {
        let mut form = RsvpForm::for_guest(&wedding(2), &guest(RsvpStatus::Confirmed));
        assert!(form.add_plus_one());
        assert!(form.add_plus_one());
        assert!(!form.add_plus_one());
        assert_eq!(form.plus_ones.len(), 2);
    }

    #[test]
    fn test_guest_override_allowance() {
        let mut g = guest(RsvpStatus::Confirmed);
        g.max_plus_ones = Some(1);
        let mut form = RsvpForm::for_guest(&wedding(3), &g);
        assert!(form.add_plus_one());
        assert!(!form.add_plus_one());
    }

    #[test]
    fn test_remove_plus_one() {
        let mut form = RsvpForm::for_guest(&wedding(2), &guest(RsvpStatus::Confirmed));
        form.apply_fields([
            ("attendance", "confirmed"),
            ("plus_one_name.0", "Ana"),
            ("plus_one_name.1", "Beto"),
        ]);
        assert!(form.remove_plus_one(0));
        assert_eq!(form.plus_ones[0].name, "Beto");
        assert!(!form.remove_plus_one(5));
    }

    // ==================== Visibility Tests ====================

    #[test]
    fn test_plus_ones_hidden_unless_attending_with_allowance() {
        let mut form = RsvpForm::for_guest(&wedding(1), &guest(RsvpStatus::Pending));
        assert!(!form.visibility().plus_ones);

        form.attendance = Some(RsvpStatus::Confirmed);
        assert!(form.visibility().plus_ones);

        let form = RsvpForm::for_guest(&wedding(0), &guest(RsvpStatus::Confirmed));
        assert!(!form.visibility().plus_ones);
    }

    #[test]
    fn test_declined_hides_detail_fields() {
        let form = RsvpForm::for_guest(&wedding(1), &guest(RsvpStatus::Declined));
        let visible = form.visibility();
        assert!(!visible.dietary);
        assert!(!visible.contact);
        assert!(!visible.events);
    }

    #[test]
    fn test_settings_toggle_optional_fields() {
        let mut w = wedding(0);
        w.settings.rsvp.ask_transportation = true;
        w.settings.rsvp.ask_dietary = false;
        let form = RsvpForm::for_guest(&w, &guest(RsvpStatus::Confirmed));
        let visible = form.visibility();
        assert!(visible.transportation);
        assert!(!visible.dietary);
        assert!(!visible.accommodation);
    }

    // ==================== Validation Tests ====================

    #[test]
    fn test_missing_attendance_is_an_error() {
        let form = RsvpForm::for_guest(&wedding(0), &guest(RsvpStatus::Pending));
        let errors = form.validate(now()).unwrap_err();
        assert_eq!(errors.get(ATTENDANCE_FIELD), Some(FieldError::AttendanceRequired));
        assert_eq!(
            errors.message(ATTENDANCE_FIELD, Language::ENGLISH.strings()).as_deref(),
            Some(Language::ENGLISH.strings().error_attendance_required)
        );
    }

    #[test]
    fn test_posted_pending_counts_as_unanswered() {
        let mut form = RsvpForm::for_guest(&wedding(0), &guest(RsvpStatus::Confirmed));
        form.apply_fields([("attendance", "pending")]);
        assert!(form.validate(now()).is_err());
    }

    #[test]
    fn test_plus_one_names_required() {
        let mut form = RsvpForm::for_guest(&wedding(2), &guest(RsvpStatus::Pending));
        form.apply_fields([
            ("attendance", "confirmed"),
            ("plus_one_name.0", "Ana"),
            ("plus_one_name.1", "  "),
        ]);
        let errors = form.validate(now()).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.get("plus_one_name.1"), Some(FieldError::PlusOneNameRequired));
    }

    #[test]
    fn test_posted_plus_ones_over_limit_rejected() {
        let mut form = RsvpForm::for_guest(&wedding(1), &guest(RsvpStatus::Pending));
        form.apply_fields([
            ("attendance", "confirmed"),
            ("plus_one_name.0", "Ana"),
            ("plus_one_name.1", "Beto"),
        ]);
        let errors = form.validate(now()).unwrap_err();
        assert_eq!(errors.get(PLUS_ONES_FIELD), Some(FieldError::PlusOneLimit(1)));
        assert_eq!(
            FieldError::PlusOneLimit(1).message(Language::ENGLISH.strings()),
            fill(Language::ENGLISH.strings().error_plus_one_limit, &[("count", "1")])
        );
    }

    #[test]
    fn test_valid_submission_payload() {
        let mut w = wedding(1);
        w.settings.rsvp.ask_transportation = true;
        let mut form = RsvpForm::for_guest(&w, &guest(RsvpStatus::Pending));
        form.apply_fields([
            ("attendance", "confirmed"),
            (EVENTS_SHOWN_FIELD, "1"),
            ("event.ceremony", "on"),
            ("plus_one_name.0", " Ana "),
            ("plus_one_dietary.0", "vegan"),
            ("dietary", ""),
            ("transportation", "on"),
            ("email", "eva@example.com"),
            ("message", "¡Felicidades!"),
        ]);

        let submission = form.validate(now()).unwrap();

        assert_eq!(submission.rsvp_status, RsvpStatus::Confirmed);
        assert_eq!(submission.guest_id, "g1");
        assert_eq!(
            submission.event_attendance,
            vec![
                EventAttendance { event_id: "ceremony".to_string(), attending: true },
                EventAttendance { event_id: "reception".to_string(), attending: false },
            ]
        );
        assert_eq!(submission.plus_ones[0].name, "Ana");
        assert_eq!(submission.plus_ones[0].dietary_restrictions.as_deref(), Some("vegan"));
        assert_eq!(submission.dietary_restrictions, None);
        assert!(submission.needs_transportation);
        assert_eq!(submission.message.as_deref(), Some("¡Felicidades!"));
        assert_eq!(submission.submitted_at, now());
    }

    #[test]
    fn test_first_answer_keeps_event_defaults() {
        let mut form = RsvpForm::for_guest(&wedding(0), &guest(RsvpStatus::Pending));
        assert!(!form.visibility().events);

        form.apply_fields([("attendance", "confirmed")]);
        assert!(form.events.iter().all(|e| e.attending));

        let submission = form.validate(now()).unwrap();
        assert_eq!(submission.rsvp_status, RsvpStatus::Confirmed);
        assert!(submission.event_attendance.iter().all(|e| e.attending));
    }

    #[test]
    fn test_unchecked_events_stay_unchecked_when_shown() {
        let mut form = RsvpForm::for_guest(&wedding(0), &guest(RsvpStatus::Confirmed));
        form.apply_fields([("attendance", "confirmed"), (EVENTS_SHOWN_FIELD, "1")]);
        assert!(form.events.iter().all(|e| !e.attending));
    }

    #[test]
    fn test_switching_from_declined_defaults_events_to_attending() {
        let mut form = RsvpForm::for_guest(&wedding(0), &guest(RsvpStatus::Declined));
        assert!(form.events.iter().all(|e| !e.attending));

        form.apply_fields([("attendance", "maybe")]);
        assert!(form.events.iter().all(|e| e.attending));
    }

    #[test]
    fn test_declined_submission_drops_hidden_fields() {
        let mut form = RsvpForm::for_guest(&wedding(2), &guest(RsvpStatus::Pending));
        form.apply_fields([
            ("attendance", "declined"),
            ("event.ceremony", "on"),
            ("plus_one_name.0", ""),
            ("dietary", "none"),
        ]);

        let submission = form.validate(now()).unwrap();

        assert!(submission.plus_ones.is_empty());
        assert!(submission.event_attendance.iter().all(|e| !e.attending));
        assert_eq!(submission.dietary_restrictions, None);
    }

    // ==================== Action Parsing Tests ====================

    #[test]
    fn test_action_parse() {
        assert_eq!(RsvpAction::parse("submit"), Some(RsvpAction::Submit));
        assert_eq!(RsvpAction::parse("add_plus_one"), Some(RsvpAction::AddPlusOne));
        assert_eq!(RsvpAction::parse("remove_plus_one:2"), Some(RsvpAction::RemovePlusOne(2)));
        assert_eq!(RsvpAction::parse("refresh"), Some(RsvpAction::Refresh));
        assert_eq!(RsvpAction::parse("remove_plus_one:x"), None);
        assert_eq!(RsvpAction::parse("delete"), None);
    }

    #[test]
    fn test_thanks_message_per_status() {
        let strings = Language::ENGLISH.strings();
        assert_eq!(
            thanks_message(RsvpStatus::Declined, strings),
            Some(strings.rsvp_thanks_declined)
        );
        assert_eq!(thanks_message(RsvpStatus::Pending, strings), None);
    }
}
