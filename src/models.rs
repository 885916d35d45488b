//! Records exchanged with the backend services.
//!
//! These are plain data carriers. The wedding settings are fully specified:
//! every field has a default, so a record with a sparse or empty `settings`
//! object deserializes into a complete `WeddingSettings` once, at load time.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::i18n::{Language, LanguageStrings};

// ==================== Wedding ====================

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Wedding {
    pub id: String,
    #[serde(default)]
    pub subdomain: Option<String>,
    /// First named partner (shown on the bride's side of the roster)
    pub partner_one: String,
    /// Second named partner (shown on the groom's side of the roster)
    pub partner_two: String,
    pub wedding_date: DateTime<Utc>,
    #[serde(default)]
    pub settings: WeddingSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct WeddingSettings {
    /// Language the couple wrote their custom copy in. `None` lets the
    /// translator detect it.
    pub content_language: Option<Language>,
    /// Offset applied when showing dates and times to guests
    pub utc_offset_minutes: i32,
    pub theme: ThemeSettings,
    pub section_visibility: SectionVisibility,
    pub hero: HeroSettings,
    pub parents: ParentsSettings,
    pub couple: CoupleSettings,
    pub events: Vec<EventDetails>,
    pub dress_code: Option<String>,
    pub rsvp: RsvpSettings,
    pub gifts: GiftSettings,
    pub gallery: Vec<GalleryImage>,
    pub hotels: Vec<HotelInfo>,
    pub footer: FooterSettings,
}

impl Default for WeddingSettings {
    fn default() -> Self {
        Self {
            content_language: None,
            utc_offset_minutes: 0,
            theme: ThemeSettings::default(),
            section_visibility: SectionVisibility::default(),
            hero: HeroSettings::default(),
            parents: ParentsSettings::default(),
            couple: CoupleSettings::default(),
            events: Vec::new(),
            dress_code: None,
            rsvp: RsvpSettings::default(),
            gifts: GiftSettings::default(),
            gallery: Vec::new(),
            hotels: Vec::new(),
            footer: FooterSettings::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct ThemeSettings {
    pub primary_color: String,
    pub accent_color: String,
}

impl Default for ThemeSettings {
    fn default() -> Self {
        Self {
            primary_color: "#8b6f47".to_string(),
            accent_color: "#d4af37".to_string(),
        }
    }
}

/// One toggle per invitation section. Absent toggles are visible.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct SectionVisibility {
    pub hero: bool,
    pub parents: bool,
    pub couple: bool,
    pub countdown: bool,
    pub event_details: bool,
    pub rsvp: bool,
    pub gifts: bool,
    pub gallery: bool,
    pub hotel: bool,
    pub footer: bool,
}

impl Default for SectionVisibility {
    fn default() -> Self {
        Self {
            hero: true,
            parents: true,
            couple: true,
            countdown: true,
            event_details: true,
            rsvp: true,
            gifts: true,
            gallery: true,
            hotel: true,
            footer: true,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct HeroSettings {
    pub title: Option<String>,
    pub subtitle: Option<String>,
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct ParentsSettings {
    pub bride_parents: Vec<String>,
    pub groom_parents: Vec<String>,
    pub message: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct CoupleSettings {
    pub story: Option<String>,
    pub photo_url: Option<String>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    Ceremony,
    Reception,
}

impl EventKind {
    pub fn label(self, strings: &LanguageStrings) -> &'static str {
        match self {
            EventKind::Ceremony => strings.ceremony_title,
            EventKind::Reception => strings.reception_title,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct EventDetails {
    pub id: String,
    pub kind: EventKind,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub starts_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub venue: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub map_url: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct RsvpSettings {
    pub intro: Option<String>,
    pub deadline: Option<NaiveDate>,
    /// Plus-one allowance for guests without their own override
    pub max_plus_ones: u8,
    pub ask_dietary: bool,
    pub ask_transportation: bool,
    pub ask_accommodation: bool,
    pub ask_contact: bool,
    pub ask_emergency_contact: bool,
}

impl Default for RsvpSettings {
    fn default() -> Self {
        Self {
            intro: None,
            deadline: None,
            max_plus_ones: 0,
            ask_dietary: true,
            ask_transportation: false,
            ask_accommodation: false,
            ask_contact: true,
            ask_emergency_contact: false,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct GiftSettings {
    pub intro: Option<String>,
    pub items: Vec<GiftOption>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum GiftKind {
    Registry,
    CashFund,
    BankTransfer,
    Honeymoon,
    Charity,
}

impl GiftKind {
    pub fn label(self, strings: &LanguageStrings) -> &'static str {
        match self {
            GiftKind::Registry => strings.gift_registry,
            GiftKind::CashFund => strings.gift_cash_fund,
            GiftKind::BankTransfer => strings.gift_bank_transfer,
            GiftKind::Honeymoon => strings.gift_honeymoon,
            GiftKind::Charity => strings.gift_charity,
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            GiftKind::Registry => "🎁",
            GiftKind::CashFund => "💌",
            GiftKind::BankTransfer => "🏦",
            GiftKind::Honeymoon => "✈️",
            GiftKind::Charity => "💛",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct GiftOption {
    pub kind: GiftKind,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub account_details: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct GalleryImage {
    pub url: String,
    #[serde(default)]
    pub caption: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct HotelInfo {
    pub name: String,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub booking_code: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct FooterSettings {
    pub message: Option<String>,
    pub hashtag: Option<String>,
}

// ==================== Guest & RSVP ====================

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RsvpStatus {
    #[default]
    Pending,
    Confirmed,
    Declined,
    Maybe,
}

impl RsvpStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            RsvpStatus::Pending => "pending",
            RsvpStatus::Confirmed => "confirmed",
            RsvpStatus::Declined => "declined",
            RsvpStatus::Maybe => "maybe",
        }
    }

    pub fn parse(value: &str) -> Option<RsvpStatus> {
        match value.trim() {
            "pending" => Some(RsvpStatus::Pending),
            "confirmed" => Some(RsvpStatus::Confirmed),
            "declined" => Some(RsvpStatus::Declined),
            "maybe" => Some(RsvpStatus::Maybe),
            _ => None,
        }
    }

    pub fn label(self, strings: &LanguageStrings) -> &'static str {
        match self {
            RsvpStatus::Pending => strings.status_pending,
            RsvpStatus::Confirmed => strings.status_confirmed,
            RsvpStatus::Declined => strings.status_declined,
            RsvpStatus::Maybe => strings.status_maybe,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PlusOne {
    pub name: String,
    #[serde(default)]
    pub dietary_restrictions: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Guest {
    pub id: String,
    pub wedding_id: String,
    pub name: String,
    pub invite_code: String,
    #[serde(default)]
    pub rsvp_status: RsvpStatus,
    /// Per-guest plus-one allowance; falls back to the wedding's setting
    #[serde(default)]
    pub max_plus_ones: Option<u8>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub is_deleted: bool,
    /// Event ids this guest is invited to; empty means every event
    #[serde(default)]
    pub invited_events: Vec<String>,
    #[serde(default)]
    pub plus_ones: Vec<PlusOne>,
    #[serde(default)]
    pub dietary_restrictions: Option<String>,
}

impl Guest {
    pub fn plus_one_allowance(&self, settings: &RsvpSettings) -> u8 {
        self.max_plus_ones.unwrap_or(settings.max_plus_ones)
    }

    pub fn is_invited_to(&self, event_id: &str) -> bool {
        self.invited_events.is_empty() || self.invited_events.iter().any(|id| id == event_id)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct EventAttendance {
    pub event_id: String,
    pub attending: bool,
}

/// Payload handed to the RSVP submission collaborator.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RsvpSubmission {
    pub wedding_id: String,
    pub guest_id: String,
    pub rsvp_status: RsvpStatus,
    pub event_attendance: Vec<EventAttendance>,
    pub plus_ones: Vec<PlusOne>,
    pub dietary_restrictions: Option<String>,
    pub needs_transportation: bool,
    pub needs_accommodation: bool,
    pub contact_email: Option<String>,
    pub contact_phone: Option<String>,
    pub emergency_contact_name: Option<String>,
    pub emergency_contact_phone: Option<String>,
    pub message: Option<String>,
    pub submitted_at: DateTime<Utc>,
}

// ==================== Wedding Party ====================

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum PartyRole {
    Officiant,
    MaidOfHonor,
    MatronOfHonor,
    BestMan,
    Bridesmaid,
    Groomsman,
    FlowerGirl,
    RingBearer,
    Usher,
    Reader,
    PadrinosVelacion,
    PadrinosLazo,
    PadrinosArras,
    PadrinosAnillos,
}

impl PartyRole {
    pub fn label(self, strings: &LanguageStrings) -> &'static str {
        match self {
            PartyRole::Officiant => strings.role_officiant,
            PartyRole::MaidOfHonor => strings.role_maid_of_honor,
            PartyRole::MatronOfHonor => strings.role_matron_of_honor,
            PartyRole::BestMan => strings.role_best_man,
            PartyRole::Bridesmaid => strings.role_bridesmaid,
            PartyRole::Groomsman => strings.role_groomsman,
            PartyRole::FlowerGirl => strings.role_flower_girl,
            PartyRole::RingBearer => strings.role_ring_bearer,
            PartyRole::Usher => strings.role_usher,
            PartyRole::Reader => strings.role_reader,
            PartyRole::PadrinosVelacion => strings.role_padrinos_velacion,
            PartyRole::PadrinosLazo => strings.role_padrinos_lazo,
            PartyRole::PadrinosArras => strings.role_padrinos_arras,
            PartyRole::PadrinosAnillos => strings.role_padrinos_anillos,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum PartySide {
    Bride,
    Groom,
    Couple,
}

impl PartySide {
    pub fn label(self, strings: &LanguageStrings) -> &'static str {
        match self {
            PartySide::Bride => strings.side_bride,
            PartySide::Groom => strings.side_groom,
            PartySide::Couple => strings.side_couple,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct WeddingPartyMember {
    pub id: String,
    pub wedding_id: String,
    pub name: String,
    pub role: PartyRole,
    pub side: PartySide,
    #[serde(default)]
    pub display_order: i32,
    #[serde(default)]
    pub photo_url: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
}
