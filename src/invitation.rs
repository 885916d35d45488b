//! Invitation page composition.
//!
//! `compose` turns a wedding record, the optional guest and the viewer's
//! language into an `InvitationView`: one optional view per section, in page
//! order. A section is `None` when its visibility toggle is off, and the
//! sections that only list things (parents, gifts, gallery, hotels) are also
//! `None` when there is nothing to list. Custom copy that is absent falls back
//! to the localized default.

use std::sync::OnceLock;

use chrono::{DateTime, Datelike, FixedOffset, NaiveDate, NaiveDateTime, Offset, Utc};
use regex::Regex;
use tracing::debug;

use crate::countdown::{self, CountdownParts};
use crate::i18n::{fill, Language, LanguageStrings};
use crate::models::{
    EventDetails, GalleryImage, Guest, RsvpStatus, ThemeSettings, Wedding, WeddingSettings,
};
use crate::rsvp::{plus_one_name_field, FieldErrors, RsvpForm, ATTENDANCE_FIELD, PLUS_ONES_FIELD};
use crate::translation::TranslationClient;

/// Translation domain for the couple's custom copy.
pub const TRANSLATION_DOMAIN: &str = "invitation";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionKind {
    Hero,
    Parents,
    Couple,
    Countdown,
    EventDetails,
    Rsvp,
    Gifts,
    Gallery,
    Hotel,
    Footer,
}

#[derive(Debug, Clone)]
pub struct InvitationView {
    pub wedding_id: String,
    pub title: String,
    pub primary_color: String,
    pub accent_color: String,
    pub hero: Option<HeroView>,
    pub parents: Option<ParentsView>,
    pub couple: Option<CoupleView>,
    pub countdown: Option<CountdownView>,
    pub event_details: Option<EventDetailsView>,
    pub rsvp: Option<RsvpSectionView>,
    pub gifts: Option<GiftsView>,
    pub gallery: Option<GalleryView>,
    pub hotels: Option<HotelsView>,
    pub footer: Option<FooterView>,
}

impl InvitationView {
    /// Sections present on the page, in page order.
    pub fn sections(&self) -> Vec<SectionKind> {
        [
            (self.hero.is_some(), SectionKind::Hero),
            (self.parents.is_some(), SectionKind::Parents),
            (self.couple.is_some(), SectionKind::Couple),
            (self.countdown.is_some(), SectionKind::Countdown),
            (self.event_details.is_some(), SectionKind::EventDetails),
            (self.rsvp.is_some(), SectionKind::Rsvp),
            (self.gifts.is_some(), SectionKind::Gifts),
            (self.gallery.is_some(), SectionKind::Gallery),
            (self.hotels.is_some(), SectionKind::Hotel),
            (self.footer.is_some(), SectionKind::Footer),
        ]
        .into_iter()
        .filter_map(|(present, kind)| present.then_some(kind))
        .collect()
    }
}

#[derive(Debug, Clone)]
pub struct HeroView {
    pub greeting: Option<String>,
    pub title: String,
    pub subtitle: String,
    pub couple_names: String,
    pub date: String,
    pub image_url: Option<String>,
}

#[derive(Debug, Clone)]
pub struct ParentsView {
    pub title: String,
    pub bride_label: String,
    pub bride_parents: Vec<String>,
    pub groom_label: String,
    pub groom_parents: Vec<String>,
    pub message: Option<String>,
}

#[derive(Debug, Clone)]
pub struct CoupleView {
    pub title: String,
    pub partner_one: String,
    pub partner_two: String,
    pub story: String,
    pub photo_url: Option<String>,
}

#[derive(Debug, Clone)]
pub struct CountdownView {
    pub title: String,
    pub stream_url: String,
    pub initial: CountdownParts,
    pub days_label: String,
    pub hours_label: String,
    pub minutes_label: String,
    pub seconds_label: String,
    pub finished_label: String,
}

#[derive(Debug, Clone)]
pub struct EventView {
    pub heading: String,
    pub date: Option<String>,
    pub time: Option<String>,
    pub venue: Option<String>,
    pub address: Option<String>,
    pub map_url: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone)]
pub struct EventDetailsView {
    pub title: String,
    pub date_label: String,
    pub time_label: String,
    pub venue_label: String,
    pub address_label: String,
    pub map_link: String,
    pub wedding_date: String,
    pub events: Vec<EventView>,
    pub dress_code_title: String,
    pub dress_code: String,
}

#[derive(Debug, Clone)]
pub struct RsvpSectionView {
    pub title: String,
    pub intro: String,
    pub deadline: Option<String>,
    /// Shown instead of the form when the page was opened without an invite
    pub need_invite: Option<String>,
    pub current_response: Option<String>,
    pub notice: Option<String>,
    pub error: Option<String>,
    pub form: Option<RsvpFormView>,
}

#[derive(Debug, Clone)]
pub struct ChoiceView {
    pub value: String,
    pub label: String,
    pub checked: bool,
}

#[derive(Debug, Clone)]
pub struct TextFieldView {
    pub name: String,
    pub label: String,
    pub value: String,
}

#[derive(Debug, Clone)]
pub struct PlusOneView {
    pub index: usize,
    pub name: String,
    pub dietary: String,
    pub name_error: Option<String>,
}

#[derive(Debug, Clone)]
pub struct RsvpFormView {
    pub action_url: String,
    pub invite_code: String,
    pub attendance_label: String,
    pub attendance_options: Vec<ChoiceView>,
    pub attendance_error: Option<String>,
    pub events_label: String,
    pub events: Vec<ChoiceView>,
    pub show_plus_ones: bool,
    pub plus_ones_label: String,
    pub plus_ones_allowance: String,
    pub plus_one_name_label: String,
    pub plus_one_dietary_label: String,
    pub plus_ones: Vec<PlusOneView>,
    pub plus_ones_error: Option<String>,
    pub can_add_plus_one: bool,
    pub add_plus_one_label: String,
    pub remove_plus_one_label: String,
    pub dietary: Option<TextFieldView>,
    pub transportation: Option<ChoiceView>,
    pub accommodation: Option<ChoiceView>,
    pub email: Option<TextFieldView>,
    pub phone: Option<TextFieldView>,
    pub emergency_name: Option<TextFieldView>,
    pub emergency_phone: Option<TextFieldView>,
    pub message: TextFieldView,
    pub submit_label: String,
    pub submitting_label: String,
}

impl RsvpFormView {
    pub fn build(
        wedding: &Wedding,
        invite_code: &str,
        form: &RsvpForm,
        errors: &FieldErrors,
        strings: &LanguageStrings,
    ) -> Self {
        let visible = form.visibility();
        let text = |name: &str, label: &str, value: &str| TextFieldView {
            name: name.to_string(),
            label: label.to_string(),
            value: value.to_string(),
        };
        let check = |name: &str, label: &str, checked: bool| ChoiceView {
            value: name.to_string(),
            label: label.to_string(),
            checked,
        };

        let attendance_options = [
            (RsvpStatus::Confirmed, strings.rsvp_option_confirmed),
            (RsvpStatus::Declined, strings.rsvp_option_declined),
            (RsvpStatus::Maybe, strings.rsvp_option_maybe),
        ]
        .into_iter()
        .map(|(status, label)| ChoiceView {
            value: status.as_str().to_string(),
            label: label.to_string(),
            checked: form.attendance == Some(status),
        })
        .collect();

        let events = if visible.events {
            form.events
                .iter()
                .map(|choice| {
                    let label = wedding
                        .settings
                        .events
                        .iter()
                        .find(|e| e.id == choice.event_id)
                        .map(|e| event_heading(e, strings))
                        .unwrap_or_else(|| choice.event_id.clone());
                    ChoiceView {
                        value: format!("event.{}", choice.event_id),
                        label,
                        checked: choice.attending,
                    }
                })
                .collect()
        } else {
            Vec::new()
        };

        let plus_ones = form
            .plus_ones
            .iter()
            .enumerate()
            .map(|(index, p)| PlusOneView {
                index,
                name: p.name.clone(),
                dietary: p.dietary_restrictions.clone().unwrap_or_default(),
                name_error: errors.message(&plus_one_name_field(index), strings),
            })
            .collect();

        Self {
            action_url: format!("/w/{}/rsvp", wedding.id),
            invite_code: invite_code.to_string(),
            attendance_label: strings.rsvp_attendance_label.to_string(),
            attendance_options,
            attendance_error: errors.message(ATTENDANCE_FIELD, strings),
            events_label: strings.rsvp_events_label.to_string(),
            events,
            show_plus_ones: visible.plus_ones,
            plus_ones_label: strings.rsvp_plus_ones_label.to_string(),
            plus_ones_allowance: fill(
                strings.rsvp_plus_ones_allowance,
                &[("count", &form.max_plus_ones.to_string())],
            ),
            plus_one_name_label: strings.rsvp_plus_one_name.to_string(),
            plus_one_dietary_label: strings.rsvp_plus_one_dietary.to_string(),
            plus_ones,
            plus_ones_error: errors.message(PLUS_ONES_FIELD, strings),
            can_add_plus_one: form.can_add_plus_one(),
            add_plus_one_label: strings.rsvp_plus_one_add.to_string(),
            remove_plus_one_label: strings.rsvp_plus_one_remove.to_string(),
            dietary: visible
                .dietary
                .then(|| text("dietary", strings.rsvp_dietary_label, &form.dietary_restrictions)),
            transportation: visible.transportation.then(|| {
                check("transportation", strings.rsvp_transport_label, form.needs_transportation)
            }),
            accommodation: visible.accommodation.then(|| {
                check("accommodation", strings.rsvp_accommodation_label, form.needs_accommodation)
            }),
            email: visible
                .contact
                .then(|| text("email", strings.rsvp_email_label, &form.contact_email)),
            phone: visible
                .contact
                .then(|| text("phone", strings.rsvp_phone_label, &form.contact_phone)),
            emergency_name: visible.emergency_contact.then(|| {
                text(
                    "emergency_name",
                    strings.rsvp_emergency_name_label,
                    &form.emergency_contact_name,
                )
            }),
            emergency_phone: visible.emergency_contact.then(|| {
                text(
                    "emergency_phone",
                    strings.rsvp_emergency_phone_label,
                    &form.emergency_contact_phone,
                )
            }),
            message: text("message", strings.rsvp_message_label, &form.message),
            submit_label: strings.rsvp_submit.to_string(),
            submitting_label: strings.rsvp_submitting.to_string(),
        }
    }
}

impl RsvpSectionView {
    /// Show the guest's in-progress answers, with any field errors.
    pub fn show_form(
        &mut self,
        wedding: &Wedding,
        invite_code: &str,
        form: &RsvpForm,
        errors: &FieldErrors,
        strings: &LanguageStrings,
    ) {
        self.form = Some(RsvpFormView::build(wedding, invite_code, form, errors, strings));
    }
}

#[derive(Debug, Clone)]
pub struct GiftView {
    pub icon: &'static str,
    pub kind_label: String,
    pub title: String,
    pub description: Option<String>,
    pub url: Option<String>,
    pub account_details: Option<String>,
}

#[derive(Debug, Clone)]
pub struct GiftsView {
    pub title: String,
    pub intro: String,
    pub open_link: String,
    pub items: Vec<GiftView>,
}

#[derive(Debug, Clone)]
pub struct GalleryView {
    pub title: String,
    pub images: Vec<GalleryImage>,
}

#[derive(Debug, Clone)]
pub struct HotelView {
    pub name: String,
    pub address: Option<String>,
    pub url: Option<String>,
    pub booking_code: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone)]
pub struct HotelsView {
    pub title: String,
    pub booking_code_label: String,
    pub book_label: String,
    pub hotels: Vec<HotelView>,
}

#[derive(Debug, Clone)]
pub struct FooterView {
    pub couple_names: String,
    pub message: String,
    pub hashtag: Option<String>,
}

/// Build the invitation page. Never fails: every optional setting has a
/// fallback.
pub fn compose(
    wedding: &Wedding,
    guest: Option<&Guest>,
    language: Language,
    now: DateTime<Utc>,
) -> InvitationView {
    let strings = language.strings();
    let settings = &wedding.settings;
    let visible = settings.section_visibility;
    let offset = utc_offset(settings.utc_offset_minutes);
    let wedding_date = format_date(local(wedding.wedding_date, offset).date(), strings);
    let couple_names = fill(
        strings.page_title,
        &[("one", &wedding.partner_one), ("two", &wedding.partner_two)],
    );

    let hero = visible.hero.then(|| HeroView {
        greeting: guest.map(|g| fill(strings.hero_greeting, &[("name", &g.name)])),
        title: or_default(&settings.hero.title, strings.hero_default_title),
        subtitle: or_default(&settings.hero.subtitle, strings.hero_default_subtitle),
        couple_names: couple_names.clone(),
        date: wedding_date.clone(),
        image_url: settings.hero.image_url.clone(),
    });

    let parents = &settings.parents;
    let has_parents = !parents.bride_parents.is_empty() || !parents.groom_parents.is_empty();
    let parents = (visible.parents && has_parents).then(|| ParentsView {
        title: strings.parents_title.to_string(),
        bride_label: strings.parents_of_bride.to_string(),
        bride_parents: parents.bride_parents.clone(),
        groom_label: strings.parents_of_groom.to_string(),
        groom_parents: parents.groom_parents.clone(),
        message: present(&parents.message),
    });

    let couple = visible.couple.then(|| CoupleView {
        title: strings.couple_title.to_string(),
        partner_one: wedding.partner_one.clone(),
        partner_two: wedding.partner_two.clone(),
        story: or_default(&settings.couple.story, strings.couple_default_story),
        photo_url: settings.couple.photo_url.clone(),
    });

    let countdown = visible.countdown.then(|| CountdownView {
        title: strings.countdown_title.to_string(),
        stream_url: format!("/w/{}/countdown", wedding.id),
        initial: countdown::remaining(wedding.wedding_date, now),
        days_label: strings.countdown_days.to_string(),
        hours_label: strings.countdown_hours.to_string(),
        minutes_label: strings.countdown_minutes.to_string(),
        seconds_label: strings.countdown_seconds.to_string(),
        finished_label: strings.countdown_finished.to_string(),
    });

    let event_details = visible.event_details.then(|| EventDetailsView {
        title: strings.event_title.to_string(),
        date_label: strings.event_date_label.to_string(),
        time_label: strings.event_time_label.to_string(),
        venue_label: strings.event_venue_label.to_string(),
        address_label: strings.event_address_label.to_string(),
        map_link: strings.event_map_link.to_string(),
        wedding_date: wedding_date.clone(),
        events: settings
            .events
            .iter()
            .filter(|e| guest.map_or(true, |g| g.is_invited_to(&e.id)))
            .map(|e| event_view(e, offset, strings))
            .collect(),
        dress_code_title: strings.dress_code_title.to_string(),
        dress_code: or_default(&settings.dress_code, strings.dress_code_default),
    });

    let rsvp = visible.rsvp.then(|| rsvp_section(wedding, guest, strings));

    let gifts = (visible.gifts && !settings.gifts.items.is_empty()).then(|| GiftsView {
        title: strings.gifts_title.to_string(),
        intro: or_default(&settings.gifts.intro, strings.gifts_default_intro),
        open_link: strings.gift_open_link.to_string(),
        items: settings
            .gifts
            .items
            .iter()
            .map(|item| GiftView {
                icon: item.kind.icon(),
                kind_label: item.kind.label(strings).to_string(),
                title: or_default(&item.title, item.kind.label(strings)),
                description: present(&item.description),
                url: present(&item.url),
                account_details: present(&item.account_details),
            })
            .collect(),
    });

    let gallery = (visible.gallery && !settings.gallery.is_empty()).then(|| GalleryView {
        title: strings.gallery_title.to_string(),
        images: settings.gallery.clone(),
    });

    let hotels = (visible.hotel && !settings.hotels.is_empty()).then(|| HotelsView {
        title: strings.hotel_title.to_string(),
        booking_code_label: strings.hotel_booking_code.to_string(),
        book_label: strings.hotel_book.to_string(),
        hotels: settings
            .hotels
            .iter()
            .map(|h| HotelView {
                name: h.name.clone(),
                address: present(&h.address),
                url: present(&h.url),
                booking_code: present(&h.booking_code),
                notes: present(&h.notes),
            })
            .collect(),
    });

    let footer = visible.footer.then(|| FooterView {
        couple_names: couple_names.clone(),
        message: or_default(&settings.footer.message, strings.footer_default),
        hashtag: present(&settings.footer.hashtag),
    });

    let theme = sanitize_theme(&settings.theme);

    InvitationView {
        wedding_id: wedding.id.clone(),
        title: couple_names,
        primary_color: theme.primary_color,
        accent_color: theme.accent_color,
        hero,
        parents,
        couple,
        countdown,
        event_details,
        rsvp,
        gifts,
        gallery,
        hotels,
        footer,
    }
}

fn rsvp_section(
    wedding: &Wedding,
    guest: Option<&Guest>,
    strings: &LanguageStrings,
) -> RsvpSectionView {
    let rsvp = &wedding.settings.rsvp;
    let deadline = rsvp
        .deadline
        .map(|date| fill(strings.rsvp_deadline, &[("date", &format_date(date, strings))]));

    let mut section = RsvpSectionView {
        title: strings.rsvp_title.to_string(),
        intro: or_default(&rsvp.intro, strings.rsvp_default_intro),
        deadline,
        need_invite: None,
        current_response: None,
        notice: None,
        error: None,
        form: None,
    };

    match guest {
        None => section.need_invite = Some(strings.rsvp_need_invite.to_string()),
        Some(guest) => {
            if guest.rsvp_status != RsvpStatus::Pending {
                section.current_response = Some(fill(
                    strings.rsvp_current_response,
                    &[("status", guest.rsvp_status.label(strings))],
                ));
            }
            let form = RsvpForm::for_guest(wedding, guest);
            section.form = Some(RsvpFormView::build(
                wedding,
                &guest.invite_code,
                &form,
                &FieldErrors::default(),
                strings,
            ));
        }
    }

    section
}

fn event_heading(event: &EventDetails, strings: &LanguageStrings) -> String {
    or_default(&event.title, event.kind.label(strings))
}

fn event_view(event: &EventDetails, offset: FixedOffset, strings: &LanguageStrings) -> EventView {
    let starts = event.starts_at.map(|at| local(at, offset));
    EventView {
        heading: event_heading(event, strings),
        date: starts.map(|at| format_date(at.date(), strings)),
        time: starts.map(|at| at.format("%H:%M").to_string()),
        venue: present(&event.venue),
        address: present(&event.address),
        map_url: present(&event.map_url),
        notes: present(&event.notes),
    }
}

/// Localized long date, e.g. "Saturday, May 1, 2027".
pub fn format_date(date: NaiveDate, strings: &LanguageStrings) -> String {
    let weekday = strings.weekdays[date.weekday().num_days_from_monday() as usize];
    let month = strings.months[date.month0() as usize];
    fill(
        strings.date_format,
        &[
            ("weekday", weekday),
            ("day", &date.day().to_string()),
            ("month", month),
            ("year", &date.year().to_string()),
        ],
    )
}

fn utc_offset(minutes: i32) -> FixedOffset {
    FixedOffset::east_opt(minutes.saturating_mul(60)).unwrap_or_else(|| Utc.fix())
}

fn local(at: DateTime<Utc>, offset: FixedOffset) -> NaiveDateTime {
    at.with_timezone(&offset).naive_local()
}

fn present(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

fn or_default(value: &Option<String>, default: &str) -> String {
    present(value).unwrap_or_else(|| default.to_string())
}

fn hex_color_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^#(?:[0-9a-fA-F]{3}|[0-9a-fA-F]{6})$").expect("valid regex"))
}

/// Theme colours end up inside a `style` attribute; anything that is not a
/// plain hex colour is replaced by the default.
pub fn sanitize_theme(theme: &ThemeSettings) -> ThemeSettings {
    let defaults = ThemeSettings::default();
    let pick = |value: &str, default: String| {
        if hex_color_regex().is_match(value.trim()) {
            value.trim().to_string()
        } else {
            default
        }
    };
    ThemeSettings {
        primary_color: pick(&theme.primary_color, defaults.primary_color),
        accent_color: pick(&theme.accent_color, defaults.accent_color),
    }
}

/// Every piece of free text the couple wrote, in a fixed order.
fn custom_texts_mut(settings: &mut WeddingSettings) -> Vec<&mut String> {
    let mut slots: Vec<&mut String> = Vec::new();
    slots.extend(settings.hero.title.as_mut());
    slots.extend(settings.hero.subtitle.as_mut());
    slots.extend(settings.parents.message.as_mut());
    slots.extend(settings.couple.story.as_mut());
    for event in settings.events.iter_mut() {
        slots.extend(event.title.as_mut());
        slots.extend(event.notes.as_mut());
    }
    slots.extend(settings.dress_code.as_mut());
    slots.extend(settings.rsvp.intro.as_mut());
    slots.extend(settings.gifts.intro.as_mut());
    for item in settings.gifts.items.iter_mut() {
        slots.extend(item.title.as_mut());
        slots.extend(item.description.as_mut());
    }
    for image in settings.gallery.iter_mut() {
        slots.extend(image.caption.as_mut());
    }
    for hotel in settings.hotels.iter_mut() {
        slots.extend(hotel.notes.as_mut());
    }
    slots.extend(settings.footer.message.as_mut());
    slots
}

/// Translate the couple's custom copy into `language`. When the copy is
/// already in that language nothing is sent; when translation fails the
/// original copy is kept.
pub async fn localize_settings(
    client: &TranslationClient,
    settings: &WeddingSettings,
    language: Language,
) -> WeddingSettings {
    let mut localized = settings.clone();
    if settings.content_language == Some(language) {
        return localized;
    }

    let options = client
        .options(language)
        .with_source(settings.content_language)
        .with_domain(TRANSLATION_DOMAIN);

    let mut slots = custom_texts_mut(&mut localized);
    let originals: Vec<String> = slots.iter().map(|s| s.to_string()).collect();
    if originals.is_empty() {
        return localized;
    }

    match client.translate_batch(&originals, &options).await {
        Ok(translated) => {
            for (slot, text) in slots.iter_mut().zip(translated) {
                **slot = text;
            }
        }
        Err(e) => debug!("Keeping original invitation copy: {}", e),
    }

    localized
}
