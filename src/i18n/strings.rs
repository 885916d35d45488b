/// All localized user-facing strings for a language.
///
/// Strings are plain text; the templates escape them on output. Placeholders
/// in braces (`{name}`, `{date}`, `{count}`) are substituted by the caller.
#[derive(Debug, Clone)]
pub struct LanguageStrings {
    // ==================== Page States ====================
    pub loading: &'static str,
    pub error_generic: &'static str,
    pub retry: &'static str,
    pub wedding_not_found: &'static str,
    pub guest_not_found: &'static str,
    pub invitation_revoked: &'static str,
    pub unavailable: &'static str,

    // ==================== Chrome ====================
    /// Placeholders: {one}, {two}
    pub page_title: &'static str,
    pub nav_invitation: &'static str,
    pub nav_party: &'static str,
    pub language_label: &'static str,
    pub theme_label: &'static str,
    pub theme_light: &'static str,
    pub theme_dark: &'static str,
    pub theme_system: &'static str,
    pub apply: &'static str,

    // ==================== Hero ====================
    pub hero_default_title: &'static str,
    pub hero_default_subtitle: &'static str,
    /// Placeholders: {name}
    pub hero_greeting: &'static str,

    // ==================== Parents ====================
    pub parents_title: &'static str,
    pub parents_of_bride: &'static str,
    pub parents_of_groom: &'static str,

    // ==================== Couple ====================
    pub couple_title: &'static str,
    pub couple_default_story: &'static str,

    // ==================== Countdown ====================
    pub countdown_title: &'static str,
    pub countdown_days: &'static str,
    pub countdown_hours: &'static str,
    pub countdown_minutes: &'static str,
    pub countdown_seconds: &'static str,
    pub countdown_finished: &'static str,

    // ==================== Event Details ====================
    pub event_title: &'static str,
    pub ceremony_title: &'static str,
    pub reception_title: &'static str,
    pub event_date_label: &'static str,
    pub event_time_label: &'static str,
    pub event_venue_label: &'static str,
    pub event_address_label: &'static str,
    pub event_map_link: &'static str,
    pub dress_code_title: &'static str,
    pub dress_code_default: &'static str,

    // ==================== RSVP ====================
    pub rsvp_title: &'static str,
    pub rsvp_default_intro: &'static str,
    /// Placeholders: {date}
    pub rsvp_deadline: &'static str,
    pub rsvp_need_invite: &'static str,
    /// Placeholders: {status}
    pub rsvp_current_response: &'static str,
    pub rsvp_attendance_label: &'static str,
    pub rsvp_option_confirmed: &'static str,
    pub rsvp_option_declined: &'static str,
    pub rsvp_option_maybe: &'static str,
    pub rsvp_events_label: &'static str,
    pub rsvp_plus_ones_label: &'static str,
    /// Placeholders: {count}
    pub rsvp_plus_ones_allowance: &'static str,
    pub rsvp_plus_one_name: &'static str,
    pub rsvp_plus_one_dietary: &'static str,
    pub rsvp_plus_one_add: &'static str,
    pub rsvp_plus_one_remove: &'static str,
    pub rsvp_dietary_label: &'static str,
    pub rsvp_transport_label: &'static str,
    pub rsvp_accommodation_label: &'static str,
    pub rsvp_email_label: &'static str,
    pub rsvp_phone_label: &'static str,
    pub rsvp_emergency_name_label: &'static str,
    pub rsvp_emergency_phone_label: &'static str,
    pub rsvp_message_label: &'static str,
    pub rsvp_submit: &'static str,
    pub rsvp_submitting: &'static str,
    pub rsvp_thanks_confirmed: &'static str,
    pub rsvp_thanks_declined: &'static str,
    pub rsvp_thanks_maybe: &'static str,
    pub rsvp_submit_failed: &'static str,
    pub error_attendance_required: &'static str,
    pub error_plus_one_name_required: &'static str,
    /// Placeholders: {count}
    pub error_plus_one_limit: &'static str,

    // ==================== RSVP Status ====================
    pub status_pending: &'static str,
    pub status_confirmed: &'static str,
    pub status_declined: &'static str,
    pub status_maybe: &'static str,

    // ==================== Gifts ====================
    pub gifts_title: &'static str,
    pub gifts_default_intro: &'static str,
    pub gift_registry: &'static str,
    pub gift_cash_fund: &'static str,
    pub gift_bank_transfer: &'static str,
    pub gift_honeymoon: &'static str,
    pub gift_charity: &'static str,
    pub gift_open_link: &'static str,

    // ==================== Gallery / Hotel / Footer ====================
    pub gallery_title: &'static str,
    pub hotel_title: &'static str,
    pub hotel_booking_code: &'static str,
    pub hotel_book: &'static str,
    pub footer_default: &'static str,

    // ==================== Dates ====================
    pub months: [&'static str; 12],
    /// Monday first
    pub weekdays: [&'static str; 7],
    /// Placeholders: {weekday}, {day}, {month}, {year}
    pub date_format: &'static str,

    // ==================== Wedding Party ====================
    pub party_title: &'static str,
    pub party_empty: &'static str,
    pub side_bride: &'static str,
    pub side_groom: &'static str,
    pub side_couple: &'static str,
    pub role_officiant: &'static str,
    pub role_maid_of_honor: &'static str,
    pub role_matron_of_honor: &'static str,
    pub role_best_man: &'static str,
    pub role_bridesmaid: &'static str,
    pub role_groomsman: &'static str,
    pub role_flower_girl: &'static str,
    pub role_ring_bearer: &'static str,
    pub role_usher: &'static str,
    pub role_reader: &'static str,
    pub role_padrinos_velacion: &'static str,
    pub role_padrinos_lazo: &'static str,
    pub role_padrinos_arras: &'static str,
    pub role_padrinos_anillos: &'static str,
}

// ==================== English Strings ====================

pub const ENGLISH_STRINGS: LanguageStrings = LanguageStrings {
    loading: "Loading…",
    error_generic: "Something went wrong. Please try again.",
    retry: "Try again",
    wedding_not_found: "We couldn't find this wedding. Please check the link you received.",
    guest_not_found: "We couldn't find your invitation. Please check the link you received.",
    invitation_revoked: "This invitation is no longer valid. Please contact the couple if you think this is a mistake.",
    unavailable: "The invitation is temporarily unavailable. Please try again in a moment.",

    page_title: "{one} & {two}",
    nav_invitation: "Invitation",
    nav_party: "Wedding party",
    language_label: "Language",
    theme_label: "Theme",
    theme_light: "Light",
    theme_dark: "Dark",
    theme_system: "System",
    apply: "Apply",

    hero_default_title: "We're getting married!",
    hero_default_subtitle: "Together with their families, we invite you to celebrate our wedding.",
    hero_greeting: "Dear {name},",

    parents_title: "With the blessing of our parents",
    parents_of_bride: "Parents of the bride",
    parents_of_groom: "Parents of the groom",

    couple_title: "Our story",
    couple_default_story: "We can't wait to celebrate this new chapter with the people we love.",

    countdown_title: "Counting down",
    countdown_days: "Days",
    countdown_hours: "Hours",
    countdown_minutes: "Minutes",
    countdown_seconds: "Seconds",
    countdown_finished: "Today is the day!",

    event_title: "The celebration",
    ceremony_title: "Ceremony",
    reception_title: "Reception",
    event_date_label: "Date",
    event_time_label: "Time",
    event_venue_label: "Venue",
    event_address_label: "Address",
    event_map_link: "View map",
    dress_code_title: "Dress code",
    dress_code_default: "Formal attire",

    rsvp_title: "RSVP",
    rsvp_default_intro: "Please let us know if you can join us.",
    rsvp_deadline: "Kindly reply by {date}.",
    rsvp_need_invite: "Use the personal link from your invitation to reply.",
    rsvp_current_response: "Your current response: {status}",
    rsvp_attendance_label: "Will you attend?",
    rsvp_option_confirmed: "Joyfully accepts",
    rsvp_option_declined: "Regretfully declines",
    rsvp_option_maybe: "Not sure yet",
    rsvp_events_label: "Which events will you attend?",
    rsvp_plus_ones_label: "Your guests",
    rsvp_plus_ones_allowance: "You may bring up to {count} guests.",
    rsvp_plus_one_name: "Guest name",
    rsvp_plus_one_dietary: "Guest dietary restrictions",
    rsvp_plus_one_add: "Add a guest",
    rsvp_plus_one_remove: "Remove",
    rsvp_dietary_label: "Dietary restrictions",
    rsvp_transport_label: "I will need transportation",
    rsvp_accommodation_label: "I will need accommodation",
    rsvp_email_label: "Email",
    rsvp_phone_label: "Phone",
    rsvp_emergency_name_label: "Emergency contact name",
    rsvp_emergency_phone_label: "Emergency contact phone",
    rsvp_message_label: "A message for the couple",
    rsvp_submit: "Send RSVP",
    rsvp_submitting: "Sending…",
    rsvp_thanks_confirmed: "Thank you! We can't wait to celebrate with you.",
    rsvp_thanks_declined: "Thank you for letting us know. You will be missed.",
    rsvp_thanks_maybe: "Thank you! Please update your answer once you know.",
    rsvp_submit_failed: "We couldn't save your RSVP. Please try again.",
    error_attendance_required: "Please let us know whether you will attend.",
    error_plus_one_name_required: "Please enter your guest's name.",
    error_plus_one_limit: "You can bring at most {count} guests.",

    status_pending: "Awaiting reply",
    status_confirmed: "Attending",
    status_declined: "Not attending",
    status_maybe: "Maybe",

    gifts_title: "Gifts",
    gifts_default_intro: "Your presence is the greatest gift. If you wish to honor us with a gift, here are some ideas.",
    gift_registry: "Gift registry",
    gift_cash_fund: "Cash fund",
    gift_bank_transfer: "Bank transfer",
    gift_honeymoon: "Honeymoon fund",
    gift_charity: "Charity donation",
    gift_open_link: "Open",

    gallery_title: "Gallery",
    hotel_title: "Where to stay",
    hotel_booking_code: "Booking code",
    hotel_book: "Book a room",
    footer_default: "Thank you for being part of our story.",

    months: [
        "January", "February", "March", "April", "May", "June", "July", "August", "September",
        "October", "November", "December",
    ],
    weekdays: [
        "Monday", "Tuesday", "Wednesday", "Thursday", "Friday", "Saturday", "Sunday",
    ],
    date_format: "{weekday}, {month} {day}, {year}",

    party_title: "Wedding party",
    party_empty: "Our wedding party will be announced soon.",
    side_bride: "Bride's side",
    side_groom: "Groom's side",
    side_couple: "Friends of the couple",
    role_officiant: "Officiant",
    role_maid_of_honor: "Maid of honor",
    role_matron_of_honor: "Matron of honor",
    role_best_man: "Best man",
    role_bridesmaid: "Bridesmaid",
    role_groomsman: "Groomsman",
    role_flower_girl: "Flower girl",
    role_ring_bearer: "Ring bearer",
    role_usher: "Usher",
    role_reader: "Reader",
    role_padrinos_velacion: "Sponsors of the veil",
    role_padrinos_lazo: "Sponsors of the lasso",
    role_padrinos_arras: "Sponsors of the coins",
    role_padrinos_anillos: "Sponsors of the rings",
};

// ==================== Spanish Strings ====================

pub const SPANISH_STRINGS: LanguageStrings = LanguageStrings {
    loading: "Cargando…",
    error_generic: "Algo salió mal. Por favor, inténtalo de nuevo.",
    retry: "Reintentar",
    wedding_not_found: "No encontramos esta boda. Por favor, revisa el enlace que recibiste.",
    guest_not_found: "No encontramos tu invitación. Por favor, revisa el enlace que recibiste.",
    invitation_revoked: "Esta invitación ya no es válida. Si crees que es un error, contacta a los novios.",
    unavailable: "La invitación no está disponible en este momento. Inténtalo de nuevo en unos instantes.",

    page_title: "{one} y {two}",
    nav_invitation: "Invitación",
    nav_party: "Cortejo nupcial",
    language_label: "Idioma",
    theme_label: "Tema",
    theme_light: "Claro",
    theme_dark: "Oscuro",
    theme_system: "Sistema",
    apply: "Aplicar",

    hero_default_title: "¡Nos casamos!",
    hero_default_subtitle: "Junto con nuestras familias, te invitamos a celebrar nuestra boda.",
    hero_greeting: "Querido/a {name}:",

    parents_title: "Con la bendición de nuestros padres",
    parents_of_bride: "Padres de la novia",
    parents_of_groom: "Padres del novio",

    couple_title: "Nuestra historia",
    couple_default_story: "Estamos deseando celebrar este nuevo capítulo con las personas que queremos.",

    countdown_title: "Cuenta regresiva",
    countdown_days: "Días",
    countdown_hours: "Horas",
    countdown_minutes: "Minutos",
    countdown_seconds: "Segundos",
    countdown_finished: "¡Hoy es el gran día!",

    event_title: "La celebración",
    ceremony_title: "Ceremonia",
    reception_title: "Recepción",
    event_date_label: "Fecha",
    event_time_label: "Hora",
    event_venue_label: "Lugar",
    event_address_label: "Dirección",
    event_map_link: "Ver mapa",
    dress_code_title: "Código de vestimenta",
    dress_code_default: "Etiqueta formal",

    rsvp_title: "Confirmación",
    rsvp_default_intro: "Por favor, confírmanos si podrás acompañarnos.",
    rsvp_deadline: "Por favor, responde antes del {date}.",
    rsvp_need_invite: "Usa el enlace personal de tu invitación para responder.",
    rsvp_current_response: "Tu respuesta actual: {status}",
    rsvp_attendance_label: "¿Asistirás?",
    rsvp_option_confirmed: "Con gusto asistiré",
    rsvp_option_declined: "Lamentablemente no podré asistir",
    rsvp_option_maybe: "Aún no lo sé",
    rsvp_events_label: "¿A qué eventos asistirás?",
    rsvp_plus_ones_label: "Tus acompañantes",
    rsvp_plus_ones_allowance: "Puedes traer hasta {count} acompañantes.",
    rsvp_plus_one_name: "Nombre del acompañante",
    rsvp_plus_one_dietary: "Restricciones alimentarias del acompañante",
    rsvp_plus_one_add: "Agregar acompañante",
    rsvp_plus_one_remove: "Quitar",
    rsvp_dietary_label: "Restricciones alimentarias",
    rsvp_transport_label: "Necesitaré transporte",
    rsvp_accommodation_label: "Necesitaré hospedaje",
    rsvp_email_label: "Correo electrónico",
    rsvp_phone_label: "Teléfono",
    rsvp_emergency_name_label: "Contacto de emergencia",
    rsvp_emergency_phone_label: "Teléfono de emergencia",
    rsvp_message_label: "Un mensaje para los novios",
    rsvp_submit: "Enviar confirmación",
    rsvp_submitting: "Enviando…",
    rsvp_thanks_confirmed: "¡Gracias! Estamos felices de celebrar contigo.",
    rsvp_thanks_declined: "Gracias por avisarnos. Te extrañaremos.",
    rsvp_thanks_maybe: "¡Gracias! Actualiza tu respuesta cuando lo sepas.",
    rsvp_submit_failed: "No pudimos guardar tu confirmación. Por favor, inténtalo de nuevo.",
    error_attendance_required: "Por favor, indícanos si asistirás.",
    error_plus_one_name_required: "Por favor, escribe el nombre de tu acompañante.",
    error_plus_one_limit: "Puedes traer como máximo {count} acompañantes.",

    status_pending: "Pendiente",
    status_confirmed: "Asistirá",
    status_declined: "No asistirá",
    status_maybe: "Tal vez",

    gifts_title: "Regalos",
    gifts_default_intro: "Tu presencia es nuestro mejor regalo. Si deseas obsequiarnos algo, aquí tienes algunas ideas.",
    gift_registry: "Mesa de regalos",
    gift_cash_fund: "Fondo en efectivo",
    gift_bank_transfer: "Transferencia bancaria",
    gift_honeymoon: "Fondo para la luna de miel",
    gift_charity: "Donativo benéfico",
    gift_open_link: "Abrir",

    gallery_title: "Galería",
    hotel_title: "Dónde hospedarse",
    hotel_booking_code: "Código de reserva",
    hotel_book: "Reservar habitación",
    footer_default: "Gracias por ser parte de nuestra historia.",

    months: [
        "enero", "febrero", "marzo", "abril", "mayo", "junio", "julio", "agosto", "septiembre",
        "octubre", "noviembre", "diciembre",
    ],
    weekdays: [
        "lunes", "martes", "miércoles", "jueves", "viernes", "sábado", "domingo",
    ],
    date_format: "{weekday}, {day} de {month} de {year}",

    party_title: "Cortejo nupcial",
    party_empty: "Pronto presentaremos a nuestro cortejo nupcial.",
    side_bride: "Por parte de la novia",
    side_groom: "Por parte del novio",
    side_couple: "Amigos de los novios",
    role_officiant: "Oficiante",
    role_maid_of_honor: "Dama de honor principal",
    role_matron_of_honor: "Madrina de honor",
    role_best_man: "Padrino de honor",
    role_bridesmaid: "Dama de honor",
    role_groomsman: "Caballero de honor",
    role_flower_girl: "Niña de las flores",
    role_ring_bearer: "Paje de los anillos",
    role_usher: "Acomodador",
    role_reader: "Lector",
    role_padrinos_velacion: "Padrinos de velación",
    role_padrinos_lazo: "Padrinos de lazo",
    role_padrinos_arras: "Padrinos de arras",
    role_padrinos_anillos: "Padrinos de anillos",
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_title_placeholders() {
        assert!(ENGLISH_STRINGS.page_title.contains("{one}"));
        assert!(ENGLISH_STRINGS.page_title.contains("{two}"));
        assert!(SPANISH_STRINGS.page_title.contains("{one}"));
        assert!(SPANISH_STRINGS.page_title.contains("{two}"));
    }

    #[test]
    fn test_count_placeholders() {
        for strings in [&ENGLISH_STRINGS, &SPANISH_STRINGS] {
            assert!(strings.rsvp_plus_ones_allowance.contains("{count}"));
            assert!(strings.error_plus_one_limit.contains("{count}"));
            assert!(strings.rsvp_deadline.contains("{date}"));
            assert!(strings.hero_greeting.contains("{name}"));
            assert!(strings.rsvp_current_response.contains("{status}"));
        }
    }

    #[test]
    fn test_spanish_copy_differs_from_english() {
        assert_ne!(ENGLISH_STRINGS.rsvp_title, SPANISH_STRINGS.rsvp_title);
        assert_ne!(ENGLISH_STRINGS.loading, SPANISH_STRINGS.loading);
        assert_ne!(
            ENGLISH_STRINGS.invitation_revoked,
            SPANISH_STRINGS.invitation_revoked
        );
    }

    #[test]
    fn test_error_messages_not_empty() {
        for strings in [&ENGLISH_STRINGS, &SPANISH_STRINGS] {
            assert!(!strings.error_attendance_required.is_empty());
            assert!(!strings.error_plus_one_name_required.is_empty());
            assert!(!strings.rsvp_submit_failed.is_empty());
            assert!(!strings.wedding_not_found.is_empty());
            assert!(!strings.guest_not_found.is_empty());
        }
    }
}
