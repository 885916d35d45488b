//! Translation quality validation module.
//!
//! Machine translation of invitation copy must not touch the details guests
//! act on: links, e-mail addresses, phone numbers and clock times. The
//! validator compares those between source and translation and reports
//! mismatches as warnings. Nothing is rejected; callers only log the report.

use regex::Regex;
use std::sync::OnceLock;

/// Validation report containing errors and warnings about a translation.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ValidationReport {
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl ValidationReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// Check if the report is clean (no errors or warnings)
    pub fn is_clean(&self) -> bool {
        !self.has_errors() && !self.has_warnings()
    }
}

/// Validator for translation quality.
pub struct TranslationValidator;

static URL_REGEX: OnceLock<Regex> = OnceLock::new();
static EMAIL_REGEX: OnceLock<Regex> = OnceLock::new();
static PHONE_REGEX: OnceLock<Regex> = OnceLock::new();
static TIME_REGEX: OnceLock<Regex> = OnceLock::new();

impl TranslationValidator {
    /// Validate that a translation preserves the actionable details of the
    /// original text.
    pub fn validate(original: &str, translated: &str) -> ValidationReport {
        let mut report = ValidationReport::new();

        if translated.trim().is_empty() && !original.trim().is_empty() {
            report
                .errors
                .push("Translation is empty for non-empty source text".to_string());
            return report;
        }

        let orig_urls = Self::extract_urls(original);
        let trans_urls = Self::extract_urls(translated);
        if orig_urls != trans_urls {
            report.warnings.push(format!(
                "URL mismatch: original has {} URLs, translation has {} URLs",
                orig_urls.len(),
                trans_urls.len()
            ));
        }

        let orig_emails = Self::extract_emails(original);
        let trans_emails = Self::extract_emails(translated);
        if orig_emails != trans_emails {
            report.warnings.push(format!(
                "Email mismatch: original has {:?}, translation has {:?}",
                orig_emails, trans_emails
            ));
        }

        let orig_phones = Self::extract_phone_digits(original);
        let trans_phones = Self::extract_phone_digits(translated);
        if orig_phones != trans_phones {
            report.warnings.push(format!(
                "Phone number mismatch: original has {:?}, translation has {:?}",
                orig_phones, trans_phones
            ));
        }

        let orig_times = Self::extract_times(original);
        let trans_times = Self::extract_times(translated);
        if orig_times.len() != trans_times.len() {
            report.warnings.push(format!(
                "Time count mismatch: original has {}, translation has {}",
                orig_times.len(),
                trans_times.len()
            ));
        }

        report
    }

    fn extract_urls(text: &str) -> Vec<String> {
        let regex = URL_REGEX.get_or_init(|| Regex::new(r"https?://[^\s)\]]+").unwrap());

        regex
            .find_iter(text)
            .map(|m| m.as_str().trim_end_matches(['.', ',']).to_string())
            .collect()
    }

    fn extract_emails(text: &str) -> Vec<String> {
        let regex = EMAIL_REGEX.get_or_init(|| {
            Regex::new(r"[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}").unwrap()
        });

        regex
            .find_iter(text)
            .map(|m| m.as_str().to_lowercase())
            .collect()
    }

    /// Phone numbers compared by their digits only, since translators
    /// sometimes regroup them.
    fn extract_phone_digits(text: &str) -> Vec<String> {
        let regex = PHONE_REGEX.get_or_init(|| Regex::new(r"\+?\d[\d\s().-]{6,}\d").unwrap());

        regex
            .find_iter(text)
            .map(|m| m.as_str().chars().filter(char::is_ascii_digit).collect())
            .collect()
    }

    fn extract_times(text: &str) -> Vec<String> {
        let regex =
            TIME_REGEX.get_or_init(|| Regex::new(r"\b([01]?\d|2[0-3]):[0-5]\d\b").unwrap());

        regex
            .find_iter(text)
            .map(|m| m.as_str().to_string())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_urls() {
        let text = "Directions at https://maps.example.com/venue. RSVP at http://rsvp.example.org";
        let urls = TranslationValidator::extract_urls(text);
        assert_eq!(
            urls,
            vec!["https://maps.example.com/venue", "http://rsvp.example.org"]
        );
    }

    #[test]
    fn test_extract_emails_lowercased() {
        let emails = TranslationValidator::extract_emails("Write to Ana@Example.com please");
        assert_eq!(emails, vec!["ana@example.com"]);
    }

    #[test]
    fn test_extract_phone_digits_ignores_grouping() {
        let a = TranslationValidator::extract_phone_digits("Call +52 (55) 1234-5678");
        let b = TranslationValidator::extract_phone_digits("Llama al +52 55 1234 5678");
        assert_eq!(a, vec!["525512345678"]);
        assert_eq!(a, b);
    }

    #[test]
    fn test_extract_times() {
        let times = TranslationValidator::extract_times("Ceremony at 16:30, dinner at 8:00");
        assert_eq!(times, vec!["16:30", "8:00"]);
    }

    #[test]
    fn test_validate_clean_translation() {
        let original = "The shuttle leaves at 15:00 from https://example.com/hotel.";
        let translated = "El transporte sale a las 15:00 desde https://example.com/hotel.";
        assert!(TranslationValidator::validate(original, translated).is_clean());
    }

    #[test]
    fn test_validate_reports_dropped_url() {
        let report = TranslationValidator::validate(
            "Registry: https://registry.example.com",
            "Mesa de regalos",
        );
        assert!(report.has_warnings());
        assert!(report.warnings[0].contains("URL mismatch"));
        assert!(!report.has_errors());
    }

    #[test]
    fn test_validate_reports_changed_email() {
        let report = TranslationValidator::validate(
            "Questions? ana@example.com",
            "¿Preguntas? ana@ejemplo.com",
        );
        assert!(report.warnings.iter().any(|w| w.contains("Email mismatch")));
    }

    #[test]
    fn test_validate_empty_translation_is_error() {
        let report = TranslationValidator::validate("Hello", "   ");
        assert!(report.has_errors());
    }
}
