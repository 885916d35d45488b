//! Internationalization (i18n) module for the bilingual invitation site.
//!
//! # Architecture
//!
//! - `registry`: Single source of truth for supported languages and their copy
//! - `language`: Validated `Language` type
//! - `strings`: Localized user-facing copy (English and Spanish)
//! - `validator`: Translation quality checks for machine-translated text
//! - `metrics`: Translation cache and remote-call counters
//!
//! # Example
//!
//! ```rust,ignore
//! use crate::i18n::Language;
//!
//! let spanish = Language::from_code("es")?;
//! let title = spanish.strings().rsvp_title;
//! ```

mod language;
mod metrics;
mod registry;
mod strings;
mod validator;

pub use language::Language;
pub use metrics::{MetricsReport, TranslationMetrics};
pub use registry::{LanguageConfig, LanguageRegistry};
pub use strings::LanguageStrings;
pub use validator::{TranslationValidator, ValidationReport};

/// Substitute `{key}` placeholders in a localized string. The template is
/// scanned once, so substituted values are never expanded again.
pub fn fill(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find('{') {
        out.push_str(&rest[..start]);
        let after = &rest[start + 1..];
        let found = after.find('}').and_then(|end| {
            let key = &after[..end];
            values
                .iter()
                .find(|(k, _)| *k == key)
                .map(|(_, value)| (*value, end))
        });
        match found {
            Some((value, end)) => {
                out.push_str(value);
                rest = &after[end + 1..];
            }
            None => {
                out.push('{');
                rest = after;
            }
        }
    }

    out.push_str(rest);
    out
}
