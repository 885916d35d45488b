//! JSON endpoints: on-demand translation and translation metrics.

use axum::{
    extract::State,
    http::HeaderMap,
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::error::{AppError, Result};
use crate::i18n::{Language, MetricsReport};
use crate::security::has_valid_api_key;
use crate::state::AppState;
use crate::translation::SourceLanguage;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslatePayload {
    pub text: String,
    pub target: String,
    /// Language code, or absent/`auto` to let the translator detect it
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub domain: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslateResponse {
    pub text: String,
    /// `false` when translation failed and `text` is the original
    pub translated: bool,
}

fn parse_source(raw: Option<&str>) -> Result<SourceLanguage> {
    match raw.map(str::trim) {
        None | Some("") | Some("auto") => Ok(SourceLanguage::Auto),
        Some(code) => Language::from_code(code)
            .map(SourceLanguage::Explicit)
            .map_err(|e| AppError::BadRequest(e.to_string())),
    }
}

/// `POST /api/translate`
///
/// Never fails because of the translator: on any translation error the
/// original text is returned with `translated: false`.
#[instrument(skip(state, payload), fields(target = %payload.target))]
pub async fn translate(
    State(state): State<AppState>,
    Json(payload): Json<TranslatePayload>,
) -> Result<Json<TranslateResponse>> {
    let target = Language::from_code(payload.target.trim())
        .map_err(|e| AppError::BadRequest(e.to_string()))?;
    let source = parse_source(payload.source.as_deref())?;

    let mut options = state.translations().options(target).with_source(source);
    if let Some(domain) = payload.domain.as_deref().map(str::trim).filter(|d| !d.is_empty()) {
        options = options.with_domain(domain);
    }

    let response = match state.translations().translate(&payload.text, &options).await {
        Ok(text) => TranslateResponse {
            text,
            translated: true,
        },
        Err(e) => {
            debug!(error = %e, "Returning original text");
            TranslateResponse {
                text: payload.text,
                translated: false,
            }
        }
    };
    Ok(Json(response))
}

/// `GET /admin/translation-metrics` (requires `X-API-Key`)
#[instrument(skip(state, headers))]
pub async fn translation_metrics(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<MetricsReport>> {
    if !has_valid_api_key(&headers, state.config().api_key.as_deref()) {
        return Err(AppError::Unauthorized);
    }
    Ok(Json(state.translations().metrics().report()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_source() {
        assert_eq!(parse_source(None).unwrap(), SourceLanguage::Auto);
        assert_eq!(parse_source(Some("auto")).unwrap(), SourceLanguage::Auto);
        assert_eq!(
            parse_source(Some("es")).unwrap(),
            SourceLanguage::Explicit(Language::SPANISH)
        );
        assert!(matches!(parse_source(Some("fr")), Err(AppError::BadRequest(_))));
    }
}
