//! Remote translation call.
//!
//! `RemoteTranslator` is the one seam the translation client calls when the
//! cache cannot answer. Implementations:
//! - `FunctionTranslator`: a hosted translation function reached over HTTP
//! - `openai::OpenAiTranslator`: OpenAI chat completions
//! - `DisabledTranslator`: always fails, so every caller shows original text

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::i18n::Language;

/// Input of one remote translation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TranslateRequest {
    pub text: String,
    /// `None` asks the backend to detect the source language
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<Language>,
    pub target: Language,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,
}

#[derive(Debug, Error)]
pub enum TranslateError {
    #[error("translation is disabled")]
    Disabled,

    #[error("failed to reach translation service: {0}")]
    Request(String),

    #[error("translation service error ({status}): {body}")]
    Api { status: u16, body: String },

    #[error("invalid translation response: {0}")]
    InvalidResponse(String),
}

impl From<reqwest::Error> for TranslateError {
    fn from(err: reqwest::Error) -> Self {
        TranslateError::Request(err.to_string())
    }
}

#[async_trait]
pub trait RemoteTranslator: Send + Sync {
    async fn translate(&self, request: &TranslateRequest) -> Result<String, TranslateError>;
}

/// Translator used when no provider is configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct DisabledTranslator;

#[async_trait]
impl RemoteTranslator for DisabledTranslator {
    async fn translate(&self, _request: &TranslateRequest) -> Result<String, TranslateError> {
        Err(TranslateError::Disabled)
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FunctionResponse {
    translated_text: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

/// Hosted translation function: `POST {url}` with the request as JSON,
/// answering `{ "translatedText": "..." }`.
#[derive(Debug, Clone)]
pub struct FunctionTranslator {
    client: reqwest::Client,
    url: String,
    api_key: Option<String>,
}

impl FunctionTranslator {
    pub fn new(client: reqwest::Client, url: impl Into<String>, api_key: Option<String>) -> Self {
        Self {
            client,
            url: url.into(),
            api_key,
        }
    }
}

#[async_trait]
impl RemoteTranslator for FunctionTranslator {
    async fn translate(&self, request: &TranslateRequest) -> Result<String, TranslateError> {
        debug!(
            "Calling translation function ({} chars, target {})",
            request.text.chars().count(),
            request.target
        );

        let mut builder = self.client.post(&self.url).json(request);
        if let Some(key) = &self.api_key {
            builder = builder.bearer_auth(key);
        }

        let response = builder.send().await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response
                .text()
                .await
                .unwrap_or_else(|e| format!("<failed to read body: {}>", e));
            return Err(TranslateError::Api { status, body });
        }

        let body: FunctionResponse = response
            .json()
            .await
            .map_err(|e| TranslateError::InvalidResponse(e.to_string()))?;

        match (body.translated_text, body.error) {
            (Some(text), _) => Ok(text),
            (None, Some(error)) => Err(TranslateError::InvalidResponse(error)),
            (None, None) => Err(TranslateError::InvalidResponse(
                "response contained no translatedText".to_string(),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::{
        matchers::{body_json, header, method, path},
        Mock, MockServer, ResponseTemplate,
    };

    fn request(text: &str) -> TranslateRequest {
        TranslateRequest {
            text: text.to_string(),
            source: Some(Language::ENGLISH),
            target: Language::SPANISH,
            domain: Some("invitation".to_string()),
        }
    }

    #[test]
    fn test_request_serialization_omits_auto_source() {
        let mut req = request("Hello");
        req.source = None;
        req.domain = None;
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json, serde_json::json!({"text": "Hello", "target": "es"}));
    }

    #[tokio::test]
    async fn test_disabled_translator_always_fails() {
        let result = DisabledTranslator.translate(&request("Hello")).await;
        assert!(matches!(result, Err(TranslateError::Disabled)));
    }

    #[tokio::test]
    async fn test_function_translator_success() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/functions/v1/translate"))
            .and(header("Authorization", "Bearer fn-key"))
            .and(body_json(serde_json::json!({
                "text": "Hello",
                "source": "en",
                "target": "es",
                "domain": "invitation"
            })))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({"translatedText": "Hola"})),
            )
            .expect(1)
            .mount(&mock_server)
            .await;

        let translator = FunctionTranslator::new(
            reqwest::Client::new(),
            format!("{}/functions/v1/translate", mock_server.uri()),
            Some("fn-key".to_string()),
        );

        let result = translator.translate(&request("Hello")).await.unwrap();
        assert_eq!(result, "Hola");
    }

    #[tokio::test]
    async fn test_function_translator_api_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .expect(1)
            .mount(&mock_server)
            .await;

        let translator = FunctionTranslator::new(reqwest::Client::new(), mock_server.uri(), None);

        let err = translator.translate(&request("Hello")).await.unwrap_err();
        match err {
            TranslateError::Api { status, body } => {
                assert_eq!(status, 500);
                assert_eq!(body, "boom");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_function_translator_error_payload() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({"error": "quota exceeded"})),
            )
            .mount(&mock_server)
            .await;

        let translator = FunctionTranslator::new(reqwest::Client::new(), mock_server.uri(), None);

        let err = translator.translate(&request("Hello")).await.unwrap_err();
        assert!(err.to_string().contains("quota exceeded"));
    }

    #[tokio::test]
    async fn test_function_translator_unreachable() {
        let translator = FunctionTranslator::new(
            reqwest::Client::new(),
            "http://127.0.0.1:1/translate",
            None,
        );
        let err = translator.translate(&request("Hello")).await.unwrap_err();
        assert!(matches!(err, TranslateError::Request(_)));
    }
}
