use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::translator::{RemoteTranslator, TranslateError, TranslateRequest};

pub const DEFAULT_API_URL: &str = "https://api.openai.com/v1/chat/completions";

/// OpenAI Chat Completion request for translation
#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<Message>,
    max_completion_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    reasoning_effort: Option<String>,
}

/// Check if a model is a reasoning model that doesn't support temperature
fn is_reasoning_model(model: &str) -> bool {
    model.starts_with("gpt-5")
        || model.starts_with("o1")
        || model.starts_with("o3")
        || model.starts_with("o4")
}

#[derive(Debug, Serialize, Deserialize)]
struct Message {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: Message,
}

fn build_system_prompt(source_language: Option<&str>, target_language: &str) -> String {
    let source = source_language.unwrap_or("whatever language it is written in");
    format!(
        r#"You are translating text a couple wrote for their wedding invitation website. Translate it from {} to {}.

## Translation Rules

### DO NOT translate:
- Names of people, venues, hotels, and churches
- Street addresses
- URLs, e-mail addresses, and phone numbers
- Hashtags (e.g., #AnaYLuis2027)

### Preserve exactly:
- Dates and clock times
- Line breaks and emojis

### Tone:
- Warm and personal, the way the couple would speak to their guests
- Keep it about as long as the original

Reply with the translation only, without quotes or commentary. If the text is already in {}, return it unchanged."#,
        source, target_language, target_language
    )
}

fn build_user_prompt(text: &str, domain: Option<&str>) -> String {
    match domain {
        Some(domain) => format!("Context: {}\n\n{}", domain, text),
        None => text.to_string(),
    }
}

/// Translator backed by OpenAI chat completions.
#[derive(Debug, Clone)]
pub struct OpenAiTranslator {
    client: reqwest::Client,
    api_key: String,
    model: String,
    api_url: String,
}

impl OpenAiTranslator {
    pub fn new(
        client: reqwest::Client,
        api_key: impl Into<String>,
        model: impl Into<String>,
        api_url: impl Into<String>,
    ) -> Self {
        Self {
            client,
            api_key: api_key.into(),
            model: model.into(),
            api_url: api_url.into(),
        }
    }

    fn build_request(&self, request: &TranslateRequest) -> ChatRequest {
        // Reasoning models need higher token limits and don't support temperature
        let is_reasoning = is_reasoning_model(&self.model);

        ChatRequest {
            model: self.model.clone(),
            messages: vec![
                Message {
                    role: "system".to_string(),
                    content: build_system_prompt(
                        request.source.map(|l| l.name()),
                        request.target.name(),
                    ),
                },
                Message {
                    role: "user".to_string(),
                    content: build_user_prompt(&request.text, request.domain.as_deref()),
                },
            ],
            max_completion_tokens: if is_reasoning { 4000 } else { 1000 },
            temperature: if is_reasoning { None } else { Some(0.3) },
            reasoning_effort: if is_reasoning {
                Some("low".to_string())
            } else {
                None
            },
        }
    }
}

#[async_trait]
impl RemoteTranslator for OpenAiTranslator {
    async fn translate(&self, request: &TranslateRequest) -> Result<String, TranslateError> {
        debug!(
            "Requesting OpenAI translation to {} with {}",
            request.target.name(),
            self.model
        );

        let response = self
            .client
            .post(&self.api_url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&self.build_request(request))
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response
                .text()
                .await
                .unwrap_or_else(|e| format!("<failed to read body: {}>", e));
            return Err(TranslateError::Api { status, body });
        }

        let chat_response: ChatResponse = response
            .json()
            .await
            .map_err(|e| TranslateError::InvalidResponse(e.to_string()))?;

        chat_response
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content.trim().to_string())
            .ok_or_else(|| {
                TranslateError::InvalidResponse(
                    "OpenAI translation response contained no choices".to_string(),
                )
            })
    }
}
