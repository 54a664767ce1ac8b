//! # campus-ai
//!
//! Completion client for Campus.
//!
//! Two features lean on a language model: grade suggestions for a submission
//! and multiple-choice flashcards generated from a note. Both go through the
//! [`CompletionClient`] trait so they can be exercised without a network;
//! [`OpenAiClient`] is the production implementation against any
//! OpenAI-compatible `/chat/completions` endpoint.

pub mod flashcards;
pub mod grading;

mod error;
mod http;

use std::future::Future;
use std::time::Duration;

use serde::{Deserialize, Serialize};

pub use error::AiError;
pub use flashcards::generate_flashcards;
pub use grading::{GradeSuggestion, suggest_grade};

use crate::http::check_response;

/// One single-turn prompt.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompletionRequest {
    pub model: String,
    pub prompt: String,
    pub temperature: f32,
}

/// Anything that turns a prompt into text.
pub trait CompletionClient: Send + Sync {
    /// Run the prompt and return the model's reply, trimmed.
    fn complete(
        &self,
        request: &CompletionRequest,
    ) -> impl Future<Output = Result<String, AiError>> + Send;
}

// ── OpenAI-compatible client ───────────────────────────────────────

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 1],
    temperature: f32,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatReply,
}

#[derive(Deserialize)]
struct ChatReply {
    content: Option<String>,
}

impl ChatResponse {
    fn into_text(self) -> Result<String, AiError> {
        self.choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .map(|text| text.trim().to_string())
            .ok_or_else(|| AiError::Parse("completion response has no message content".into()))
    }
}

/// HTTP client for an OpenAI-compatible chat completions API.
pub struct OpenAiClient {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl OpenAiClient {
    /// # Errors
    ///
    /// Returns [`AiError::Http`] if the underlying `reqwest::Client` cannot be built.
    pub fn new(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, AiError> {
        let http = reqwest::Client::builder()
            .user_agent("campus/0.1")
            .timeout(timeout)
            .build()?;
        Ok(Self {
            http,
            api_key: api_key.into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }
}

impl CompletionClient for OpenAiClient {
    async fn complete(&self, request: &CompletionRequest) -> Result<String, AiError> {
        let body = ChatRequest {
            model: &request.model,
            messages: [ChatMessage {
                role: "user",
                content: &request.prompt,
            }],
            temperature: request.temperature,
        };
        tracing::debug!(model = %request.model, "sending completion request");

        let resp = self
            .http
            .post(self.endpoint())
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;
        let data: ChatResponse = check_response(resp).await?.json().await?;
        data.into_text()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const FIXTURE: &str = r#"{
        "id": "chatcmpl-1",
        "object": "chat.completion",
        "choices": [
            {
                "index": 0,
                "message": { "role": "assistant", "content": "  {\"suggested_score\": 82}\n" },
                "finish_reason": "stop"
            }
        ]
    }"#;

    #[test]
    fn reply_text_is_trimmed() {
        let data: ChatResponse = serde_json::from_str(FIXTURE).unwrap();
        assert_eq!(data.into_text().unwrap(), "{\"suggested_score\": 82}");
    }

    #[test]
    fn empty_choices_is_parse_error() {
        let data: ChatResponse = serde_json::from_str(r#"{"choices": []}"#).unwrap();
        assert!(matches!(data.into_text(), Err(AiError::Parse(_))));

        let data: ChatResponse =
            serde_json::from_str(r#"{"choices": [{"message": {"content": null}}]}"#).unwrap();
        assert!(matches!(data.into_text(), Err(AiError::Parse(_))));
    }

    #[test]
    fn request_body_shape() {
        let body = ChatRequest {
            model: "gpt-4o-mini",
            messages: [ChatMessage {
                role: "user",
                content: "hello",
            }],
            temperature: 0.5,
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["model"], "gpt-4o-mini");
        assert_eq!(json["messages"][0]["role"], "user");
        assert_eq!(json["messages"][0]["content"], "hello");
        assert_eq!(json["temperature"], 0.5);
    }

    #[test]
    fn endpoint_ignores_trailing_slash() {
        let client =
            OpenAiClient::new("sk-test", "http://localhost:8080/v1/", Duration::from_secs(5))
                .unwrap();
        assert_eq!(client.endpoint(), "http://localhost:8080/v1/chat/completions");
    }
}
