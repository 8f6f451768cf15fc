//! Client for the OpenAI-compatible chat-completion endpoint.

use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::UpstreamConfig;
use crate::error::UpstreamError;

pub const SYSTEM_PROMPT: &str = "You are MAXIM AI - a helpful assistant for CraneIQ. Answer clearly and use emojis. Be friendly and concise.";
pub const TEMPERATURE: f64 = 0.7;
pub const MAX_TOKENS: u32 = 500;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CompletionMessage {
    pub role: String,
    pub content: String,
}

impl CompletionMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self { role: "system".to_string(), content: content.into() }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self { role: "user".to_string(), content: content.into() }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatCompletionRequest {
    pub messages: Vec<CompletionMessage>,
    pub model: String,
    pub temperature: f64,
    pub max_tokens: u32,
}

impl ChatCompletionRequest {
    /// Fixed system prompt followed by the user's message.
    pub fn for_message(model: &str, message: &str) -> Self {
        Self {
            messages: vec![
                CompletionMessage::system(SYSTEM_PROMPT),
                CompletionMessage::user(message),
            ],
            model: model.to_string(),
            temperature: TEMPERATURE,
            max_tokens: MAX_TOKENS,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ChatCompletionResponse {
    #[serde(default)]
    pub choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
pub struct Choice {
    pub message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
pub struct ChoiceMessage {
    pub content: String,
}

impl ChatCompletionResponse {
    pub fn first_content(self) -> Result<String, UpstreamError> {
        self.choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| UpstreamError::MalformedBody("empty choices array".to_string()))
    }
}

#[derive(Debug, Clone)]
pub struct UpstreamClient {
    http: Client,
    config: UpstreamConfig,
}

impl UpstreamClient {
    pub fn new(config: UpstreamConfig) -> Self {
        // No timeout: a hung upstream holds the request open.
        Self { http: Client::new(), config }
    }

    pub fn config(&self) -> &UpstreamConfig {
        &self.config
    }

    /// One chat-completion round trip. Only a 200 counts as success.
    pub async fn complete(&self, message: &str) -> Result<String, UpstreamError> {
        let payload = ChatCompletionRequest::for_message(&self.config.model, message);

        let response = self
            .http
            .post(&self.config.api_url)
            .bearer_auth(&self.config.api_key)
            .json(&payload)
            .send()
            .await?;

        let status = response.status();
        if status != StatusCode::OK {
            let body = response.text().await.unwrap_or_default();
            return Err(UpstreamError::Status { status: status.as_u16(), body });
        }

        let bytes = response.bytes().await?;
        debug!(len = bytes.len(), "upstream body received");
        let parsed: ChatCompletionResponse = serde_json::from_slice(&bytes)
            .map_err(|e| UpstreamError::MalformedBody(e.to_string()))?;
        parsed.first_content()
    }
}
