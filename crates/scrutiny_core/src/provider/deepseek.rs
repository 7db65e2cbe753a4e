//! Chat-completions wire format for the DeepSeek essay endpoint.
//!
//! Builds request bodies and interprets response bodies. Sending the request
//! (and attaching the bearer token from `ProviderConfig::api_key`) is left to
//! the transport.

use crate::config::ProviderConfig;
use crate::provider::ApiError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    fn new(role: &str, content: impl Into<String>) -> Self {
        Self {
            role: role.to_string(),
            content: content.into(),
        }
    }
}

/// Request body for `POST {api_url}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatCompletionRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub temperature: f32,
    pub max_tokens: u32,
}

impl ChatCompletionRequest {
    /// Builds the essay prompt for `topic`.
    pub fn essay(topic: &str, config: &ProviderConfig) -> Self {
        Self {
            model: config.model.clone(),
            messages: vec![
                ChatMessage::new("system", config.system_prompt.as_str()),
                ChatMessage::new("user", format!("Write an essay about: {}", topic.trim())),
            ],
            temperature: config.temperature,
            max_tokens: config.max_tokens,
        }
    }

    pub fn to_json(&self) -> Result<String, ApiError> {
        serde_json::to_string(self)
            .map_err(|err| ApiError::new(None, format!("request encode failed: {err}")))
    }
}

#[derive(Debug, Clone, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Clone, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Debug, Clone, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Clone, Deserialize)]
struct ErrorBody {
    message: String,
}

/// Extracts `choices[0].message.content` from a success body.
pub fn parse_completion(body: &str) -> Result<String, ApiError> {
    let response: ChatCompletionResponse = serde_json::from_str(body)
        .map_err(|err| ApiError::new(None, format!("response decode failed: {err}")))?;
    response
        .choices
        .into_iter()
        .next()
        .map(|choice| choice.message.content)
        .ok_or_else(|| ApiError::new(None, "response contained no choices"))
}

/// Maps an HTTP response to essay text or an `ApiError`.
///
/// Non-2xx bodies are searched for `{"error": {"message": ...}}`; when absent
/// the raw status is reported.
pub fn interpret_response(status: u16, body: &str) -> Result<String, ApiError> {
    if (200..300).contains(&status) {
        return parse_completion(body);
    }
    let message = serde_json::from_str::<ErrorEnvelope>(body)
        .map(|envelope| envelope.error.message)
        .unwrap_or_else(|_| format!("request failed with status {status}"));
    Err(ApiError::new(Some(status), message))
}
