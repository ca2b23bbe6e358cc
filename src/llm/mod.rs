// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Chat-completions client for the remote model service

use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

use crate::config::LlmConfig;

/// A role-tagged chat message in the OpenAI wire shape.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ChatError {
    #[error("Request to the model service timed out")]
    Timeout,
    #[error("Model service authentication failed")]
    Auth,
    #[error("Model service error: {status} - {message}")]
    Api { status: u16, message: String },
    #[error("Malformed model service response: {0}")]
    Parse(String),
}

/// Client for an OpenAI-compatible chat-completions endpoint.
///
/// The model is treated as an opaque text-in/text-out service; failures are
/// terminal for the request and never retried here.
pub struct ChatClient {
    client: Client,
    api_key: String,
    api_base: String,
    model: String,
}

impl ChatClient {
    pub fn new(config: &LlmConfig) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            api_key: config.api_key.clone(),
            api_base: config.api_base.trim_end_matches('/').to_string(),
            model: config.model.clone(),
        }
    }

    /// Send `messages` and return the first choice's content.
    pub async fn chat(
        &self,
        messages: &[ChatMessage],
        temperature: f32,
        max_tokens: u32,
    ) -> Result<String, ChatError> {
        let url = format!("{}/chat/completions", self.api_base);
        let body = ChatRequest {
            model: &self.model,
            messages,
            temperature,
            max_tokens,
        };

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ChatError::Timeout
                } else {
                    ChatError::Api {
                        status: 0,
                        message: e.to_string(),
                    }
                }
            })?;

        let status = response.status();

        if status == 401 || status == 403 {
            return Err(ChatError::Auth);
        }

        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            warn!(status = status.as_u16(), "model service returned error status");
            return Err(ChatError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let data: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| ChatError::Parse(e.to_string()))?;

        data.choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| ChatError::Parse("response contained no choices".to_string()))
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    content: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chat_message_constructors() {
        let system = ChatMessage::system("be factual");
        assert_eq!(system.role, "system");
        let user = ChatMessage::user("rewrite this");
        assert_eq!(user.role, "user");
        assert_eq!(user.content, "rewrite this");
    }

    #[test]
    fn test_completion_response_deserialization() {
        let json = r##"{
            "choices": [
                { "message": { "role": "assistant", "content": "# Headline\n\nBody." } }
            ]
        }"##;

        let response: ChatCompletionResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.choices.len(), 1);
        assert!(response.choices[0].message.content.starts_with("# Headline"));
    }

    #[test]
    fn test_request_serialization_shape() {
        let messages = [ChatMessage::user("hello")];
        let request = ChatRequest {
            model: "deepseek-chat",
            messages: &messages,
            temperature: 0.7,
            max_tokens: 2000,
        };

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["model"], "deepseek-chat");
        assert_eq!(json["max_tokens"], 2000);
        assert_eq!(json["messages"][0]["role"], "user");
    }

    #[test]
    fn test_client_normalizes_api_base() {
        let config = LlmConfig {
            api_key: "test-key".to_string(),
            api_base: "https://api.deepseek.com/v1/".to_string(),
            model: "deepseek-chat".to_string(),
            timeout_secs: 5,
        };
        let client = ChatClient::new(&config);
        assert_eq!(client.api_base, "https://api.deepseek.com/v1");
    }
}
