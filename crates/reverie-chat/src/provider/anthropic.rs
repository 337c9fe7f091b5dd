use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use crate::{
    error::ChatError,
    http_client::http_client,
    types::{ChatEntry, Role},
};

use super::{ChatProvider, GenerationParams};

const DEFAULT_ANTHROPIC_API_URL: &str = "https://api.anthropic.com/v1";

/// Anthropic API version header value
const ANTHROPIC_VERSION: &str = "2023-06-01";

/// Anthropic Messages API provider
pub(crate) struct AnthropicProvider {
    client: Client,
    base_url: String,
    api_key: SecretString,
    params: GenerationParams,
}

// -- Wire types --

#[derive(Debug, Serialize)]
struct AnthropicRequest<'a> {
    model: &'a str,
    system: &'a str,
    messages: Vec<AnthropicMessage<'a>>,
    max_tokens: u32,
    temperature: f64,
}

#[derive(Debug, Serialize)]
struct AnthropicMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct AnthropicResponse {
    content: Vec<AnthropicResponseBlock>,
}

/// Content block in an Anthropic response
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum AnthropicResponseBlock {
    Text { text: String },
    #[serde(other)]
    Other,
}

const fn wire_role(role: Role) -> &'static str {
    match role {
        Role::User => "user",
        Role::Assistant => "assistant",
    }
}

impl AnthropicProvider {
    pub fn new(api_key: SecretString, base_url: Option<String>, params: GenerationParams, timeout: Duration) -> Self {
        Self {
            client: http_client(timeout),
            base_url: base_url.unwrap_or_else(|| DEFAULT_ANTHROPIC_API_URL.to_owned()),
            api_key,
            params,
        }
    }
}

#[async_trait]
impl ChatProvider for AnthropicProvider {
    async fn generate(&self, system: &str, messages: &[ChatEntry]) -> crate::error::Result<String> {
        let url = format!("{}/messages", self.base_url.trim_end_matches('/'));

        let body = AnthropicRequest {
            model: &self.params.model,
            system,
            messages: messages
                .iter()
                .map(|entry| AnthropicMessage {
                    role: wire_role(entry.role),
                    content: &entry.content,
                })
                .collect(),
            max_tokens: self.params.max_tokens,
            temperature: self.params.temperature,
        };

        tracing::debug!(model = %self.params.model, turns = messages.len(), "Anthropic chat request");

        let response = self
            .client
            .post(&url)
            .header("x-api-key", self.api_key.expose_secret())
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Anthropic chat request failed: {e}");
                ChatError::Upstream(format!("failed to send request to Anthropic: {e}"))
            })?;

        let status = response.status();

        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_else(|_| "unknown error".to_owned());
            tracing::error!("Anthropic chat API error ({status}): {error_text}");
            return Err(ChatError::Upstream(format!("provider returned {status}: {error_text}")));
        }

        let result: AnthropicResponse = response.json().await.map_err(|e| {
            tracing::error!("failed to parse Anthropic chat response: {e}");
            ChatError::Upstream(format!("failed to parse response: {e}"))
        })?;

        let text = result
            .content
            .into_iter()
            .filter_map(|block| match block {
                AnthropicResponseBlock::Text { text } => Some(text),
                AnthropicResponseBlock::Other => None,
            })
            .collect::<Vec<_>>()
            .join("");

        Ok(text)
    }

    fn name(&self) -> &str {
        "anthropic"
    }
}
