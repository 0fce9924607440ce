use std::time::Duration;

use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use super::client::{
    CHAT_TEMPERATURE, ChatClientError, ChatCompletionFuture, ChatCompletionRequest, ChatGateway,
};
use super::message::Message;
use crate::config_env::{optional_trimmed_env, parse_optional_u64_env};

pub const DEFAULT_CHAT_COMPLETIONS_URL: &str = "https://openrouter.ai/api/v1/chat/completions";
const DEFAULT_HTTP_REFERER: &str = "https://tuproyecto.com";
const DEFAULT_APP_TITLE: &str = "chatbot-explicador";

const HTTP_REFERER_HEADER: &str = "HTTP-Referer";
const APP_TITLE_HEADER: &str = "X-Title";

#[derive(Debug, Clone)]
pub struct OpenRouterChatConfig {
    pub chat_completions_url: String,
    pub http_referer: String,
    pub app_title: String,
    /// `None` keeps the HTTP client's default behaviour.
    pub timeout_ms: Option<u64>,
}

impl Default for OpenRouterChatConfig {
    fn default() -> Self {
        Self {
            chat_completions_url: DEFAULT_CHAT_COMPLETIONS_URL.to_string(),
            http_referer: DEFAULT_HTTP_REFERER.to_string(),
            app_title: DEFAULT_APP_TITLE.to_string(),
            timeout_ms: None,
        }
    }
}

impl OpenRouterChatConfig {
    pub fn from_env() -> Result<Self, OpenRouterConfigError> {
        let chat_completions_url = optional_trimmed_env("OPENROUTER_CHAT_COMPLETIONS_URL")
            .unwrap_or_else(|| DEFAULT_CHAT_COMPLETIONS_URL.to_string());
        validate_url(&chat_completions_url)?;

        let timeout_ms = parse_optional_u64_env("OPENROUTER_TIMEOUT_MS").map_err(|value| {
            OpenRouterConfigError::ParseInt {
                key: "OPENROUTER_TIMEOUT_MS".to_string(),
                value,
            }
        })?;

        Ok(Self {
            chat_completions_url,
            http_referer: optional_trimmed_env("OPENROUTER_HTTP_REFERER")
                .unwrap_or_else(|| DEFAULT_HTTP_REFERER.to_string()),
            app_title: optional_trimmed_env("OPENROUTER_APP_TITLE")
                .unwrap_or_else(|| DEFAULT_APP_TITLE.to_string()),
            timeout_ms,
        })
    }
}

#[derive(Debug, Error)]
pub enum OpenRouterConfigError {
    #[error("invalid integer in env var {key}: {value}")]
    ParseInt { key: String, value: String },
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),
    #[error("failed to build OpenRouter http client: {0}")]
    HttpClient(String),
}

#[derive(Clone)]
pub struct OpenRouterChatClient {
    client: reqwest::Client,
    config: OpenRouterChatConfig,
}

impl OpenRouterChatClient {
    pub fn new(config: OpenRouterChatConfig) -> Result<Self, OpenRouterConfigError> {
        validate_url(&config.chat_completions_url)?;

        let mut builder = reqwest::Client::builder();
        if let Some(timeout_ms) = config.timeout_ms {
            builder = builder.timeout(Duration::from_millis(timeout_ms));
        }
        let client = builder
            .build()
            .map_err(|err| OpenRouterConfigError::HttpClient(err.to_string()))?;

        Ok(Self { client, config })
    }

    async fn send(&self, request: ChatCompletionRequest<'_>) -> Result<String, ChatClientError> {
        let body = ChatCompletionBody {
            model: request.model,
            messages: request.messages,
            temperature: CHAT_TEMPERATURE,
        };

        debug!(
            model = request.model,
            message_count = request.messages.len(),
            "sending chat completion request"
        );

        let response = self
            .client
            .post(&self.config.chat_completions_url)
            .bearer_auth(request.api_key)
            .header(HTTP_REFERER_HEADER, &self.config.http_referer)
            .header(APP_TITLE_HEADER, &self.config.app_title)
            .json(&body)
            .send()
            .await
            .map_err(|err| {
                if err.is_timeout() {
                    ChatClientError::Timeout
                } else {
                    ChatClientError::Transport(err.to_string())
                }
            })?;

        let status = response.status();
        let raw_body = response
            .text()
            .await
            .map_err(|err| {
                ChatClientError::Transport(format!("response_body_read_failed: {err}"))
            })?;

        if status != StatusCode::OK {
            warn!(
                status = status.as_u16(),
                model = request.model,
                "chat provider returned a non-200 response"
            );
            return Ok(format_error_reply(&raw_body));
        }

        let parsed: ChatCompletionResponse = serde_json::from_str(&raw_body).map_err(|_| {
            ChatClientError::InvalidPayload("response_json_parse_failed".to_string())
        })?;

        parsed
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| ChatClientError::InvalidPayload("missing_choice".to_string()))
    }
}

impl ChatGateway for OpenRouterChatClient {
    fn complete<'a>(&'a self, request: ChatCompletionRequest<'a>) -> ChatCompletionFuture<'a> {
        Box::pin(self.send(request))
    }
}

/// The reply text shown in place of an assistant answer when the provider
/// rejects the request.
pub fn format_error_reply(raw_body: &str) -> String {
    format!("Error: {raw_body}")
}

#[derive(Debug, Serialize)]
struct ChatCompletionBody<'a> {
    model: &'a str,
    messages: &'a [Message],
    temperature: f64,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatCompletionChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionChoice {
    message: ChatCompletionMessage,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionMessage {
    content: String,
}

fn validate_url(raw: &str) -> Result<(), OpenRouterConfigError> {
    let parsed = url::Url::parse(raw).map_err(|_| {
        OpenRouterConfigError::InvalidConfiguration(
            "OPENROUTER_CHAT_COMPLETIONS_URL is not a valid URL".to_string(),
        )
    })?;

    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(OpenRouterConfigError::InvalidConfiguration(
            "OPENROUTER_CHAT_COMPLETIONS_URL must start with http:// or https://".to_string(),
        ));
    }

    Ok(())
}
