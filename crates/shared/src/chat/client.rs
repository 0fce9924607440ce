use std::future::Future;
use std::pin::Pin;

use thiserror::Error;

use super::message::Message;

/// Sampling temperature sent with every chat turn.
pub const CHAT_TEMPERATURE: f64 = 0.7;

pub type ChatCompletionFuture<'a> =
    Pin<Box<dyn Future<Output = Result<String, ChatClientError>> + Send + 'a>>;

#[derive(Debug, Clone, Copy)]
pub struct ChatCompletionRequest<'a> {
    pub api_key: &'a str,
    pub model: &'a str,
    pub messages: &'a [Message],
}

/// Failures that never reach the user as a chat reply. A non-200 response is
/// not one of them: it comes back as `Ok("Error: <body>")`.
#[derive(Debug, Error)]
pub enum ChatClientError {
    #[error("chat provider request timed out")]
    Timeout,
    #[error("chat provider request failed: {0}")]
    Transport(String),
    #[error("chat provider returned an invalid payload: {0}")]
    InvalidPayload(String),
}

pub trait ChatGateway: Send + Sync {
    /// Exchanges the full conversation for the next assistant reply.
    fn complete<'a>(&'a self, request: ChatCompletionRequest<'a>) -> ChatCompletionFuture<'a>;
}
