pub mod client;
pub mod context;
pub mod conversation;
pub mod message;
pub mod openrouter;
pub mod session;
pub mod store;

pub use client::{
    CHAT_TEMPERATURE, ChatClientError, ChatCompletionFuture, ChatCompletionRequest, ChatGateway,
};
pub use context::{AssistantVariant, build_system_message, seed_conversation};
pub use conversation::{Conversation, ConversationPhase};
pub use message::{Message, Role};
pub use openrouter::{
    DEFAULT_CHAT_COMPLETIONS_URL, OpenRouterChatClient, OpenRouterChatConfig,
    OpenRouterConfigError, format_error_reply,
};
pub use session::{ChatBlocker, ChatSession, TurnError};
pub use store::{SessionStore, SessionStoreError, SharedSession};
