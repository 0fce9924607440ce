use chrono::{DateTime, Utc};
use thiserror::Error;
use tracing::{info, warn};
use uuid::Uuid;

use super::client::{ChatClientError, ChatCompletionRequest, ChatGateway};
use super::context::{AssistantVariant, seed_conversation};
use super::conversation::{Conversation, ConversationPhase};
use super::message::Message;
use crate::catalog::{CatalogError, ModelOption, default_model, resolve_model};

#[derive(Debug, Error)]
pub enum TurnError {
    #[error("prompt is empty")]
    EmptyPrompt,
    #[error("an OpenRouter API key is required before chatting")]
    MissingApiKey,
    #[error("no document or model has been loaded for this session")]
    MissingContext,
    #[error(transparent)]
    Gateway(#[from] ChatClientError),
}

/// Why chat input is currently disabled, if it is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatBlocker {
    MissingContext,
    MissingApiKey,
}

impl ChatBlocker {
    pub const fn code(self) -> &'static str {
        match self {
            Self::MissingContext => "context_missing",
            Self::MissingApiKey => "api_key_missing",
        }
    }

    pub fn notice(self, variant: AssistantVariant) -> &'static str {
        match (self, variant) {
            (Self::MissingContext, AssistantVariant::PaperAnalyst) => {
                "Upload a PDF first to start the analysis."
            }
            (Self::MissingContext, AssistantVariant::ModelExplainer) => {
                "Load the model and scaler artifacts first to start the explanation."
            }
            (Self::MissingApiKey, _) => "Enter your OpenRouter API key to start.",
        }
    }
}

/// One user's interactive session: settings, loaded context and history.
#[derive(Debug, Clone)]
pub struct ChatSession {
    id: Uuid,
    variant: AssistantVariant,
    model: ModelOption,
    api_key: Option<String>,
    summary: Option<String>,
    conversation: Conversation,
    created_at: DateTime<Utc>,
    last_active_at: DateTime<Utc>,
}

impl ChatSession {
    pub fn new(id: Uuid, variant: AssistantVariant, now: DateTime<Utc>) -> Self {
        Self {
            id,
            variant,
            model: default_model(variant),
            api_key: None,
            summary: None,
            conversation: Conversation::new(),
            created_at: now,
            last_active_at: now,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn variant(&self) -> AssistantVariant {
        self.variant
    }

    pub fn model(&self) -> ModelOption {
        self.model
    }

    pub fn conversation(&self) -> &Conversation {
        &self.conversation
    }

    pub fn phase(&self) -> ConversationPhase {
        self.conversation.phase()
    }

    pub fn has_context(&self) -> bool {
        self.summary.is_some()
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn last_active_at(&self) -> DateTime<Utc> {
        self.last_active_at
    }

    pub fn touch(&mut self, now: DateTime<Utc>) {
        self.last_active_at = now;
    }

    pub fn select_model(&mut self, display_name: &str) -> Result<ModelOption, CatalogError> {
        self.model = resolve_model(self.variant, display_name)?;
        Ok(self.model)
    }

    /// A blank key clears the session key.
    pub fn set_api_key(&mut self, api_key: &str) {
        let trimmed = api_key.trim();
        self.api_key = (!trimmed.is_empty()).then(|| trimmed.to_string());
    }

    /// Stores the loader output and seeds the conversation. Blank or missing
    /// text changes nothing. The first successful load wins; later loads
    /// never replace the system message.
    pub fn load_summary(&mut self, summary: Option<String>) -> bool {
        let Some(summary) = summary.filter(|summary| !summary.trim().is_empty()) else {
            return false;
        };
        if self.summary.is_some() {
            return false;
        }

        let seeded =
            seed_conversation(&mut self.conversation, self.variant, Some(summary.as_str()));
        self.summary = Some(summary);
        if seeded {
            info!(session_id = %self.id, variant = self.variant.as_str(), "seeded conversation");
        }
        seeded
    }

    /// The first reason chat is disabled, checked in the order the page shows
    /// them: a missing artifact wins over a missing key.
    pub fn chat_blocker(&self, fallback_api_key: Option<&str>) -> Option<ChatBlocker> {
        if self.summary.is_none() {
            return Some(ChatBlocker::MissingContext);
        }
        if self.resolve_api_key(fallback_api_key).is_none() {
            return Some(ChatBlocker::MissingApiKey);
        }
        None
    }

    /// Runs one chat cycle: append the user turn, send the whole history,
    /// append the reply. Nothing is appended and no request is sent when
    /// chat is disabled.
    pub async fn submit_user_turn(
        &mut self,
        gateway: &dyn ChatGateway,
        fallback_api_key: Option<&str>,
        prompt: &str,
        now: DateTime<Utc>,
    ) -> Result<Message, TurnError> {
        if prompt.trim().is_empty() {
            return Err(TurnError::EmptyPrompt);
        }

        match self.chat_blocker(fallback_api_key) {
            Some(ChatBlocker::MissingContext) => return Err(TurnError::MissingContext),
            Some(ChatBlocker::MissingApiKey) => return Err(TurnError::MissingApiKey),
            None => {}
        }

        let api_key = self
            .resolve_api_key(fallback_api_key)
            .ok_or(TurnError::MissingApiKey)?
            .to_string();

        self.touch(now);
        self.conversation.append(Message::user(prompt));

        let reply = gateway
            .complete(ChatCompletionRequest {
                api_key: &api_key,
                model: self.model.provider_model,
                messages: self.conversation.read_all(),
            })
            .await
            .inspect_err(|err| {
                warn!(
                    session_id = %self.id,
                    error = %err,
                    "chat turn failed before a reply arrived"
                );
            })?;

        let reply = Message::assistant(reply);
        self.conversation.append(reply.clone());
        Ok(reply)
    }

    fn resolve_api_key<'a>(&'a self, fallback_api_key: Option<&'a str>) -> Option<&'a str> {
        self.api_key
            .as_deref()
            .or(fallback_api_key)
            .map(str::trim)
            .filter(|key| !key.is_empty())
    }
}
