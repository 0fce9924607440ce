use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::catalog::ModelOption;
use crate::chat::{AssistantVariant, ChatSession, ConversationPhase, Message};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OkResponse {
    pub ok: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorBody,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelOptionView {
    pub display_name: String,
    pub provider_model: String,
}

impl From<ModelOption> for ModelOptionView {
    fn from(option: ModelOption) -> Self {
        Self {
            display_name: option.display_name.to_string(),
            provider_model: option.provider_model.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListModelsQuery {
    pub variant: AssistantVariant,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListModelsResponse {
    pub variant: AssistantVariant,
    pub default_model: ModelOptionView,
    pub models: Vec<ModelOptionView>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateSessionRequest {
    pub variant: AssistantVariant,
    /// Resume or claim a specific id; a new one is generated when absent.
    #[serde(default)]
    pub session_id: Option<Uuid>,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub api_key: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateSessionSettingsRequest {
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub api_key: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadDocumentRequest {
    pub pdf_base64: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoadModelArtifactsRequest {
    pub model: Value,
    pub scaler: Value,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SendMessageRequest {
    pub content: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionNotice {
    pub code: String,
    pub message: String,
}

/// What the presentation layer needs to redraw a session page. The system
/// prompt is never included.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionView {
    pub session_id: Uuid,
    pub variant: AssistantVariant,
    pub phase: ConversationPhase,
    pub model: ModelOptionView,
    pub context_loaded: bool,
    pub chat_enabled: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<SessionNotice>,
    pub messages: Vec<Message>,
    pub created_at: DateTime<Utc>,
    pub last_active_at: DateTime<Utc>,
}

impl SessionView {
    pub fn from_session(session: &ChatSession, fallback_api_key: Option<&str>) -> Self {
        let blocker = session.chat_blocker(fallback_api_key);
        Self {
            session_id: session.id(),
            variant: session.variant(),
            phase: session.phase(),
            model: session.model().into(),
            context_loaded: session.has_context(),
            chat_enabled: blocker.is_none(),
            notice: blocker.map(|blocker| SessionNotice {
                code: blocker.code().to_string(),
                message: blocker.notice(session.variant()).to_string(),
            }),
            messages: session.conversation().visible().cloned().collect(),
            created_at: session.created_at(),
            last_active_at: session.last_active_at(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SendMessageResponse {
    pub reply: Message,
    pub session: SessionView,
}
