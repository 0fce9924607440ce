use serde::{Deserialize, Serialize};

use super::message::{Message, Role};

/// Where a session sits in its lifecycle, derived from the conversation
/// contents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConversationPhase {
    Empty,
    Seeded,
    Conversing,
}

impl ConversationPhase {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Empty => "empty",
            Self::Seeded => "seeded",
            Self::Conversing => "conversing",
        }
    }
}

/// Append-only chat history for one session.
///
/// At most one system message exists and it is always the first element.
/// Messages are never removed or reordered.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Conversation {
    messages: Vec<Message>,
}

impl Conversation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a user or assistant turn as given. Only the session's chat
    /// cycle calls this; the system message enters through
    /// [`Conversation::seed_system`].
    pub(crate) fn append(&mut self, message: Message) {
        debug_assert_ne!(
            message.role,
            Role::System,
            "system messages are only inserted by seed_system"
        );
        self.messages.push(message);
    }

    /// Inserts `message` as the first element when the conversation is still
    /// empty. Returns whether anything was inserted.
    pub fn seed_system(&mut self, message: Message) -> bool {
        if !self.messages.is_empty() {
            return false;
        }

        self.messages.push(Message::system(message.content));
        true
    }

    pub fn read_all(&self) -> &[Message] {
        &self.messages
    }

    /// Messages shown to the user: everything except the system prompt.
    pub fn visible(&self) -> impl Iterator<Item = &Message> {
        self.messages
            .iter()
            .filter(|message| message.role != Role::System)
    }

    pub fn system_message(&self) -> Option<&Message> {
        self.messages
            .first()
            .filter(|message| message.role == Role::System)
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn phase(&self) -> ConversationPhase {
        if self.messages.is_empty() {
            ConversationPhase::Empty
        } else if self.visible().next().is_none() {
            ConversationPhase::Seeded
        } else {
            ConversationPhase::Conversing
        }
    }
}
