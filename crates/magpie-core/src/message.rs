//! Chat transcript types.
//!
//! Messages are append-only and held only in memory; the transcript is lost
//! when the process exits.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Represents the role of a message in the chat transcript.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    /// Message typed by the operator.
    User,
    /// Answer returned by the backend.
    Assistant,
}

/// A single message in the chat transcript.
///
/// Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Unique message identifier (UUID format).
    pub id: String,
    /// The role of the message sender.
    pub role: MessageRole,
    /// The content of the message.
    pub content: String,
    /// Timestamp when the message was created (RFC 3339 format).
    pub timestamp: String,
}

impl ChatMessage {
    fn new(role: MessageRole, content: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            role,
            content: content.into(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(MessageRole::User, content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(MessageRole::Assistant, content)
    }
}

/// An append-only, ordered sequence of chat messages.
#[derive(Debug, Default)]
pub struct Transcript {
    messages: Vec<ChatMessage>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, message: ChatMessage) {
        self.messages.push(message);
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_then_assistant_keeps_order() {
        let mut transcript = Transcript::new();
        transcript.push(ChatMessage::user("Hello"));
        transcript.push(ChatMessage::assistant("Hi! How can I help?"));

        let messages = transcript.messages();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].role, MessageRole::User);
        assert_eq!(messages[0].content, "Hello");
        assert_eq!(messages[1].role, MessageRole::Assistant);
    }

    #[test]
    fn message_ids_are_unique() {
        let a = ChatMessage::user("one");
        let b = ChatMessage::user("one");
        assert_ne!(a.id, b.id);
    }
}
