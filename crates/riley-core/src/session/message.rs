//! Chat message types.
//!
//! Messages are created once and never edited; the only thing that happens to
//! a message after construction is being appended to a [`Conversation`].
//!
//! [`Conversation`]: super::Conversation

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::tone::{ResponseSource, Tone};

/// Represents the author of a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    /// Message typed by the user.
    User,
    /// Message produced by Riley.
    Assistant,
}

/// A single entry of the chat log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    /// Unique message identifier (UUID format)
    pub id: String,
    pub role: MessageRole,
    pub content: String,
    pub timestamp: DateTime<Utc>,
    /// Engine that produced the reply, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<ResponseSource>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emotion: Option<Tone>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<Tone>,
}

impl Message {
    fn new(role: MessageRole, content: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            role,
            content: content.into(),
            timestamp: Utc::now(),
            source: None,
            emotion: None,
            style: None,
        }
    }

    /// Creates a user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self::new(MessageRole::User, content)
    }

    /// Creates an unannotated assistant message (greetings, mode announcements, apologies).
    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(MessageRole::Assistant, content)
    }

    /// Creates an assistant reply carrying its source and tone.
    ///
    /// Emotion and style always share the same tone.
    pub fn reply(content: impl Into<String>, source: ResponseSource, tone: Tone) -> Self {
        Self {
            source: Some(source),
            emotion: Some(tone),
            style: Some(tone),
            ..Self::new(MessageRole::Assistant, content)
        }
    }

    pub fn is_user(&self) -> bool {
        self.role == MessageRole::User
    }

    pub fn is_assistant(&self) -> bool {
        self.role == MessageRole::Assistant
    }
}
