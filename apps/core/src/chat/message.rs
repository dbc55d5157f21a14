use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::brain::MoodLabel;

/// Author of a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Bot,
}

/// A single line of the chat transcript. Never mutated once appended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Monotonic within a session.
    pub id: u64,
    pub sender: Sender,
    pub text: String,
    /// Mood shown with a bot message; `None` for user and welcome messages.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emotion: Option<MoodLabel>,
    pub sent_at: DateTime<Utc>,
}

impl ChatMessage {
    pub fn user(id: u64, text: &str) -> Self {
        Self {
            id,
            sender: Sender::User,
            text: text.to_string(),
            emotion: None,
            sent_at: Utc::now(),
        }
    }

    pub fn bot(id: u64, text: &str, emotion: Option<MoodLabel>) -> Self {
        Self {
            id,
            sender: Sender::Bot,
            text: text.to_string(),
            emotion,
            sent_at: Utc::now(),
        }
    }
}
