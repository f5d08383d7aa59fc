//! Chat history model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Sender of a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    User,
    Assistant,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }

    pub fn from_string(s: &str) -> Self {
        match s {
            "assistant" => Role::Assistant,
            _ => Role::User,
        }
    }
}

/// A persisted chat message. `role` is stored as text; use
/// [`Role::from_string`] when the enum is needed.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ChatMessage {
    pub id: i64,
    pub session_id: String,
    pub role: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

/// Input for persisting one message.
#[derive(Debug, Clone)]
pub struct NewChatMessage {
    pub session_id: String,
    pub role: Role,
    pub content: String,
}

/// Outcome of one relayed exchange: the reply the model produced for a
/// session, stamped with the assistant message's timestamp.
#[derive(Debug, Clone)]
pub struct ChatExchange {
    pub session_id: String,
    pub reply: String,
    pub created_at: DateTime<Utc>,
}
