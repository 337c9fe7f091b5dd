use jiff::Timestamp;
use serde::{Deserialize, Serialize};

/// User identifier used when a request carries none
pub const DEFAULT_USER: &str = "default";

/// Role of a conversation participant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Journal author
    User,
    /// Supportive reply
    Assistant,
}

/// One turn in a conversation, immutable once created
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatEntry {
    /// Who authored the turn
    pub role: Role,
    /// Turn content
    pub content: String,
}

impl ChatEntry {
    /// Entry for a journal author's turn
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    /// Entry for a generated reply
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// Chat request from the client
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    /// Diary entry or message to reflect on
    pub message: String,
    /// Optional user identifier for conversation tracking
    #[serde(default)]
    pub user_id: Option<String>,
}

/// Chat response to the client
#[derive(Debug, Serialize, Deserialize)]
pub struct ChatResponse {
    /// Generated supportive reply
    pub response: String,
    /// When the reply was generated
    pub timestamp: Timestamp,
}
