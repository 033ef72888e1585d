//! Conversation store models.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::core::{ChatMessage, MessageMetadata};

/// A conversation thread owned by a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Conversation {
    /// Opaque conversation id (UUID v4)
    pub id: String,
    /// Owning user identity
    pub user_id: String,
    /// Title derived from the first user message
    pub title: String,
    /// Creation timestamp (RFC 3339, UTC)
    pub created_at: String,
}

/// A persisted message within a conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct StoredMessage {
    /// Opaque message id (UUID v4)
    pub id: String,
    /// Owning conversation id
    pub conversation_id: String,
    /// Role: "user" or "assistant"
    pub role: String,
    /// Message text; empty when an assistant turn produced no content
    pub content: String,
    /// JSON-encoded metadata column, if any
    pub metadata: Option<String>,
    /// Creation timestamp (RFC 3339, UTC)
    pub created_at: String,
}

impl StoredMessage {
    /// Decode the metadata column
    ///
    /// Rows written by older schema revisions may hold unexpected JSON;
    /// those decode as `None` rather than failing the read.
    pub fn metadata(&self) -> Option<MessageMetadata> {
        self.metadata
            .as_deref()
            .and_then(|raw| serde_json::from_str(raw).ok())
    }

    /// Project into the wire-level message shape for a model request
    pub fn to_chat_message(&self) -> ChatMessage {
        ChatMessage {
            role: self.role.clone(),
            content: Some(self.content.clone()),
            tool_calls: None,
            tool_call_id: None,
        }
    }
}
