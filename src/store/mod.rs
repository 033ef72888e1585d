//! Conversation store - durable append-only message log
//!
//! SQLite persistence for conversations and their messages. Messages are
//! ordered by creation timestamp with insertion order breaking ties, so a
//! read always reconstructs the exact turn sequence.

pub mod models;

pub use models::{Conversation, StoredMessage};

use std::str::FromStr;

use chrono::Utc;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use tracing::info;
use uuid::Uuid;

use crate::core::{MessageMetadata, Result};

/// Default pool size for the conversation store.
const DEFAULT_POOL_SIZE: u32 = 5;

/// Conversation store over a pooled SQLite connection.
#[derive(Debug, Clone)]
pub struct ConversationStore {
    pool: SqlitePool,
}

impl ConversationStore {
    /// Connect to a SQLite database.
    ///
    /// The URL should be in the format `sqlite:path/to/db.sqlite?mode=rwc`.
    /// Use `sqlite::memory:` for tests.
    pub async fn connect(url: &str) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(url)?
            .create_if_missing(true)
            .foreign_keys(true);

        // Every pooled connection to :memory: would open its own database
        let pool_size = if url.contains(":memory:") {
            1
        } else {
            DEFAULT_POOL_SIZE
        };

        let pool = SqlitePoolOptions::new()
            .max_connections(pool_size)
            .acquire_timeout(std::time::Duration::from_secs(30))
            .connect_with(options)
            .await?;

        info!(url, pool_size, "connected to conversation store");

        Ok(Self { pool })
    }

    /// Run schema migrations. Call once after connecting.
    pub async fn migrate(&self) -> Result<()> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        Ok(())
    }

    /// Get a reference to the connection pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Create a conversation.
    pub async fn create_conversation(&self, user_id: &str, title: &str) -> Result<Conversation> {
        let conversation = Conversation {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            title: title.to_string(),
            created_at: Utc::now().to_rfc3339(),
        };

        sqlx::query(
            r#"
            INSERT INTO conversations (id, user_id, title, created_at)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(&conversation.id)
        .bind(&conversation.user_id)
        .bind(&conversation.title)
        .bind(&conversation.created_at)
        .execute(&self.pool)
        .await?;

        Ok(conversation)
    }

    /// List a user's conversations, newest first.
    pub async fn list_conversations(&self, user_id: &str) -> Result<Vec<Conversation>> {
        let rows = sqlx::query_as::<_, Conversation>(
            r#"
            SELECT id, user_id, title, created_at
            FROM conversations
            WHERE user_id = ?
            ORDER BY created_at DESC, rowid DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// Delete a conversation and, by cascade, all of its messages.
    pub async fn delete_conversation(&self, conversation_id: &str) -> Result<()> {
        sqlx::query(
            r#"
            DELETE FROM conversations
            WHERE id = ?
            "#,
        )
        .bind(conversation_id)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Append a message to a conversation.
    pub async fn append_message(
        &self,
        conversation_id: &str,
        role: &str,
        content: &str,
        metadata: Option<&MessageMetadata>,
    ) -> Result<StoredMessage> {
        let metadata_json = metadata.map(serde_json::to_string).transpose()?;

        let message = StoredMessage {
            id: Uuid::new_v4().to_string(),
            conversation_id: conversation_id.to_string(),
            role: role.to_string(),
            content: content.to_string(),
            metadata: metadata_json,
            created_at: Utc::now().to_rfc3339(),
        };

        sqlx::query(
            r#"
            INSERT INTO messages (id, conversation_id, role, content, metadata, created_at)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&message.id)
        .bind(&message.conversation_id)
        .bind(&message.role)
        .bind(&message.content)
        .bind(&message.metadata)
        .bind(&message.created_at)
        .execute(&self.pool)
        .await?;

        Ok(message)
    }

    /// Read a conversation's messages in chronological order.
    pub async fn list_messages(&self, conversation_id: &str) -> Result<Vec<StoredMessage>> {
        let rows = sqlx::query_as::<_, StoredMessage>(
            r#"
            SELECT id, conversation_id, role, content, metadata, created_at
            FROM messages
            WHERE conversation_id = ?
            ORDER BY created_at ASC, seq ASC
            "#,
        )
        .bind(conversation_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// Close the connection pool.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}
