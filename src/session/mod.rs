//! Chat session - the client-side turn coordinator
//!
//! Owns the user-visible lifecycle of a message exchange: persist the user
//! message, execute the turn, persist the assistant reply with its agent
//! metadata, and hand back the refreshed transcript. The turn itself runs
//! through a `TurnExecutor`, chosen once at construction: against a remote
//! orchestration endpoint when one is configured, in-process otherwise.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, warn};

use crate::agent::Orchestrator;
use crate::core::types::roles;
use crate::core::{ChatMessage, MessageMetadata, PharmabridgeError, Result, TurnOutcome};
use crate::server::{ChatTurnRequest, ChatTurnResponse, HistoryMessage};
use crate::store::{Conversation, ConversationStore, StoredMessage};

/// Conversation titles derive from the first user message, clipped here.
const TITLE_LIMIT: usize = 50;

/// Phase of the per-session turn state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnPhase {
    /// No turn outstanding
    Idle,
    /// User message being persisted
    Sending,
    /// Waiting on the orchestration result
    AwaitingModel,
}

/// Executes one orchestration turn, remotely or in-process
#[async_trait]
pub trait TurnExecutor: Send + Sync {
    /// Run the turn for `message` given the server-confirmed history
    async fn execute_turn(
        &self,
        conversation_id: &str,
        message: &str,
        history: &[StoredMessage],
    ) -> Result<TurnOutcome>;

    /// Get the executor name
    fn name(&self) -> &str;
}

/// Runs the orchestration loop in-process
pub struct DirectExecutor {
    orchestrator: Orchestrator,
}

impl DirectExecutor {
    pub fn new(orchestrator: Orchestrator) -> Self {
        Self { orchestrator }
    }
}

#[async_trait]
impl TurnExecutor for DirectExecutor {
    async fn execute_turn(
        &self,
        _conversation_id: &str,
        message: &str,
        history: &[StoredMessage],
    ) -> Result<TurnOutcome> {
        let history: Vec<ChatMessage> =
            history.iter().map(StoredMessage::to_chat_message).collect();
        self.orchestrator.run_turn(&history, message).await
    }

    fn name(&self) -> &str {
        "direct"
    }
}

/// Invokes a remote orchestration endpoint over HTTP
pub struct RemoteExecutor {
    client: reqwest::Client,
    base_url: String,
}

impl RemoteExecutor {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl TurnExecutor for RemoteExecutor {
    async fn execute_turn(
        &self,
        conversation_id: &str,
        message: &str,
        history: &[StoredMessage],
    ) -> Result<TurnOutcome> {
        let request = ChatTurnRequest {
            conversation_id: conversation_id.to_string(),
            message: message.to_string(),
            history: history.iter().map(HistoryMessage::from).collect(),
        };

        let response = self
            .client
            .post(format!("{}/api/chat", self.base_url))
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(PharmabridgeError::backend(text));
        }

        let body: ChatTurnResponse = response
            .json()
            .await
            .map_err(|e| PharmabridgeError::backend(format!("unexpected response body: {}", e)))?;

        Ok(TurnOutcome {
            content: body.content,
            agents_used: body.agents_used,
            report_id: body.report_id,
        })
    }

    fn name(&self) -> &str {
        "remote"
    }
}

/// Coordinates a full user-visible turn against the conversation store
pub struct ChatSession {
    store: ConversationStore,
    executor: Arc<dyn TurnExecutor>,
    owner: String,
    conversation_id: Option<String>,
    phase: TurnPhase,
    completed_agents: Vec<String>,
}

impl ChatSession {
    /// Create a session for `owner` using the given executor
    pub fn new(store: ConversationStore, executor: Arc<dyn TurnExecutor>, owner: impl Into<String>) -> Self {
        Self {
            store,
            executor,
            owner: owner.into(),
            conversation_id: None,
            phase: TurnPhase::Idle,
            completed_agents: Vec::new(),
        }
    }

    /// Current conversation, if one has been created or opened
    pub fn conversation_id(&self) -> Option<&str> {
        self.conversation_id.as_deref()
    }

    /// Agents consulted during the last completed turn
    pub fn completed_agents(&self) -> &[String] {
        &self.completed_agents
    }

    /// Current phase of the turn state machine
    pub fn phase(&self) -> TurnPhase {
        self.phase
    }

    /// Executor backing this session
    pub fn executor_name(&self) -> &str {
        self.executor.name()
    }

    /// Send one user message and return the refreshed transcript
    ///
    /// A failed turn leaves the already persisted user message in place;
    /// there is no rollback. The error carries the failure reason for a
    /// user-visible notification.
    ///
    /// The in-flight rejection only becomes observable when a session is
    /// shared, e.g. behind a lock with concurrent callers; an exclusive
    /// caller always finds the session idle.
    pub async fn send(&mut self, input: &str) -> Result<Vec<StoredMessage>> {
        let message = input.trim().to_string();
        if message.is_empty() {
            return Err(PharmabridgeError::validation("message must not be empty"));
        }
        if self.phase != TurnPhase::Idle {
            return Err(PharmabridgeError::TurnInFlight);
        }

        self.phase = TurnPhase::Sending;
        let result = self.run_turn(&message).await;
        self.phase = TurnPhase::Idle;

        if let Err(ref e) = result {
            warn!(error = %e, "turn failed");
        }
        result
    }

    async fn run_turn(&mut self, message: &str) -> Result<Vec<StoredMessage>> {
        self.completed_agents.clear();

        let conversation_id = match &self.conversation_id {
            Some(id) => id.clone(),
            None => {
                let conversation = self
                    .store
                    .create_conversation(&self.owner, &derive_title(message))
                    .await?;
                info!(id = %conversation.id, "created conversation");
                self.conversation_id = Some(conversation.id.clone());
                conversation.id
            }
        };

        // User message is durable before the orchestration call goes out;
        // the reloaded history is the server-confirmed view the model sees.
        self.store
            .append_message(&conversation_id, roles::USER, message, None)
            .await?;
        let history = self.store.list_messages(&conversation_id).await?;

        self.phase = TurnPhase::AwaitingModel;
        let outcome = self
            .executor
            .execute_turn(&conversation_id, message, &history)
            .await?;

        let metadata = MessageMetadata {
            agents: outcome.agents_used.clone(),
            report_id: outcome.report_id.clone(),
        };
        self.store
            .append_message(
                &conversation_id,
                roles::ASSISTANT,
                &outcome.content,
                Some(&metadata),
            )
            .await?;

        self.completed_agents = outcome.agents_used;
        self.store.list_messages(&conversation_id).await
    }

    /// Open an existing conversation and return its transcript
    pub async fn open(&mut self, conversation_id: &str) -> Result<Vec<StoredMessage>> {
        let messages = self.store.list_messages(conversation_id).await?;
        self.conversation_id = Some(conversation_id.to_string());
        self.completed_agents.clear();
        Ok(messages)
    }

    /// Start a fresh conversation on the next message
    pub fn reset(&mut self) {
        self.conversation_id = None;
        self.completed_agents.clear();
    }

    /// List this user's conversations, newest first
    pub async fn conversations(&self) -> Result<Vec<Conversation>> {
        self.store.list_conversations(&self.owner).await
    }

    /// Delete a conversation; clears the current thread if it was open
    pub async fn delete_conversation(&mut self, conversation_id: &str) -> Result<()> {
        self.store.delete_conversation(conversation_id).await?;
        if self.conversation_id.as_deref() == Some(conversation_id) {
            self.reset();
        }
        Ok(())
    }
}

/// Derive a conversation title from the first user message
fn derive_title(message: &str) -> String {
    let clipped: String = message.chars().take(TITLE_LIMIT).collect();
    if message.chars().count() > TITLE_LIMIT {
        format!("{}...", clipped)
    } else {
        clipped
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_titles_pass_through() {
        assert_eq!(derive_title("market size?"), "market size?");
    }

    #[test]
    fn long_titles_are_clipped_with_ellipsis() {
        let message = "a".repeat(80);
        let title = derive_title(&message);
        assert_eq!(title.chars().count(), TITLE_LIMIT + 3);
        assert!(title.ends_with("..."));
    }

    #[test]
    fn title_clipping_respects_char_boundaries() {
        let message = "é".repeat(60);
        let title = derive_title(&message);
        assert!(title.starts_with('é'));
        assert!(title.ends_with("..."));
    }
}
