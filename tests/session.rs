//! Chat session tests
//!
//! Full turn lifecycle with a scripted model, an in-process executor, and
//! an in-memory conversation store.

mod common;

use std::sync::Arc;

use common::{call, ScriptedModel};
use pharmabridge::core::config::AgentConfig;
use pharmabridge::core::types::roles;
use pharmabridge::core::PharmabridgeError;
use pharmabridge::llm::Completion;
use pharmabridge::session::{ChatSession, DirectExecutor, TurnPhase};
use pharmabridge::{ConversationStore, Orchestrator, ToolRegistry};

async fn memory_store() -> ConversationStore {
    let store = ConversationStore::connect("sqlite::memory:").await.unwrap();
    store.migrate().await.unwrap();
    store
}

fn session_with(store: ConversationStore, script: Vec<pharmabridge::Result<Completion>>) -> ChatSession {
    let orchestrator = Orchestrator::new(
        Arc::new(ScriptedModel::new(script)),
        Arc::new(ToolRegistry::new()),
        AgentConfig::default(),
    );
    ChatSession::new(store, Arc::new(DirectExecutor::new(orchestrator)), "user-1")
}

#[tokio::test]
async fn successful_turn_persists_user_and_assistant() {
    let store = memory_store().await;
    let mut session = session_with(
        store.clone(),
        vec![
            Ok(Completion::tool_calls(vec![call(
                "call_1",
                "query_iqvia_api",
                r#"{"query":"neuropathic pain"}"#,
            )])),
            Ok(Completion::text("The market is $6.5B.")),
        ],
    );

    let transcript = session
        .send("What is the market size for neuropathic pain?")
        .await
        .unwrap();

    assert_eq!(transcript.len(), 2);
    assert_eq!(transcript[0].role, roles::USER);
    assert_eq!(
        transcript[0].content,
        "What is the market size for neuropathic pain?"
    );
    assert_eq!(transcript[1].role, roles::ASSISTANT);
    assert_eq!(transcript[1].content, "The market is $6.5B.");

    let metadata = transcript[1].metadata().unwrap();
    assert_eq!(metadata.agents, vec!["query_iqvia_api"]);
    assert_eq!(session.completed_agents(), ["query_iqvia_api"]);
    assert_eq!(session.phase(), TurnPhase::Idle);

    let conversations = session.conversations().await.unwrap();
    assert_eq!(conversations.len(), 1);
    assert_eq!(
        conversations[0].title,
        "What is the market size for neuropathic pain?"
    );
}

#[tokio::test]
async fn empty_input_is_rejected_before_any_write() {
    let store = memory_store().await;
    let mut session = session_with(store, vec![]);

    let err = session.send("   \n").await.unwrap_err();
    assert!(matches!(err, PharmabridgeError::Validation(_)));
    assert!(session.conversations().await.unwrap().is_empty());
    assert!(session.conversation_id().is_none());
}

#[tokio::test]
async fn failed_turn_keeps_the_user_message() {
    let store = memory_store().await;
    let mut session = session_with(
        store.clone(),
        vec![Err(PharmabridgeError::upstream("gateway down"))],
    );

    let err = session.send("will fail").await.unwrap_err();
    assert!(matches!(err, PharmabridgeError::Upstream(_)));
    assert_eq!(session.phase(), TurnPhase::Idle);

    // The user message persisted before the failure, with no reply.
    let conversation_id = session.conversation_id().unwrap().to_string();
    let messages = store.list_messages(&conversation_id).await.unwrap();
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0].role, roles::USER);
    assert_eq!(messages[0].content, "will fail");
}

#[tokio::test]
async fn long_first_message_titles_are_truncated() {
    let store = memory_store().await;
    let message = "x".repeat(80);
    let mut session = session_with(store, vec![Ok(Completion::text("ok"))]);

    session.send(&message).await.unwrap();

    let conversations = session.conversations().await.unwrap();
    let title = &conversations[0].title;
    assert_eq!(title.chars().count(), 53);
    assert!(title.ends_with("..."));
}

#[tokio::test]
async fn later_turns_reuse_the_conversation() {
    let store = memory_store().await;
    let mut session = session_with(
        store,
        vec![
            Ok(Completion::text("first answer")),
            Ok(Completion::text("second answer")),
        ],
    );

    session.send("first question").await.unwrap();
    let transcript = session.send("second question").await.unwrap();

    assert_eq!(transcript.len(), 4);
    assert_eq!(session.conversations().await.unwrap().len(), 1);

    // A turn that used no tools reports no completed agents.
    assert!(session.completed_agents().is_empty());
}

#[tokio::test]
async fn reset_starts_a_new_thread() {
    let store = memory_store().await;
    let mut session = session_with(
        store,
        vec![
            Ok(Completion::text("one")),
            Ok(Completion::text("two")),
        ],
    );

    session.send("first thread").await.unwrap();
    session.reset();
    let transcript = session.send("second thread").await.unwrap();

    assert_eq!(transcript.len(), 2);
    assert_eq!(session.conversations().await.unwrap().len(), 2);
}

#[tokio::test]
async fn deleting_the_open_conversation_clears_it() {
    let store = memory_store().await;
    let mut session = session_with(store, vec![Ok(Completion::text("gone soon"))]);

    session.send("hello").await.unwrap();
    let id = session.conversation_id().unwrap().to_string();

    session.delete_conversation(&id).await.unwrap();
    assert!(session.conversation_id().is_none());
    assert!(session.conversations().await.unwrap().is_empty());
}

#[tokio::test]
async fn open_resumes_an_existing_conversation() {
    let store = memory_store().await;
    let mut session = session_with(
        store,
        vec![
            Ok(Completion::text("first")),
            Ok(Completion::text("resumed")),
        ],
    );

    session.send("start a thread").await.unwrap();
    let id = session.conversation_id().unwrap().to_string();

    session.reset();
    let restored = session.open(&id).await.unwrap();
    assert_eq!(restored.len(), 2);

    let transcript = session.send("continue it").await.unwrap();
    assert_eq!(transcript.len(), 4);
}
