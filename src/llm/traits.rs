//! Model client trait for abstracting the hosted completion endpoint
//!
//! Enables swapping the Groq gateway for a scripted fake in tests.

use async_trait::async_trait;

use crate::core::{ChatMessage, Result, ToolCall, ToolDefinition};

/// Parsed completion from the model gateway
///
/// Either a terminal assistant answer or a batch of tool calls that must
/// be satisfied before the model can continue.
#[derive(Debug, Clone, Default)]
pub struct Completion {
    /// Text content; may be absent when the model only requests tools
    pub content: Option<String>,
    /// Tool calls requested by the model; empty for a terminal answer
    pub tool_calls: Vec<ToolCall>,
}

impl Completion {
    /// Create a terminal text completion
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            content: Some(content.into()),
            tool_calls: Vec::new(),
        }
    }

    /// Create a completion requesting tool calls
    pub fn tool_calls(calls: Vec<ToolCall>) -> Self {
        Self {
            content: None,
            tool_calls: calls,
        }
    }

    /// A completion is terminal when it carries no tool call requests
    pub fn is_terminal(&self) -> bool {
        self.tool_calls.is_empty()
    }
}

/// Tool selection policy sent with a completion request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolChoice {
    /// The model decides whether to call tools (`"auto"` on the wire)
    Auto,
    /// Omit the field; the gateway applies its own default
    Unspecified,
}

impl ToolChoice {
    /// The wire value, when one is sent at all
    pub fn as_wire(self) -> Option<&'static str> {
        match self {
            ToolChoice::Auto => Some("auto"),
            ToolChoice::Unspecified => None,
        }
    }
}

/// Trait for model completion clients
#[async_trait]
pub trait ModelClient: Send + Sync {
    /// Send the message list and tool descriptors, returning the parsed
    /// completion. Non-success statuses and malformed bodies are hard
    /// failures; callers abort the turn rather than retry.
    async fn complete(
        &self,
        messages: &[ChatMessage],
        tools: &[ToolDefinition],
        tool_choice: ToolChoice,
    ) -> Result<Completion>;

    /// Get the client name
    fn name(&self) -> &str;
}
