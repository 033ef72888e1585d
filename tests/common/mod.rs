//! Shared test helpers
//!
//! A scripted model client that replays canned completions and records
//! every request it receives.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;

use pharmabridge::core::{ChatMessage, PharmabridgeError, Result, ToolCall, ToolDefinition};
use pharmabridge::llm::{Completion, ModelClient, ToolChoice};

/// Replays a fixed sequence of completions, capturing each request
pub struct ScriptedModel {
    script: Mutex<VecDeque<Result<Completion>>>,
    requests: Mutex<Vec<Vec<ChatMessage>>>,
    choices: Mutex<Vec<ToolChoice>>,
}

impl ScriptedModel {
    pub fn new(script: Vec<Result<Completion>>) -> Self {
        Self {
            script: Mutex::new(script.into_iter().collect()),
            requests: Mutex::new(Vec::new()),
            choices: Mutex::new(Vec::new()),
        }
    }

    /// A model that always fails, as an unreachable gateway would
    pub fn failing() -> Self {
        Self::new(vec![Err(PharmabridgeError::upstream(
            "model gateway response not OK: 500 - boom",
        ))])
    }

    /// Number of completion calls made so far
    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    /// The message list sent with call `index`
    pub fn request(&self, index: usize) -> Vec<ChatMessage> {
        self.requests.lock().unwrap()[index].clone()
    }

    /// Tool choice policies seen, in call order
    pub fn tool_choices(&self) -> Vec<ToolChoice> {
        self.choices.lock().unwrap().clone()
    }
}

#[async_trait]
impl ModelClient for ScriptedModel {
    async fn complete(
        &self,
        messages: &[ChatMessage],
        _tools: &[ToolDefinition],
        tool_choice: ToolChoice,
    ) -> Result<Completion> {
        self.requests.lock().unwrap().push(messages.to_vec());
        self.choices.lock().unwrap().push(tool_choice);
        self.script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(PharmabridgeError::upstream("script exhausted")))
    }

    fn name(&self) -> &str {
        "scripted"
    }
}

/// Shorthand for a function tool call with JSON arguments
pub fn call(id: &str, name: &str, arguments: &str) -> ToolCall {
    ToolCall::function(id, name, arguments)
}
