//! Orchestration loop
//!
//! Drives the repeated model-call / tool-call cycle for a single user turn
//! until the model produces a final textual answer. Each round the model
//! either answers or requests tool calls; requested calls are executed in
//! order and fed back as `role: tool` messages paired by call id.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::core::config::AgentConfig;
use crate::core::{ChatMessage, PharmabridgeError, Result, TurnOutcome};
use crate::llm::{ModelClient, ToolChoice};
use crate::tools::ToolRegistry;

/// Role description sent as the system prompt of every turn
const SYSTEM_PROMPT: &str = "\
You are Pharmabridge AI, a drug repurposing intelligence assistant. You have access to multiple specialized agents:
- IQVIA Insights: Market data and trends
- Patent Landscape: Patent status and FTO analysis
- Clinical Trials: Trial information
- EXIM Trends: Trade data
- Internal Knowledge: Company research
- Web Intelligence: Scientific publications

Analyze the user's question and use the appropriate tools to gather comprehensive information. Synthesize the results into a clear, actionable response.";

/// Orchestrates model and tool calls for a single turn
pub struct Orchestrator {
    model: Arc<dyn ModelClient>,
    tools: Arc<ToolRegistry>,
    settings: AgentConfig,
}

impl Orchestrator {
    /// Create a new orchestrator
    pub fn new(model: Arc<dyn ModelClient>, tools: Arc<ToolRegistry>, settings: AgentConfig) -> Self {
        Self {
            model,
            tools,
            settings,
        }
    }

    /// Run one turn to completion
    ///
    /// `history` is the full ordered conversation so far, excluding the new
    /// user message; only the most recent `history_window` entries are sent
    /// to the model. Any model failure aborts the turn; partially gathered
    /// tool results are discarded.
    pub async fn run_turn(&self, history: &[ChatMessage], message: &str) -> Result<TurnOutcome> {
        let mut messages = self.build_messages(history, message);
        let definitions = self.tools.definitions();

        let mut agents_used: Vec<String> = Vec::new();
        let mut completion = self
            .model
            .complete(&messages, definitions, ToolChoice::Auto)
            .await?;
        let mut round = 1usize;

        while !completion.is_terminal() {
            if round >= self.settings.max_rounds {
                warn!(
                    rounds = round,
                    "model kept requesting tools past the round limit"
                );
                return Err(PharmabridgeError::ToolLoopExceeded(self.settings.max_rounds));
            }

            debug!(
                round,
                calls = completion.tool_calls.len(),
                "model requested tool calls"
            );

            messages.push(ChatMessage::assistant_tool_calls(
                completion.tool_calls.clone(),
            ));

            for call in &completion.tool_calls {
                let args = call.parse_arguments().map_err(|e| {
                    PharmabridgeError::upstream(format!(
                        "malformed tool arguments for {}: {}",
                        call.function.name, e
                    ))
                })?;

                let result = self.tools.execute(&call.function.name, &args);
                debug!(tool = %call.function.name, "executed agent tool");

                agents_used.push(call.function.name.clone());
                messages.push(ChatMessage::tool(&call.id, serde_json::to_string(&result)?));
            }

            completion = self
                .model
                .complete(&messages, definitions, ToolChoice::Unspecified)
                .await?;
            round += 1;
        }

        debug!(rounds = round, agents = agents_used.len(), "turn complete");

        Ok(TurnOutcome {
            content: completion.content.unwrap_or_default(),
            agents_used,
            report_id: None,
        })
    }

    /// Build the initial message list: system prompt, windowed history,
    /// then the new user message
    fn build_messages(&self, history: &[ChatMessage], message: &str) -> Vec<ChatMessage> {
        let prompt = self
            .settings
            .system_prompt
            .as_deref()
            .unwrap_or(SYSTEM_PROMPT);

        let window_start = history.len().saturating_sub(self.settings.history_window);

        let mut messages = Vec::with_capacity(history.len() - window_start + 2);
        messages.push(ChatMessage::system(prompt));
        messages.extend(history[window_start..].iter().cloned());
        messages.push(ChatMessage::user(message));
        messages
    }
}
