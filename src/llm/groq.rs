//! Groq client implementation
//!
//! Async HTTP client for the OpenAI-compatible chat completions API with
//! tool calling support.

use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::core::{ChatMessage, Config, PharmabridgeError, Result, ToolCall, ToolDefinition};
use crate::llm::traits::{Completion, ModelClient, ToolChoice};

use async_trait::async_trait;

/// Groq API client
#[derive(Clone)]
pub struct GroqClient {
    client: Client,
    base_url: String,
    api_key: String,
    model: String,
}

/// Chat completions request
#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    tools: &'a [ToolDefinition],
    #[serde(skip_serializing_if = "Option::is_none")]
    tool_choice: Option<&'static str>,
}

/// Chat completions response
#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

/// A response choice
#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

/// The assistant message within a choice
#[derive(Debug, Deserialize)]
struct ResponseMessage {
    #[serde(default)]
    content: Option<String>,
    #[serde(default)]
    tool_calls: Option<Vec<ToolCall>>,
}

impl GroqClient {
    /// Create a new client from configuration
    pub fn from_config(config: &Config) -> Result<Self> {
        let api_key = config.api_key()?.to_string();

        let client = Client::builder()
            .timeout(Duration::from_secs(config.model.timeout_secs))
            .build()
            .map_err(|e| {
                PharmabridgeError::config(format!("Failed to create HTTP client: {}", e))
            })?;

        Ok(Self {
            client,
            base_url: config.model.base_url.trim_end_matches('/').to_string(),
            api_key,
            model: config.model.model.clone(),
        })
    }

    /// Create a client with explicit settings
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        model: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build().map_err(|e| {
            PharmabridgeError::config(format!("Failed to create HTTP client: {}", e))
        })?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            model: model.into(),
        })
    }

    /// The configured model identifier
    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl ModelClient for GroqClient {
    async fn complete(
        &self,
        messages: &[ChatMessage],
        tools: &[ToolDefinition],
        tool_choice: ToolChoice,
    ) -> Result<Completion> {
        let request = ChatCompletionRequest {
            model: &self.model,
            messages,
            tools,
            tool_choice: tool_choice.as_wire(),
        };

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_connect() {
                    PharmabridgeError::upstream(format!(
                        "Cannot connect to model gateway at {}",
                        self.base_url
                    ))
                } else {
                    PharmabridgeError::from(e)
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(PharmabridgeError::upstream(format!(
                "model gateway response not OK: {} - {}",
                status, error_text
            )));
        }

        let body: ChatCompletionResponse = response.json().await.map_err(|e| {
            PharmabridgeError::upstream(format!("failed to decode completion response: {}", e))
        })?;

        let message = body
            .choices
            .into_iter()
            .next()
            .map(|c| c.message)
            .ok_or_else(|| {
                PharmabridgeError::upstream("completion response missing expected choices data")
            })?;

        Ok(Completion {
            content: message.content,
            tool_calls: message.tool_calls.unwrap_or_default(),
        })
    }

    fn name(&self) -> &str {
        "groq"
    }
}
