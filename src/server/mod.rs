//! Orchestration endpoint - the system boundary HTTP server
//!
//! Stateless request handler: each `POST /api/chat` runs one orchestration
//! turn and returns the synthesized answer plus the agents consulted. All
//! internal failures become a structured `{"error": ...}` body with a
//! non-success status.

use std::sync::Arc;

use axum::extract::State;
use axum::http::{header::HeaderName, Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use crate::agent::Orchestrator;
use crate::core::{ChatMessage, PharmabridgeError, Result};
use crate::store::StoredMessage;

/// Request body for one orchestration turn
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatTurnRequest {
    #[serde(rename = "conversationId")]
    pub conversation_id: String,
    pub message: String,
    #[serde(default)]
    pub history: Vec<HistoryMessage>,
}

/// A history entry as sent by the client coordinator
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryMessage {
    pub id: String,
    pub role: String,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub metadata: Option<serde_json::Value>,
}

impl HistoryMessage {
    /// Project into the wire-level message shape for the model request
    pub fn to_chat_message(&self) -> ChatMessage {
        ChatMessage {
            role: self.role.clone(),
            content: Some(self.content.clone().unwrap_or_default()),
            tool_calls: None,
            tool_call_id: None,
        }
    }
}

impl From<&StoredMessage> for HistoryMessage {
    fn from(msg: &StoredMessage) -> Self {
        Self {
            id: msg.id.clone(),
            role: msg.role.clone(),
            content: Some(msg.content.clone()),
            metadata: msg
                .metadata
                .as_deref()
                .and_then(|raw| serde_json::from_str(raw).ok()),
        }
    }
}

/// Success body for one orchestration turn
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatTurnResponse {
    pub content: String,
    #[serde(rename = "agentsUsed")]
    pub agents_used: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub report_id: Option<String>,
}

/// Failure body returned with a non-success status
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

#[derive(Debug, Serialize)]
struct Health {
    status: &'static str,
}

/// Shared state for the orchestration endpoint
#[derive(Clone)]
pub struct AppState {
    orchestrator: Arc<Orchestrator>,
}

impl AppState {
    pub fn new(orchestrator: Arc<Orchestrator>) -> Self {
        Self { orchestrator }
    }
}

/// Build the router with permissive CORS and request tracing
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::any())
        .allow_headers([
            HeaderName::from_static("authorization"),
            HeaderName::from_static("x-client-info"),
            HeaderName::from_static("apikey"),
            HeaderName::from_static("content-type"),
        ])
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS]);

    Router::new()
        .route("/api/chat", post(chat_turn))
        .route("/health", get(health))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bind and serve until shutdown
pub async fn serve(addr: &str, state: AppState) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(addr, "orchestration endpoint listening");
    axum::serve(listener, router(state))
        .await
        .map_err(PharmabridgeError::from)?;
    Ok(())
}

async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

async fn chat_turn(
    State(state): State<AppState>,
    Json(request): Json<ChatTurnRequest>,
) -> std::result::Result<Json<ChatTurnResponse>, ApiError> {
    if request.message.trim().is_empty() {
        return Err(ApiError(PharmabridgeError::validation(
            "message must not be empty",
        )));
    }

    info!(
        conversation = %request.conversation_id,
        history = request.history.len(),
        "orchestration turn requested"
    );

    let history: Vec<ChatMessage> = request
        .history
        .iter()
        .map(HistoryMessage::to_chat_message)
        .collect();

    let outcome = state
        .orchestrator
        .run_turn(&history, &request.message)
        .await
        .map_err(ApiError)?;

    Ok(Json(ChatTurnResponse {
        content: outcome.content,
        agents_used: outcome.agents_used,
        report_id: outcome.report_id,
    }))
}

/// Wrapper mapping domain errors onto the structured failure response
pub struct ApiError(pub PharmabridgeError);

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            PharmabridgeError::Validation(_) => StatusCode::BAD_REQUEST,
            PharmabridgeError::Upstream(_) | PharmabridgeError::ToolLoopExceeded(_) => {
                StatusCode::BAD_GATEWAY
            }
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };

        error!(status = %status, error = %self.0, "turn failed");

        let body = ErrorBody {
            error: self.0.to_string(),
        };
        (status, Json(body)).into_response()
    }
}
