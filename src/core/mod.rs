//! Core module - shared types, configuration, and errors

pub mod config;
pub mod error;
pub mod types;

pub use config::Config;
pub use error::{PharmabridgeError, Result};
pub use types::{
    ChatMessage, FunctionCall, FunctionDefinition, MessageMetadata, ToolCall, ToolDefinition,
    TurnOutcome,
};
