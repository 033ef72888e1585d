//! Pharmabridge - Drug Repurposing Intelligence Assistant
//!
//! A tool-augmented chat assistant: a stateless orchestration endpoint that
//! drives an LLM/tool loop over a fixed set of specialist agents, and a
//! client coordinator that keeps a durable conversation log consistent
//! across each turn.
//!
//! # Architecture
//!
//! - **Core**: Shared types, configuration, and error handling
//! - **LLM**: Model gateway abstraction with the Groq implementation
//! - **Tools**: The specialist agent registry and its mock dataset
//! - **Agent**: The orchestration loop
//! - **Store**: SQLite conversation persistence
//! - **Server**: The orchestration HTTP endpoint
//! - **Session**: The client-side turn coordinator
//! - **CLI**: Command-line interface and REPL

pub mod agent;
pub mod cli;
pub mod core;
pub mod llm;
pub mod server;
pub mod session;
pub mod store;
pub mod tools;

// Re-export commonly used items
pub use agent::Orchestrator;
pub use cli::Repl;
pub use core::{Config, PharmabridgeError, Result};
pub use session::ChatSession;
pub use store::ConversationStore;
pub use tools::ToolRegistry;
