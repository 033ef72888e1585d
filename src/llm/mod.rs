//! LLM module - model gateway abstraction
//!
//! Contains the `ModelClient` trait and the Groq-hosted implementation.

pub mod groq;
pub mod traits;

pub use groq::GroqClient;
pub use traits::{Completion, ModelClient, ToolChoice};
