//! Agent module - the orchestration loop
//!
//! Turns one user message plus trimmed history into one final assistant
//! answer, satisfying tool requests along the way.

pub mod orchestrator;

pub use orchestrator::Orchestrator;
