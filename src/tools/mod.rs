//! Tools module - the specialist agent registry
//!
//! Declares the fixed set of agent tools the model may call and the mock
//! dataset they resolve against.

pub mod mock_data;
pub mod registry;

pub use mock_data::MockDataset;
pub use registry::{AgentKind, ToolRegistry};
