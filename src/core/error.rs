//! Custom error types for Pharmabridge
//!
//! Provides a unified error handling system across all modules.

use thiserror::Error;

/// Main error type for Pharmabridge operations
#[derive(Error, Debug)]
pub enum PharmabridgeError {
    /// Model gateway returned a non-success status or an unusable body
    #[error("model gateway error: {0}")]
    Upstream(String),

    /// The model kept requesting tools past the configured round limit
    #[error("tool loop exceeded {0} rounds without a final answer")]
    ToolLoopExceeded(usize),

    /// Rejected before any network or storage call
    #[error("validation error: {0}")]
    Validation(String),

    /// A turn is already in flight for this session
    #[error("a turn is already in flight; wait for it to complete")]
    TurnInFlight,

    /// Remote orchestration endpoint failure, body text as the reason
    #[error("backend error: {0}")]
    Backend(String),

    /// Configuration errors
    #[error("configuration error: {0}")]
    Config(String),

    /// Conversation store errors
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Schema migration errors
    #[error("migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// JSON parsing errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// HTTP request errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience Result type for Pharmabridge operations
pub type Result<T> = std::result::Result<T, PharmabridgeError>;

impl PharmabridgeError {
    /// Create a model gateway error
    pub fn upstream(msg: impl Into<String>) -> Self {
        Self::Upstream(msg.into())
    }

    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create a backend error
    pub fn backend(msg: impl Into<String>) -> Self {
        Self::Backend(msg.into())
    }

    /// Create a config error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}
