//! Configuration management for Pharmabridge
//!
//! Supports environment variables, config files, and runtime overrides.
//!
//! Config file location: ~/.config/pharmabridge/config.toml

use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::PathBuf;

use crate::core::error::{PharmabridgeError, Result};

/// Main configuration for Pharmabridge
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Model gateway configuration
    #[serde(default)]
    pub model: ModelConfig,
    /// Orchestration endpoint server configuration
    #[serde(default)]
    pub server: ServerConfig,
    /// Conversation store configuration
    #[serde(default)]
    pub database: DatabaseConfig,
    /// Remote backend used by the chat client, if any
    #[serde(default)]
    pub backend: BackendConfig,
    /// Orchestration loop configuration
    #[serde(default)]
    pub agent: AgentConfig,
}

/// Hosted model gateway configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelConfig {
    /// Base URL of the OpenAI-compatible completions API
    pub base_url: String,
    /// Model identifier sent with every completion request
    pub model: String,
    /// Bearer token; read from GROQ_API_KEY when absent from the file
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    /// Request timeout in seconds, bounding each model round
    pub timeout_secs: u64,
}

/// Orchestration endpoint server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Bind host (default: 127.0.0.1)
    pub host: String,
    /// Bind port (default: 8787)
    pub port: u16,
}

/// Conversation store configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// SQLx connection URL, e.g. `sqlite:pharmabridge.db?mode=rwc`
    pub url: String,
}

/// Remote backend configuration for the chat client
///
/// When `url` is set, turns are executed against `<url>/api/chat`;
/// otherwise the orchestration loop runs in-process.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BackendConfig {
    /// Base URL of a running orchestration endpoint
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// Orchestration loop configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentConfig {
    /// Number of recent history messages sent to the model per turn
    /// Default: 10
    pub history_window: usize,
    /// Maximum model rounds per turn before the turn fails
    /// Default: 6
    pub max_rounds: usize,
    /// Override for the built-in system prompt
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub system_prompt: Option<String>,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            base_url: env::var("PHARMABRIDGE_MODEL_URL")
                .unwrap_or_else(|_| "https://api.groq.com/openai/v1".to_string()),
            model: env::var("PHARMABRIDGE_MODEL")
                .unwrap_or_else(|_| "llama-3.3-70b-versatile".to_string()),
            api_key: env::var("GROQ_API_KEY").ok(),
            timeout_secs: 120,
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: env::var("PHARMABRIDGE_HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: env::var("PHARMABRIDGE_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8787),
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: env::var("PHARMABRIDGE_DB")
                .unwrap_or_else(|_| "sqlite:pharmabridge.db?mode=rwc".to_string()),
        }
    }
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            history_window: 10,
            max_rounds: 6,
            system_prompt: None,
        }
    }
}

impl Config {
    /// Get the config directory path
    pub fn config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("pharmabridge")
    }

    /// Get the config file path
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("config.toml")
    }

    /// Load configuration from file, environment, and defaults
    /// Priority: CLI args > env vars > config file > defaults
    pub fn load() -> Self {
        // Try to load .env file if it exists
        let _ = dotenvy::dotenv();

        let mut config = Self::load_from_file().unwrap_or_default();

        // The api key never lives in the config file by default; fill
        // it from the environment when the file left it out.
        if config.model.api_key.is_none() {
            config.model.api_key = env::var("GROQ_API_KEY").ok();
        }
        if config.backend.url.is_none() {
            config.backend.url = env::var("PHARMABRIDGE_BACKEND_URL").ok();
        }

        config
    }

    /// Load configuration from file only
    pub fn load_from_file() -> Result<Self> {
        let config_path = Self::config_file();

        if !config_path.exists() {
            return Err(PharmabridgeError::config("Config file not found"));
        }

        let content = fs::read_to_string(&config_path)
            .map_err(|e| PharmabridgeError::config(format!("Failed to read config: {}", e)))?;

        let config: Config = toml::from_str(&content)
            .map_err(|e| PharmabridgeError::config(format!("Failed to parse config: {}", e)))?;

        Ok(config)
    }

    /// Save configuration to file
    pub fn save(&self) -> Result<()> {
        let config_dir = Self::config_dir();
        let config_path = Self::config_file();

        if !config_dir.exists() {
            fs::create_dir_all(&config_dir).map_err(|e| {
                PharmabridgeError::config(format!("Failed to create config dir: {}", e))
            })?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| PharmabridgeError::config(format!("Failed to serialize config: {}", e)))?;

        fs::write(&config_path, content)
            .map_err(|e| PharmabridgeError::config(format!("Failed to write config: {}", e)))?;

        Ok(())
    }

    /// Get the bearer token, failing when none is configured
    pub fn api_key(&self) -> Result<&str> {
        self.model.api_key.as_deref().ok_or_else(|| {
            PharmabridgeError::config("GROQ_API_KEY is not set in environment variables.")
        })
    }
}

impl ServerConfig {
    /// Get the socket address
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.model.model, "llama-3.3-70b-versatile");
        assert_eq!(config.agent.history_window, 10);
        assert_eq!(config.agent.max_rounds, 6);
        assert_eq!(config.server.port, 8787);
    }

    #[test]
    fn test_server_addr() {
        let config = Config::default();
        assert_eq!(config.server.addr(), "127.0.0.1:8787");
    }

    #[test]
    fn test_config_serialization() {
        let config = Config::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        assert!(toml_str.contains("history_window"));
        assert!(toml_str.contains("base_url"));
    }
}
