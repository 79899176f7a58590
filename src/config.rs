//! Configuration management for Repo Agent.
//!
//! Configuration can be set via environment variables:
//! - `GEMINI_API_KEY` - Required. Your Google AI Studio API key.
//! - `MODEL` - Optional. The Gemini model to use. Defaults to `gemini-2.5-flash-preview-04-17`.
//! - `HOST` - Optional. Server host. Defaults to `127.0.0.1`.
//! - `PORT` - Optional. Server port. Defaults to `3000`.
//! - `REPOMIX_API_URL` - Optional. Packing service endpoint. Defaults to `https://api.repomix.com/api/pack`.
//! - `CACHE_TTL_SECS` - Optional. Packed-content cache expiry in seconds. Defaults to `300`.
//! - `THINKING_BUDGET` - Optional. Gemini thinking token budget. Defaults to `2048`.

use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Invalid value for {0}: {1}")]
    InvalidValue(String, String),
}

/// Agent configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Google AI Studio API key
    pub api_key: String,

    /// Gemini model identifier
    pub model: String,

    /// Server host
    pub host: String,

    /// Server port
    pub port: u16,

    /// Packing service endpoint
    pub repomix_api_url: String,

    /// How long packed repo contents stay cached
    pub cache_ttl: Duration,

    /// Gemini thinking token budget
    pub thinking_budget: u32,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingEnvVar` if `GEMINI_API_KEY` is not set.
    pub fn from_env() -> Result<Self, ConfigError> {
        let api_key = std::env::var("GEMINI_API_KEY")
            .map_err(|_| ConfigError::MissingEnvVar("GEMINI_API_KEY".to_string()))?;

        let model = std::env::var("MODEL")
            .unwrap_or_else(|_| "gemini-2.5-flash-preview-04-17".to_string());

        let host = std::env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());

        let port = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse()
            .map_err(|e| ConfigError::InvalidValue("PORT".to_string(), format!("{}", e)))?;

        let repomix_api_url = std::env::var("REPOMIX_API_URL")
            .unwrap_or_else(|_| "https://api.repomix.com/api/pack".to_string());

        let cache_ttl_secs: u64 = std::env::var("CACHE_TTL_SECS")
            .unwrap_or_else(|_| "300".to_string())
            .parse()
            .map_err(|e| ConfigError::InvalidValue("CACHE_TTL_SECS".to_string(), format!("{}", e)))?;

        let thinking_budget = std::env::var("THINKING_BUDGET")
            .unwrap_or_else(|_| "2048".to_string())
            .parse()
            .map_err(|e| {
                ConfigError::InvalidValue("THINKING_BUDGET".to_string(), format!("{}", e))
            })?;

        Ok(Self {
            api_key,
            model,
            host,
            port,
            repomix_api_url,
            cache_ttl: Duration::from_secs(cache_ttl_secs),
            thinking_budget,
        })
    }

    /// Create a config with custom values (useful for testing).
    pub fn new(api_key: String, model: String) -> Self {
        Self {
            api_key,
            model,
            host: "127.0.0.1".to_string(),
            port: 3000,
            repomix_api_url: "https://api.repomix.com/api/pack".to_string(),
            cache_ttl: Duration::from_secs(300),
            thinking_budget: 2048,
        }
    }
}
