use std::fmt;

use thiserror::Error;

use crate::chat::openrouter::{OpenRouterChatConfig, OpenRouterConfigError};
use crate::config_env::{optional_trimmed_env, parse_u64_env, parse_usize_env};

const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8080";
const DEFAULT_SESSION_IDLE_TTL_SECONDS: u64 = 3600;
const DEFAULT_MAX_UPLOAD_BYTES: usize = 20 * 1024 * 1024;

#[derive(Clone)]
pub struct ApiConfig {
    pub bind_addr: String,
    /// Server-wide key. When absent every session has to supply its own.
    pub openrouter_api_key: Option<String>,
    pub openrouter: OpenRouterChatConfig,
    pub session_idle_ttl_seconds: u64,
    pub max_upload_bytes: usize,
}

impl fmt::Debug for ApiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiConfig")
            .field("bind_addr", &self.bind_addr)
            .field(
                "openrouter_api_key",
                &self.openrouter_api_key.as_ref().map(|_| "<redacted>"),
            )
            .field("openrouter", &self.openrouter)
            .field("session_idle_ttl_seconds", &self.session_idle_ttl_seconds)
            .field("max_upload_bytes", &self.max_upload_bytes)
            .finish()
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid integer in env var {0}")]
    ParseInt(String),
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),
    #[error("failed to load .env file: {0}")]
    Dotenv(String),
    #[error(transparent)]
    OpenRouter(#[from] OpenRouterConfigError),
}

impl ApiConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let session_idle_ttl_seconds =
            parse_u64_env("SESSION_IDLE_TTL_SECONDS", DEFAULT_SESSION_IDLE_TTL_SECONDS)?;
        if session_idle_ttl_seconds == 0 {
            return Err(ConfigError::InvalidConfiguration(
                "SESSION_IDLE_TTL_SECONDS must be greater than zero".to_string(),
            ));
        }

        Ok(Self {
            bind_addr: optional_trimmed_env("API_BIND_ADDR")
                .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string()),
            openrouter_api_key: optional_trimmed_env("OPENROUTER_API_KEY"),
            openrouter: OpenRouterChatConfig::from_env()?,
            session_idle_ttl_seconds,
            max_upload_bytes: parse_usize_env("MAX_UPLOAD_BYTES", DEFAULT_MAX_UPLOAD_BYTES)?,
        })
    }
}

/// Loads a `.env` file from the working directory when one exists. A missing
/// file is not an error.
pub fn load_dotenv() -> Result<(), ConfigError> {
    match dotenvy::dotenv() {
        Ok(_) => Ok(()),
        Err(err) if err.not_found() => Ok(()),
        Err(err) => Err(ConfigError::Dotenv(err.to_string())),
    }
}
