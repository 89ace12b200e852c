// Engine module - LLM inference client shared by all agent variants

pub mod builder;
pub mod client;
pub mod error;
pub mod types;

pub use builder::RequestBuilder;
pub use client::Engine;
pub use error::{EngineError, EngineInitError};
pub use types::{
    ChatMessage, CompletionRequest, CompletionResponse, ContentBlock, Role, StopReason,
    ToolDefinition, Usage,
};

/// Engine configuration
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Inference backend URL
    pub endpoint: String,
    /// API key for authentication
    pub api_key: String,
    /// Model identifier
    pub model: String,
    /// Maximum retry attempts
    pub max_retries: u32,
    /// Base retry delay in milliseconds
    pub base_retry_delay_ms: u64,
    /// Request timeout in seconds
    pub request_timeout_secs: u64,
    /// Maximum output tokens
    pub max_output_tokens: u32,
    /// Temperature (None = model default)
    pub temperature: Option<f32>,
}

impl EngineConfig {
    /// Load from environment variables
    pub fn from_env() -> Result<Self, EngineInitError> {
        dotenvy::dotenv().ok();

        let endpoint = std::env::var("LLM_ENDPOINT")
            .map_err(|_| EngineInitError::ConfigMissing("LLM_ENDPOINT".into()))?;
        let api_key = std::env::var("LLM_API_KEY")
            .map_err(|_| EngineInitError::ConfigMissing("LLM_API_KEY".into()))?;
        let model = std::env::var("LLM_MODEL")
            .map_err(|_| EngineInitError::ConfigMissing("LLM_MODEL".into()))?;

        let max_retries = std::env::var("LLM_MAX_RETRIES")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(3);

        let base_retry_delay_ms = std::env::var("LLM_RETRY_DELAY_MS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(1000);

        let request_timeout_secs = std::env::var("LLM_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(120);

        let max_output_tokens = std::env::var("LLM_MAX_TOKENS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(4096);

        let temperature = std::env::var("LLM_TEMPERATURE")
            .ok()
            .and_then(|v| v.parse().ok());

        Ok(Self {
            endpoint,
            api_key,
            model,
            max_retries,
            base_retry_delay_ms,
            request_timeout_secs,
            max_output_tokens,
            temperature,
        })
    }
}
