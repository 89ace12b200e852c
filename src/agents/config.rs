// Agent configuration - one immutable value shared by every agent constructor

use crate::engine::{EngineConfig, EngineInitError};
use tracing::warn;

/// Parse an environment variable, logging a warning if the value is present
/// but invalid.
fn parse_env_var<T: std::str::FromStr>(name: &str, default: T) -> T {
    match std::env::var(name) {
        Ok(v) => match v.parse() {
            Ok(parsed) => parsed,
            Err(_) => {
                warn!(var = name, value = %v, "Invalid env var value, using default");
                default
            }
        },
        Err(_) => default,
    }
}

/// Shared configuration for all agent variants. Created once at process start
/// and never mutated.
#[derive(Debug, Clone)]
pub struct AgentConfig {
    /// Inference backend settings
    pub engine: EngineConfig,
    /// Web search backend URL (None = search tool disabled)
    pub search_endpoint: Option<String>,
    /// Web search backend API key
    pub search_api_key: Option<String>,
    /// Maximum tool call rounds per execution
    pub max_tool_rounds: u32,
}

impl AgentConfig {
    /// Load from environment variables
    pub fn from_env() -> Result<Self, EngineInitError> {
        dotenvy::dotenv().ok();

        let engine = EngineConfig::from_env()?;
        let search_endpoint = std::env::var("SEARCH_ENDPOINT").ok();
        let search_api_key = std::env::var("SEARCH_API_KEY").ok();
        let max_tool_rounds = parse_env_var("AGENT_MAX_TOOL_ROUNDS", 8);

        Ok(Self {
            engine,
            search_endpoint,
            search_api_key,
            max_tool_rounds,
        })
    }
}
