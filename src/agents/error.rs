// Error types for the agents module

use crate::engine::EngineInitError;
use thiserror::Error;

/// Agent construction errors
#[derive(Debug, Error)]
pub enum AgentError {
    #[error("Failed to initialize {kind} agent: {source}")]
    Init {
        kind: &'static str,
        #[source]
        source: EngineInitError,
    },
}

/// Runtime errors from the web search tool
#[derive(Debug, Error)]
pub enum ToolError {
    #[error("Search request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Search backend returned HTTP {0}")]
    Status(u16),
}
