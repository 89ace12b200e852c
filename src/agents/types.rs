// Agent contract types

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// Agent variants known to the registry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AgentKind {
    Chat,
    Search,
    Recipe,
}

impl AgentKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            AgentKind::Chat => "chat",
            AgentKind::Search => "search",
            AgentKind::Recipe => "recipe",
        }
    }

    /// Resolve a chat request's agent type. Unrecognized values fall back to
    /// `Chat`; this is the documented dispatch rule, not an error.
    pub fn from_chat_type(agent_type: &str) -> Self {
        match agent_type {
            "search" => AgentKind::Search,
            _ => AgentKind::Chat,
        }
    }
}

impl std::fmt::Display for AgentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of one agent execution. Execution failures are folded into
/// `success = false` plus an error text; callers never see an Err.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AgentResult {
    pub success: bool,
    pub content: String,
    #[serde(default)]
    pub metadata: HashMap<String, Value>,
    #[serde(default)]
    pub error: Option<String>,
}

impl AgentResult {
    pub fn ok(content: impl Into<String>, metadata: HashMap<String, Value>) -> Self {
        Self {
            success: true,
            content: content.into(),
            metadata,
            error: None,
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            success: false,
            content: String::new(),
            metadata: HashMap::new(),
            error: Some(error.into()),
        }
    }
}

/// Execution metadata common to every agent variant
pub(crate) fn completion_metadata(
    response: &crate::engine::CompletionResponse,
) -> HashMap<String, Value> {
    let mut metadata = HashMap::new();
    metadata.insert("model".to_string(), Value::String(response.model.clone()));
    if let Some(usage) = response.usage {
        metadata.insert("input_tokens".to_string(), usage.input_tokens.into());
        metadata.insert("output_tokens".to_string(), usage.output_tokens.into());
    }
    metadata
}

/// Contract each agent variant implements
#[async_trait]
pub trait Agent: Send + Sync {
    /// Variant of this agent
    fn kind(&self) -> AgentKind;

    /// Static capability list advertised by this variant
    fn capabilities(&self) -> Vec<String>;

    /// Execute a prompt, optionally with external tools enabled
    async fn execute(&self, prompt: &str, use_tools: bool) -> AgentResult;

    /// Release held tool connections. Default: nothing to release.
    async fn close(&self) {}
}
