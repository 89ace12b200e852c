// General-purpose conversational agent

use super::config::AgentConfig;
use super::error::AgentError;
use super::types::{completion_metadata, Agent, AgentKind, AgentResult};
use crate::engine::{Engine, RequestBuilder};
use async_trait::async_trait;
use tracing::{debug, warn};

const SYSTEM_PROMPT: &str = "You are a helpful, knowledgeable assistant. \
    Answer the user's questions directly and conversationally. When you are \
    unsure, say so rather than guessing.";

/// Conversational agent with no external tools
pub struct ChatAgent {
    engine: Engine,
}

impl ChatAgent {
    pub fn new(config: &AgentConfig) -> Result<Self, AgentError> {
        let engine = Engine::new(config.engine.clone()).map_err(|source| AgentError::Init {
            kind: "chat",
            source,
        })?;
        Ok(Self { engine })
    }
}

#[async_trait]
impl Agent for ChatAgent {
    fn kind(&self) -> AgentKind {
        AgentKind::Chat
    }

    fn capabilities(&self) -> Vec<String> {
        ["general_conversation", "context_awareness", "follow_up_questions"]
            .iter()
            .map(|s| s.to_string())
            .collect()
    }

    async fn execute(&self, prompt: &str, _use_tools: bool) -> AgentResult {
        debug!(prompt_len = prompt.len(), "chat agent executing");

        let request = match RequestBuilder::new(self.engine.model())
            .system(SYSTEM_PROMPT)
            .user_text(prompt)
            .max_tokens(self.engine.max_output_tokens())
            .temperature(self.engine.temperature())
            .build()
        {
            Ok(request) => request,
            Err(e) => return AgentResult::failed(e.to_string()),
        };

        match self.engine.complete(request).await {
            Ok(response) => AgentResult::ok(response.text(), completion_metadata(&response)),
            Err(e) => {
                warn!(error = %e, "chat agent execution failed");
                AgentResult::failed(e.to_string())
            }
        }
    }
}
