// Recipe generation agent - prompted to return a structured JSON recipe

use super::config::AgentConfig;
use super::error::AgentError;
use super::types::{completion_metadata, Agent, AgentKind, AgentResult};
use crate::engine::{Engine, RequestBuilder};
use async_trait::async_trait;
use tracing::{debug, warn};

const SYSTEM_PROMPT: &str = "You are a professional chef and recipe developer. \
    When asked for a recipe, respond with a single JSON object matching the \
    schema given in the request, and nothing else. Do not wrap the JSON in \
    markdown fences or commentary.";

/// Recipe agent. Downstream extraction tolerates output that violates the
/// schema instruction, so this agent stays a plain prompt wrapper.
pub struct RecipeAgent {
    engine: Engine,
}

impl RecipeAgent {
    pub fn new(config: &AgentConfig) -> Result<Self, AgentError> {
        let engine = Engine::new(config.engine.clone()).map_err(|source| AgentError::Init {
            kind: "recipe",
            source,
        })?;
        Ok(Self { engine })
    }
}

#[async_trait]
impl Agent for RecipeAgent {
    fn kind(&self) -> AgentKind {
        AgentKind::Recipe
    }

    fn capabilities(&self) -> Vec<String> {
        ["recipe_generation", "dietary_adaptation", "structured_output"]
            .iter()
            .map(|s| s.to_string())
            .collect()
    }

    async fn execute(&self, prompt: &str, _use_tools: bool) -> AgentResult {
        debug!(prompt_len = prompt.len(), "recipe agent executing");

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
                warn!(error = %e, "recipe agent execution failed");
                AgentResult::failed(e.to_string())
            }
        }
    }
}
