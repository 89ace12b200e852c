// Dispatcher - resolves agents, builds prompts, normalizes agent results

use super::extract::extract_recipe;
use super::prompt::{recipe_prompt, search_prompt};
use super::types::{
    AgentCapabilities, CapabilitiesResponse, ChatRequest, ChatResponse, RecipeRequest,
    RecipeResponse, SearchRequest, SearchResponse,
};
use crate::agents::{AgentError, AgentKind, AgentRegistry};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{error, info};

/// Per-request dispatch layer over the agent registry. Holds no per-request
/// state; agent-facing methods never fail, they shape failures into the
/// response body instead.
pub struct Dispatcher {
    registry: Arc<AgentRegistry>,
}

impl Dispatcher {
    pub fn new(registry: Arc<AgentRegistry>) -> Self {
        Self { registry }
    }

    /// Handle a chat request. Unrecognized agent types dispatch as "chat"
    /// and the response reports the resolved type.
    pub async fn chat(&self, request: ChatRequest) -> ChatResponse {
        let kind = AgentKind::from_chat_type(&request.agent_type);
        info!(requested = %request.agent_type, resolved = %kind, "dispatching chat request");

        let agent = match self.registry.get_or_create(kind).await {
            Ok(agent) => agent,
            Err(e) => {
                error!(error = %e, "chat dispatch failed");
                return ChatResponse {
                    success: false,
                    response: String::new(),
                    agent_type: kind.as_str().to_string(),
                    capabilities: Vec::new(),
                    metadata: HashMap::new(),
                    error: Some(e.to_string()),
                };
            }
        };

        let result = agent.execute(&request.message, false).await;

        ChatResponse {
            success: result.success,
            response: result.content,
            agent_type: kind.as_str().to_string(),
            capabilities: agent.capabilities(),
            metadata: result.metadata,
            error: result.error,
        }
    }

    /// Handle a search request with tool use enabled
    pub async fn search(&self, request: SearchRequest) -> SearchResponse {
        info!(query = %request.query, "dispatching search request");

        if request.query.trim().is_empty() {
            return search_failure(request.query, "query must not be empty".to_string());
        }

        let agent = match self.registry.get_or_create(AgentKind::Search).await {
            Ok(agent) => agent,
            Err(e) => {
                error!(error = %e, "search dispatch failed");
                return search_failure(request.query, e.to_string());
            }
        };

        let prompt = search_prompt(&request.query);
        let result = agent.execute(&prompt, true).await;

        if result.success {
            let sources_count = result
                .metadata
                .get("tools_used")
                .and_then(Value::as_u64)
                .unwrap_or(0);

            SearchResponse {
                success: true,
                query: request.query,
                summary: result.content,
                search_results: Some(result.metadata),
                sources_count,
                error: None,
            }
        } else {
            search_failure(
                request.query,
                result.error.unwrap_or_else(|| "agent execution failed".to_string()),
            )
        }
    }

    /// Handle a recipe generation request. On agent success the response
    /// always carries a well-formed recipe: unparsable output is replaced by
    /// deterministic fallback synthesis, never surfaced as an error.
    pub async fn generate_recipe(&self, request: RecipeRequest) -> RecipeResponse {
        info!(
            ingredients = request.ingredients.len(),
            cuisine = request.cuisine_type.as_deref().unwrap_or("-"),
            "dispatching recipe request"
        );

        if request.ingredients.is_empty() {
            return recipe_failure("ingredients must not be empty".to_string());
        }

        let agent = match self.registry.get_or_create(AgentKind::Recipe).await {
            Ok(agent) => agent,
            Err(e) => {
                error!(error = %e, "recipe dispatch failed");
                return recipe_failure(e.to_string());
            }
        };

        let prompt = recipe_prompt(&request);
        let result = agent.execute(&prompt, false).await;

        if result.success {
            RecipeResponse {
                success: true,
                recipe: extract_recipe(&result.content, &request),
                error: None,
            }
        } else {
            // Agent-level failure: the extraction fallback does not apply
            recipe_failure(
                result.error.unwrap_or_else(|| "agent execution failed".to_string()),
            )
        }
    }

    /// Capability lists of the chat and search variants, read from fresh
    /// instances. Construction errors propagate so the transport can answer
    /// with a protocol-level error.
    pub fn capabilities(&self) -> Result<CapabilitiesResponse, AgentError> {
        Ok(CapabilitiesResponse {
            success: true,
            capabilities: AgentCapabilities {
                search_agent: self.registry.capabilities_of(AgentKind::Search)?,
                chat_agent: self.registry.capabilities_of(AgentKind::Chat)?,
            },
        })
    }
}

fn search_failure(query: String, error: String) -> SearchResponse {
    SearchResponse {
        success: false,
        query,
        summary: String::new(),
        search_results: None,
        sources_count: 0,
        error: Some(error),
    }
}

fn recipe_failure(error: String) -> RecipeResponse {
    RecipeResponse {
        success: false,
        recipe: Value::Object(serde_json::Map::new()),
        error: Some(error),
    }
}
