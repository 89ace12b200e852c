// Web-search-augmented agent with a bounded tool loop

use super::config::AgentConfig;
use super::error::AgentError;
use super::tools::WebSearchClient;
use super::types::{completion_metadata, Agent, AgentKind, AgentResult};
use crate::engine::{ChatMessage, ContentBlock, Engine, RequestBuilder, Role, StopReason};
use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use tracing::{debug, info, warn};

const SYSTEM_PROMPT: &str = "You are a research assistant with access to a \
    web_search tool. Use it to ground your answers in current information, \
    then summarize what you found. Cite the sources you relied on.";

/// Search agent. With tools enabled it loops over model tool calls against
/// the web search backend, bounded by `max_tool_rounds`.
pub struct SearchAgent {
    engine: Engine,
    search: Option<WebSearchClient>,
    max_tool_rounds: u32,
}

impl SearchAgent {
    pub fn new(config: &AgentConfig) -> Result<Self, AgentError> {
        let init_err = |source| AgentError::Init {
            kind: "search",
            source,
        };

        let engine = Engine::new(config.engine.clone()).map_err(init_err)?;

        let search = match &config.search_endpoint {
            Some(endpoint) => Some(
                WebSearchClient::new(endpoint, config.search_api_key.clone())
                    .map_err(|e| init_err(e.into()))?,
            ),
            None => {
                debug!("no search endpoint configured, search tool disabled");
                None
            }
        };

        Ok(Self {
            engine,
            search,
            max_tool_rounds: config.max_tool_rounds,
        })
    }

    async fn execute_plain(&self, prompt: &str) -> AgentResult {
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
            Ok(response) => {
                let mut metadata = completion_metadata(&response);
                metadata.insert("tools_used".to_string(), 0u64.into());
                AgentResult::ok(response.text(), metadata)
            }
            Err(e) => {
                warn!(error = %e, "search agent execution failed");
                AgentResult::failed(e.to_string())
            }
        }
    }

    async fn execute_with_tools(&self, prompt: &str, client: &WebSearchClient) -> AgentResult {
        let tool_defs = vec![WebSearchClient::definition()];
        let mut messages = vec![ChatMessage::user_text(prompt)];
        let mut tools_used: u64 = 0;
        let mut rounds = 0;

        loop {
            rounds += 1;
            if rounds > self.max_tool_rounds {
                warn!(rounds = rounds, "max tool rounds reached, stopping");
                let mut metadata = HashMap::new();
                metadata.insert("tools_used".to_string(), tools_used.into());
                return AgentResult::ok(
                    "Maximum tool call rounds reached. Partial results only.",
                    metadata,
                );
            }

            debug!(round = rounds, "search inference round");

            let request = match RequestBuilder::new(self.engine.model())
                .system(SYSTEM_PROMPT)
                .messages(messages.clone())
                .tools(tool_defs.clone())
                .max_tokens(self.engine.max_output_tokens())
                .temperature(self.engine.temperature())
                .build()
            {
                Ok(request) => request,
                Err(e) => return AgentResult::failed(e.to_string()),
            };

            let response = match self.engine.complete(request).await {
                Ok(response) => response,
                Err(e) => {
                    warn!(error = %e, round = rounds, "search agent execution failed");
                    return AgentResult::failed(e.to_string());
                }
            };

            match response.stop_reason {
                Some(StopReason::ToolUse) => {
                    let calls = response.tool_uses();
                    messages.push(ChatMessage::assistant_blocks(response.content.clone()));

                    for (id, name, input) in calls {
                        if name != "web_search" {
                            warn!(tool = %name, "model requested unknown tool");
                            messages.push(tool_result(id, format!("Unknown tool: {}", name), true));
                            continue;
                        }

                        let query = input
                            .get("query")
                            .and_then(Value::as_str)
                            .unwrap_or(prompt);

                        info!(query = %query, "executing web search");
                        match client.search(query).await {
                            Ok(results) => {
                                tools_used += 1;
                                messages.push(tool_result(id, results, false));
                            }
                            Err(e) => {
                                warn!(error = %e, "web search failed");
                                messages.push(tool_result(id, format!("Error: {}", e), true));
                            }
                        }
                    }
                }
                _ => {
                    let mut metadata = completion_metadata(&response);
                    metadata.insert("tools_used".to_string(), tools_used.into());
                    return AgentResult::ok(response.text(), metadata);
                }
            }
        }
    }
}

fn tool_result(tool_use_id: String, content: String, is_error: bool) -> ChatMessage {
    ChatMessage {
        role: Role::User,
        content: vec![ContentBlock::ToolResult {
            tool_use_id,
            content,
            is_error: Some(is_error),
        }],
    }
}

#[async_trait]
impl Agent for SearchAgent {
    fn kind(&self) -> AgentKind {
        AgentKind::Search
    }

    fn capabilities(&self) -> Vec<String> {
        ["web_search", "summarization", "source_tracking"]
            .iter()
            .map(|s| s.to_string())
            .collect()
    }

    async fn execute(&self, prompt: &str, use_tools: bool) -> AgentResult {
        debug!(
            prompt_len = prompt.len(),
            use_tools = use_tools,
            "search agent executing"
        );

        match (&self.search, use_tools) {
            (Some(client), true) => self.execute_with_tools(prompt, client).await,
            _ => self.execute_plain(prompt).await,
        }
    }

    async fn close(&self) {
        if let Some(client) = &self.search {
            client.close();
        }
    }
}
