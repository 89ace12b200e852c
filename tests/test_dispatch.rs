// Integration tests for the Dispatcher over scripted agents
// Run with cargo test --test test_dispatch

use async_trait::async_trait;
use serde_json::{json, Value};
use souschef::agents::{Agent, AgentConfig, AgentKind, AgentRegistry, AgentResult};
use souschef::api::types::{ChatRequest, RecipeRequest, SearchRequest};
use souschef::api::Dispatcher;
use souschef::engine::EngineConfig;
use std::collections::HashMap;
use std::sync::Arc;

fn test_config() -> AgentConfig {
    AgentConfig {
        engine: EngineConfig {
            endpoint: "http://127.0.0.1:9".to_string(),
            api_key: "test-key".to_string(),
            model: "test-model".to_string(),
            max_retries: 0,
            base_retry_delay_ms: 1,
            request_timeout_secs: 1,
            max_output_tokens: 256,
            temperature: None,
        },
        search_endpoint: None,
        search_api_key: None,
        max_tool_rounds: 2,
    }
}

/// Agent that replies with a canned result
struct ScriptedAgent {
    kind: AgentKind,
    capabilities: Vec<String>,
    result: AgentResult,
}

impl ScriptedAgent {
    fn ok(kind: AgentKind, content: &str) -> Self {
        Self {
            kind,
            capabilities: vec![format!("{}_capability", kind)],
            result: AgentResult::ok(content, HashMap::new()),
        }
    }

    fn failed(kind: AgentKind, error: &str) -> Self {
        Self {
            kind,
            capabilities: vec![format!("{}_capability", kind)],
            result: AgentResult::failed(error),
        }
    }

    fn with_metadata(mut self, metadata: HashMap<String, Value>) -> Self {
        self.result.metadata = metadata;
        self
    }
}

#[async_trait]
impl Agent for ScriptedAgent {
    fn kind(&self) -> AgentKind {
        self.kind
    }

    fn capabilities(&self) -> Vec<String> {
        self.capabilities.clone()
    }

    async fn execute(&self, _prompt: &str, _use_tools: bool) -> AgentResult {
        self.result.clone()
    }
}

fn dispatcher(chat: ScriptedAgent, search: ScriptedAgent, recipe: ScriptedAgent) -> Dispatcher {
    let registry = AgentRegistry::with_agents(
        test_config(),
        Arc::new(chat),
        Arc::new(search),
        Arc::new(recipe),
    );
    Dispatcher::new(Arc::new(registry))
}

fn default_dispatcher() -> Dispatcher {
    dispatcher(
        ScriptedAgent::ok(AgentKind::Chat, "chat reply"),
        ScriptedAgent::ok(AgentKind::Search, "search reply"),
        ScriptedAgent::ok(AgentKind::Recipe, "recipe reply"),
    )
}

#[cfg(test)]
mod chat_tests {
    use super::*;

    /// Requests routed to the chat agent carry its reply and capabilities
    #[tokio::test]
    async fn test_chat_dispatch() {
        let response = default_dispatcher()
            .chat(ChatRequest {
                message: "hello".into(),
                agent_type: "chat".into(),
                context: None,
            })
            .await;

        assert!(response.success);
        assert_eq!(response.response, "chat reply");
        assert_eq!(response.agent_type, "chat");
        assert_eq!(response.capabilities, vec!["chat_capability"]);
        assert!(response.error.is_none());
    }

    /// agent_type "search" routes to the search agent
    #[tokio::test]
    async fn test_chat_routes_to_search() {
        let response = default_dispatcher()
            .chat(ChatRequest {
                message: "hello".into(),
                agent_type: "search".into(),
                context: None,
            })
            .await;

        assert_eq!(response.response, "search reply");
        assert_eq!(response.agent_type, "search");
    }

    /// Unrecognized agent types fall back to chat, and the response reports
    /// the resolved type
    #[tokio::test]
    async fn test_chat_unknown_type_falls_back() {
        let response = default_dispatcher()
            .chat(ChatRequest {
                message: "hello".into(),
                agent_type: "banana".into(),
                context: None,
            })
            .await;

        assert!(response.success);
        assert_eq!(response.agent_type, "chat");
        assert_eq!(response.response, "chat reply");
    }

    /// Agent execution failure surfaces in the body, not as a transport error
    #[tokio::test]
    async fn test_chat_agent_failure() {
        let d = dispatcher(
            ScriptedAgent::failed(AgentKind::Chat, "model unavailable"),
            ScriptedAgent::ok(AgentKind::Search, "unused"),
            ScriptedAgent::ok(AgentKind::Recipe, "unused"),
        );

        let response = d
            .chat(ChatRequest {
                message: "hello".into(),
                agent_type: "chat".into(),
                context: None,
            })
            .await;

        assert!(!response.success);
        assert_eq!(response.response, "");
        assert_eq!(response.error.as_deref(), Some("model unavailable"));
    }
}

#[cfg(test)]
mod search_tests {
    use super::*;

    /// Success reports summary, metadata and the tools_used count
    #[tokio::test]
    async fn test_search_success() {
        let mut metadata = HashMap::new();
        metadata.insert("tools_used".to_string(), json!(3));
        metadata.insert("model".to_string(), json!("test-model"));

        let d = dispatcher(
            ScriptedAgent::ok(AgentKind::Chat, "unused"),
            ScriptedAgent::ok(AgentKind::Search, "summary text").with_metadata(metadata),
            ScriptedAgent::ok(AgentKind::Recipe, "unused"),
        );

        let response = d
            .search(SearchRequest {
                query: "rust ownership".into(),
                max_results: 5,
            })
            .await;

        assert!(response.success);
        assert_eq!(response.query, "rust ownership");
        assert_eq!(response.summary, "summary text");
        assert_eq!(response.sources_count, 3);
        let results = response.search_results.unwrap();
        assert_eq!(results.get("tools_used"), Some(&json!(3)));
    }

    /// Missing tools_used metadata counts as zero sources
    #[tokio::test]
    async fn test_search_missing_tools_used() {
        let response = default_dispatcher()
            .search(SearchRequest {
                query: "anything".into(),
                max_results: 5,
            })
            .await;

        assert!(response.success);
        assert_eq!(response.sources_count, 0);
    }

    /// Agent failure: empty summary, zero sources, verbatim error
    #[tokio::test]
    async fn test_search_agent_failure() {
        let d = dispatcher(
            ScriptedAgent::ok(AgentKind::Chat, "unused"),
            ScriptedAgent::failed(AgentKind::Search, "rate limited"),
            ScriptedAgent::ok(AgentKind::Recipe, "unused"),
        );

        let response = d
            .search(SearchRequest {
                query: "rust ownership".into(),
                max_results: 5,
            })
            .await;

        assert!(!response.success);
        assert_eq!(response.summary, "");
        assert_eq!(response.sources_count, 0);
        assert!(response.search_results.is_none());
        assert_eq!(response.error.as_deref(), Some("rate limited"));
    }
}

#[cfg(test)]
mod recipe_tests {
    use super::*;

    fn recipe_request() -> RecipeRequest {
        RecipeRequest {
            ingredients: vec!["chicken".into(), "rice".into()],
            dietary_restrictions: vec![],
            cuisine_type: Some("thai".into()),
            meal_type: None,
            cooking_time: None,
        }
    }

    /// Well-formed agent output is extracted, not synthesized
    #[tokio::test]
    async fn test_recipe_extracted() {
        let content = r#"Here you go: {"name":"Thai Chicken Rice","description":"...","prep_time":"10m","cook_time":"20m","servings":"2","difficulty":"Easy","ingredients":[],"instructions":[]}"#;
        let d = dispatcher(
            ScriptedAgent::ok(AgentKind::Chat, "unused"),
            ScriptedAgent::ok(AgentKind::Search, "unused"),
            ScriptedAgent::ok(AgentKind::Recipe, content),
        );

        let response = d.generate_recipe(recipe_request()).await;

        assert!(response.success);
        assert_eq!(response.recipe["name"], "Thai Chicken Rice");
        assert!(response.error.is_none());
    }

    /// Uncooperative output is replaced by fallback synthesis, still a success
    #[tokio::test]
    async fn test_recipe_fallback() {
        let d = dispatcher(
            ScriptedAgent::ok(AgentKind::Chat, "unused"),
            ScriptedAgent::ok(AgentKind::Search, "unused"),
            ScriptedAgent::ok(AgentKind::Recipe, "I cannot help with that."),
        );

        let response = d.generate_recipe(recipe_request()).await;

        assert!(response.success);
        let name = response.recipe["name"].as_str().unwrap();
        assert!(name.starts_with("Thai"));
        assert!(name.contains("chicken"));
        assert!(name.contains("rice"));
        assert_eq!(response.recipe["instructions"].as_array().unwrap().len(), 5);
        assert_eq!(response.recipe["ingredients"].as_array().unwrap().len(), 2);
    }

    /// Agent-level failure bypasses the fallback entirely
    #[tokio::test]
    async fn test_recipe_agent_failure() {
        let d = dispatcher(
            ScriptedAgent::ok(AgentKind::Chat, "unused"),
            ScriptedAgent::ok(AgentKind::Search, "unused"),
            ScriptedAgent::failed(AgentKind::Recipe, "model down"),
        );

        let response = d.generate_recipe(recipe_request()).await;

        assert!(!response.success);
        assert_eq!(response.recipe, json!({}));
        assert_eq!(response.error.as_deref(), Some("model down"));
    }

    /// An empty ingredient list is rejected with a failure-shaped response
    #[tokio::test]
    async fn test_recipe_empty_ingredients() {
        let response = default_dispatcher()
            .generate_recipe(RecipeRequest {
                ingredients: vec![],
                dietary_restrictions: vec![],
                cuisine_type: None,
                meal_type: None,
                cooking_time: None,
            })
            .await;

        assert!(!response.success);
        assert_eq!(response.recipe, json!({}));
        assert!(response.error.is_some());
    }
}

#[cfg(test)]
mod registry_tests {
    use super::*;

    /// The registry memoizes one instance per variant
    #[tokio::test]
    async fn test_registry_memoizes() {
        let registry = AgentRegistry::new(test_config());

        let first = registry.get_or_create(AgentKind::Chat).await.unwrap();
        let second = registry.get_or_create(AgentKind::Chat).await.unwrap();
        assert!(Arc::ptr_eq(&first, &second));

        let search = registry.get_or_create(AgentKind::Search).await.unwrap();
        assert_eq!(search.kind(), AgentKind::Search);
    }

    /// Capability listing is idempotent and built from real agent variants
    #[tokio::test]
    async fn test_capabilities_idempotent() {
        let registry = Arc::new(AgentRegistry::new(test_config()));
        let d = Dispatcher::new(registry);

        let first = d.capabilities().unwrap();
        let second = d.capabilities().unwrap();

        assert!(first.success);
        assert!(!first.capabilities.chat_agent.is_empty());
        assert!(!first.capabilities.search_agent.is_empty());
        assert_eq!(first.capabilities.chat_agent, second.capabilities.chat_agent);
        assert_eq!(
            first.capabilities.search_agent,
            second.capabilities.search_agent
        );
    }
}
