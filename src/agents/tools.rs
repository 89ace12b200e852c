// Web search tool client used by SearchAgent

use super::error::ToolError;
use crate::engine::ToolDefinition;
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, info};

const SEARCH_TIMEOUT_SECS: u64 = 30;
const DEFAULT_RESULT_COUNT: u32 = 5;

#[derive(Debug, Serialize)]
struct SearchQuery<'a> {
    query: &'a str,
    count: u32,
}

/// HTTP client for the web search backend
#[derive(Debug, Clone)]
pub struct WebSearchClient {
    client: Client,
    endpoint: String,
    api_key: Option<String>,
}

impl WebSearchClient {
    pub fn new(endpoint: impl Into<String>, api_key: Option<String>) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(Duration::from_secs(SEARCH_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
            api_key,
        })
    }

    /// Tool definition advertised to the model
    pub fn definition() -> ToolDefinition {
        ToolDefinition {
            name: "web_search".to_string(),
            description: "Search the web for current information. \
                          Input a search query, receive a list of results."
                .to_string(),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {
                    "query": {
                        "type": "string",
                        "description": "The search query"
                    }
                },
                "required": ["query"]
            }),
        }
    }

    /// Run a search and format the results as model-readable text
    pub async fn search(&self, query: &str) -> Result<String, ToolError> {
        debug!(query = %query, "running web search");

        let mut request = self.client.post(&self.endpoint).json(&SearchQuery {
            query,
            count: DEFAULT_RESULT_COUNT,
        });
        if let Some(key) = &self.api_key {
            request = request.header("Authorization", format!("Bearer {}", key));
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ToolError::Status(status.as_u16()));
        }

        let body: Value = response.json().await?;
        Ok(format_results(&body))
    }

    /// Release the connection pool held for the search backend
    pub fn close(&self) {
        info!(endpoint = %self.endpoint, "releasing web search client");
    }
}

/// Flatten a search backend response into numbered text lines. Unknown
/// response shapes degrade to the raw JSON body.
fn format_results(body: &Value) -> String {
    let results = match body.get("results").and_then(Value::as_array) {
        Some(results) if !results.is_empty() => results,
        _ => return body.to_string(),
    };

    results
        .iter()
        .enumerate()
        .map(|(i, result)| {
            let title = result.get("title").and_then(Value::as_str).unwrap_or("");
            let url = result.get("url").and_then(Value::as_str).unwrap_or("");
            let snippet = result.get("snippet").and_then(Value::as_str).unwrap_or("");
            format!("{}. {} ({})\n{}", i + 1, title, url, snippet)
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}
