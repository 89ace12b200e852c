// Request and response bodies for the agent-facing endpoints

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

fn default_agent_type() -> String {
    "chat".to_string()
}

fn default_max_results() -> u32 {
    5
}

/// POST /api/chat request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatRequest {
    pub message: String,
    /// "chat" or "search"; anything else dispatches as "chat"
    #[serde(default = "default_agent_type")]
    pub agent_type: String,
    #[serde(default)]
    pub context: Option<HashMap<String, Value>>,
}

/// POST /api/chat response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatResponse {
    pub success: bool,
    pub response: String,
    /// Resolved agent type, not necessarily the requested one
    pub agent_type: String,
    pub capabilities: Vec<String>,
    #[serde(default)]
    pub metadata: HashMap<String, Value>,
    #[serde(default)]
    pub error: Option<String>,
}

/// POST /api/search request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchRequest {
    pub query: String,
    /// Part of the contract; not consumed downstream
    #[serde(default = "default_max_results")]
    pub max_results: u32,
}

/// POST /api/search response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResponse {
    pub success: bool,
    pub query: String,
    pub summary: String,
    #[serde(default)]
    pub search_results: Option<HashMap<String, Value>>,
    pub sources_count: u64,
    #[serde(default)]
    pub error: Option<String>,
}

/// POST /api/recipes/generate request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecipeRequest {
    pub ingredients: Vec<String>,
    #[serde(default)]
    pub dietary_restrictions: Vec<String>,
    #[serde(default)]
    pub cuisine_type: Option<String>,
    #[serde(default)]
    pub meal_type: Option<String>,
    #[serde(default)]
    pub cooking_time: Option<String>,
}

/// POST /api/recipes/generate response. The recipe travels as raw JSON:
/// extraction validates key presence only, never value shapes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecipeResponse {
    pub success: bool,
    pub recipe: Value,
    #[serde(default)]
    pub error: Option<String>,
}

/// GET /api/agents/capabilities response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CapabilitiesResponse {
    pub success: bool,
    pub capabilities: AgentCapabilities,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentCapabilities {
    pub search_agent: Vec<String>,
    pub chat_agent: Vec<String>,
}

/// Structured recipe record. Used by fallback synthesis; agent-extracted
/// recipes are kept as raw JSON to preserve the lenient presence-only
/// validation contract.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecipeRecord {
    pub name: String,
    pub description: String,
    pub prep_time: String,
    pub cook_time: String,
    pub servings: String,
    pub difficulty: String,
    pub ingredients: Vec<RecipeIngredient>,
    pub instructions: Vec<RecipeStep>,
    pub tips: Vec<String>,
    pub nutrition: Nutrition,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecipeIngredient {
    pub item: String,
    pub amount: String,
    pub unit: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecipeStep {
    pub step: u32,
    pub instruction: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Nutrition {
    pub calories: String,
    pub protein: String,
    pub carbs: String,
    pub fat: String,
}
