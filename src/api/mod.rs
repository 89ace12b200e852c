// API module - agent dispatch and response normalization

pub mod dispatch;
pub mod extract;
pub mod prompt;
pub mod status;
pub mod types;

pub use dispatch::Dispatcher;
pub use extract::{extract_recipe, fallback_recipe, REQUIRED_RECIPE_FIELDS};
pub use prompt::{recipe_prompt, search_prompt};
pub use status::{StatusCheck, StatusCheckCreate, StatusStore};
pub use types::{
    AgentCapabilities, CapabilitiesResponse, ChatRequest, ChatResponse, Nutrition, RecipeIngredient,
    RecipeRecord, RecipeRequest, RecipeResponse, RecipeStep, SearchRequest, SearchResponse,
};
