// Agents module - specialized agent variants and their registry

pub mod chat;
pub mod config;
pub mod error;
pub mod recipe;
pub mod registry;
pub mod search;
pub mod tools;
pub mod types;

pub use chat::ChatAgent;
pub use config::AgentConfig;
pub use error::{AgentError, ToolError};
pub use recipe::RecipeAgent;
pub use registry::AgentRegistry;
pub use search::SearchAgent;
pub use tools::WebSearchClient;
pub use types::{Agent, AgentKind, AgentResult};
