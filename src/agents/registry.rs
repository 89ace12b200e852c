// Agent registry - lazy, memoized construction of each agent variant

use super::chat::ChatAgent;
use super::config::AgentConfig;
use super::error::AgentError;
use super::recipe::RecipeAgent;
use super::search::SearchAgent;
use super::types::{Agent, AgentKind};
use std::sync::Arc;
use tokio::sync::OnceCell;
use tracing::{debug, info};

/// One memoization slot per agent variant. Slots are create-once: concurrent
/// first use of the same variant constructs exactly one instance, which then
/// lives for the process lifetime.
pub struct AgentRegistry {
    config: AgentConfig,
    chat: OnceCell<Arc<dyn Agent>>,
    search: OnceCell<Arc<dyn Agent>>,
    recipe: OnceCell<Arc<dyn Agent>>,
}

impl AgentRegistry {
    pub fn new(config: AgentConfig) -> Self {
        Self {
            config,
            chat: OnceCell::new(),
            search: OnceCell::new(),
            recipe: OnceCell::new(),
        }
    }

    /// Build a registry with pre-constructed agents. Used by tests and by
    /// callers that wire their own agent implementations.
    pub fn with_agents(
        config: AgentConfig,
        chat: Arc<dyn Agent>,
        search: Arc<dyn Agent>,
        recipe: Arc<dyn Agent>,
    ) -> Self {
        Self {
            config,
            chat: OnceCell::new_with(Some(chat)),
            search: OnceCell::new_with(Some(search)),
            recipe: OnceCell::new_with(Some(recipe)),
        }
    }

    /// Return the memoized agent for a variant, constructing it on first use
    pub async fn get_or_create(&self, kind: AgentKind) -> Result<Arc<dyn Agent>, AgentError> {
        let slot = match kind {
            AgentKind::Chat => &self.chat,
            AgentKind::Search => &self.search,
            AgentKind::Recipe => &self.recipe,
        };

        slot.get_or_try_init(|| async {
            info!(kind = %kind, "constructing agent");
            let agent: Arc<dyn Agent> = match kind {
                AgentKind::Chat => Arc::new(ChatAgent::new(&self.config)?),
                AgentKind::Search => Arc::new(SearchAgent::new(&self.config)?),
                AgentKind::Recipe => Arc::new(RecipeAgent::new(&self.config)?),
            };
            Ok(agent)
        })
        .await
        .cloned()
    }

    /// Capability list for a variant, read from a throwaway instance.
    /// Capability lists are static per variant, so this is independent of
    /// the memoized slots (mirrors the capability-listing endpoint, which
    /// constructs fresh agents).
    pub fn capabilities_of(&self, kind: AgentKind) -> Result<Vec<String>, AgentError> {
        let agent: Box<dyn Agent> = match kind {
            AgentKind::Chat => Box::new(ChatAgent::new(&self.config)?),
            AgentKind::Search => Box::new(SearchAgent::new(&self.config)?),
            AgentKind::Recipe => Box::new(RecipeAgent::new(&self.config)?),
        };
        Ok(agent.capabilities())
    }

    /// Release resources held by constructed agents before process exit
    pub async fn shutdown(&self) {
        info!("shutting down agent registry");
        let closes = [&self.chat, &self.search, &self.recipe]
            .into_iter()
            .filter_map(|slot| slot.get())
            .map(|agent| {
                debug!(kind = %agent.kind(), "closing agent");
                agent.close()
            });
        futures::future::join_all(closes).await;
    }
}
