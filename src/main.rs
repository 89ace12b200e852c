use souschef::agents::{AgentConfig, AgentRegistry};
use souschef::api::{Dispatcher, StatusStore};
use souschef::http::{HttpConfig, HttpServer};
use std::sync::Arc;
use tokio::signal;
use tracing::{error, info, Level};
use tracing_subscriber::fmt;

/// Tokio runtime with signal handling
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    fmt()
        .with_max_level(Level::INFO)
        .with_target(true)
        .init();

    info!("Starting souschef...");

    // Initialize config
    let agent_config = AgentConfig::from_env()?;
    let http_config = HttpConfig::from_env();

    info!(
        http_port = http_config.listen_port,
        model = %agent_config.engine.model,
        search_tool = agent_config.search_endpoint.is_some(),
        "Configuration loaded"
    );

    // Agents are constructed lazily on first use
    let registry = Arc::new(AgentRegistry::new(agent_config));
    let dispatcher = Arc::new(Dispatcher::new(Arc::clone(&registry)));
    let status = Arc::new(StatusStore::new());

    let server = HttpServer::bind(http_config, dispatcher, status).await?;
    info!(addr = %server.local_addr()?, "HTTP server initialized");

    let server_handle = tokio::spawn(async move {
        if let Err(e) = server.run().await {
            error!(error = %e, "HTTP server error");
        }
    });

    info!("souschef ready");

    signal::ctrl_c().await.ok();
    info!("Received shutdown signal");

    // Release any held tool connections before exit
    registry.shutdown().await;
    server_handle.abort();

    info!("Goodbye!");
    Ok(())
}
