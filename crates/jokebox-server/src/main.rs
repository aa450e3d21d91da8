//! SSE joke server binary.
//!
//! Wires the upstream HTTP client, category cache, tool registry, and
//! session registry together and serves the streaming endpoint.

mod config;

use std::{net::SocketAddr, sync::Arc};

use anyhow::Context;
use jokebox_core::CategoryCache;
use jokebox_session::SessionRegistry;
use jokebox_tools::{Categories, DadJoke, JokeByCategory, RandomJoke, ToolRegistry, YoMamaJoke};
use jokebox_transport::{AppState, router};
use jokebox_upstream::JokeApiClient;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .init();

    let config = Config::from_env()?;

    let upstream = Arc::new(JokeApiClient::new());
    let cache = Arc::new(CategoryCache::new(Arc::clone(&upstream)));
    let tools = Arc::new(
        ToolRegistry::new()
            .register(Arc::new(RandomJoke::new(Arc::clone(&upstream))))
            .register(Arc::new(JokeByCategory::new(Arc::clone(&upstream), cache)))
            .register(Arc::new(Categories::new(Arc::clone(&upstream))))
            .register(Arc::new(DadJoke::new(Arc::clone(&upstream))))
            .register(Arc::new(YoMamaJoke::new(Arc::clone(&upstream)))),
    );
    for tool in tools.descriptors() {
        tracing::info!(name = tool.name, "registered tool");
    }

    let state = AppState::new(Arc::new(SessionRegistry::new()), tools);
    let app = router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("listening on http://{addr}");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    axum::serve(listener, app).await?;

    Ok(())
}
