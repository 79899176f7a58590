//! Router assembly and server startup.

use std::sync::Arc;

use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::agent::Agent;
use crate::cache::InMemoryKvStore;
use crate::config::Config;
use crate::llm::GeminiClient;
use crate::repomix::RepomixClient;

use super::types::HealthResponse;

/// Shared state for all API handlers.
pub struct AppState {
    pub config: Config,
    pub agent: Agent,
}

impl AppState {
    /// Wire up the production collaborators from configuration.
    pub fn from_config(config: Config) -> Self {
        let agent = Agent::new(
            config.clone(),
            Arc::new(InMemoryKvStore::new()),
            Arc::new(RepomixClient::new(config.repomix_api_url.clone())),
            Arc::new(GeminiClient::new(config.api_key.clone())),
        );
        Self { config, agent }
    }
}

/// Build the API router.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(super::agent::welcome))
        .route("/health", get(health))
        .route("/agent", post(super::agent::handle_task))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Bind and serve the API until shutdown.
pub async fn serve(config: Config) -> anyhow::Result<()> {
    let addr = format!("{}:{}", config.host, config.port);
    let state = Arc::new(AppState::from_config(config));

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, router(state)).await?;

    Ok(())
}

/// GET /health
async fn health(State(_state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
