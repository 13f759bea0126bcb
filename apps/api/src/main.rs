mod config;
mod errors;
mod extract;
mod llm_client;
mod mentor;
mod models;
mod roadmap;
mod routes;
mod session;
mod state;
mod views;

#[cfg(test)]
mod test_support;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::llm_client::LlmClient;
use crate::mentor::GeminiMentorService;
use crate::roadmap::GeminiRoadmapService;
use crate::routes::build_router;
use crate::session::store::SessionStore;
use crate::state::AppState;

const SESSION_SWEEP_INTERVAL: Duration = Duration::from_secs(60);

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting EngiPath API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize LLM client
    let llm = LlmClient::new(config.api_key.clone(), config.gemini_model.clone())?;
    info!("LLM client initialized (model: {})", llm.model());
    if !llm.has_api_key() {
        warn!("API_KEY is not set; roadmap requests will fail until it is configured");
    }

    let sessions = SessionStore::new();
    sessions.spawn_sweeper(config.session_idle_ttl, SESSION_SWEEP_INTERVAL);
    info!(
        "Idle sessions expire after {}s",
        config.session_idle_ttl.as_secs()
    );

    let state = AppState {
        sessions,
        roadmap_service: Arc::new(GeminiRoadmapService::new(llm.clone())),
        mentor_service: Arc::new(GeminiMentorService::new(llm)),
        config: config.clone(),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict to the front-end origin once it has a fixed deploy URL

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
