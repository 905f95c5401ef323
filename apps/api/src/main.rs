mod config;
mod errors;
mod gateway;
mod llm_client;
mod models;
mod normalizer;
mod render;
mod routes;
mod session;
mod state;

use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::gateway::ResumeGateway;
use crate::llm_client::GeminiClient;
use crate::render::Renderer;
use crate::routes::build_router;
use crate::session::SessionStore;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={}",
                env!("CARGO_PKG_NAME").replace('-', "_"),
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting resume assistant v{}", env!("CARGO_PKG_VERSION"));

    // Initialize LLM client
    let client = GeminiClient::new(
        config.gemini_api_key.clone(),
        config.gemini_base_url.as_deref(),
    )
    .context("failed to build Gemini client")?;
    info!("LLM client initialized (model: {})", llm_client::MODEL);

    // Compile page and layout templates
    let renderer = Renderer::new().context("failed to compile templates")?;

    let sessions = SessionStore::new(chrono::Duration::minutes(config.session_idle_minutes));
    info!(
        "Sessions expire after {} idle minutes; uploads limited to {} MB",
        config.session_idle_minutes, config.max_upload_mb
    );

    // Build app state
    let state = AppState {
        gateway: ResumeGateway::new(Arc::new(client)),
        sessions: Arc::new(sessions),
        renderer: Arc::new(renderer),
        config: config.clone(),
    };

    // Build router
    let app = build_router(state).layer(TraceLayer::new_for_http());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
