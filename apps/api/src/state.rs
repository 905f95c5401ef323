use std::sync::Arc;

use crate::config::Config;
use crate::gateway::ResumeGateway;
use crate::render::Renderer;
use crate::session::SessionStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub gateway: ResumeGateway,
    pub sessions: Arc<SessionStore>,
    pub renderer: Arc<Renderer>,
    pub config: Config,
}
