pub mod analysis;
pub mod api;
pub mod health;
pub mod jobs;
pub mod pages;
pub mod session;
pub mod templates;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::state::AppState;

/// Multipart framing around the file itself.
const MULTIPART_OVERHEAD: usize = 64 * 1024;

pub fn build_router(state: AppState) -> Router {
    let upload_limit = state.config.max_upload_bytes() + MULTIPART_OVERHEAD;

    Router::new()
        .route("/", get(pages::index))
        .route("/health", get(health::health_handler))
        .route("/navigate/:view", post(pages::navigate))
        // Analysis screen
        .route(
            "/analysis/analyze",
            post(analysis::analyze).layer(DefaultBodyLimit::max(upload_limit)),
        )
        .route("/analysis/reset", post(analysis::reset))
        .route("/analysis/profile", post(analysis::edit_profile))
        .route(
            "/analysis/improvements",
            post(analysis::generate_improvements),
        )
        // Templates screen
        .route("/templates/select/:kind", post(templates::select))
        .route("/templates/preview", get(templates::preview_selected))
        .route("/templates/preview/:kind", get(templates::preview))
        // Jobs screen
        .route("/jobs/search", post(jobs::search))
        .route("/jobs/edit-role", post(jobs::edit_role))
        .route("/jobs/reanalyze", post(jobs::reanalyze))
        .route("/api/session", get(api::session_snapshot))
        .with_state(state)
}
