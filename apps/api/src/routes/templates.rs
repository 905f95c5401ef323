use axum::{
    extract::{Path, State},
    response::{Html, IntoResponse, Response},
};

use crate::errors::AppError;
use crate::models::TemplateKind;
use crate::render::TEMPLATE_NOT_FOUND;
use crate::routes::session::CurrentSession;
use crate::session::{Notice, View};
use crate::state::AppState;

/// POST /templates/select/:kind
pub async fn select(session: CurrentSession, Path(kind): Path<String>) -> Response {
    let mut state = session.state.lock().await;
    match TemplateKind::from_key(&kind) {
        Some(kind) => state.select_template(kind),
        None => {
            state.navigate(View::Templates);
            state.post_notice(Notice::warning("Template not found"));
        }
    }
    drop(state);
    session.redirect_home()
}

/// GET /templates/preview
/// The selected layout as a standalone document.
pub async fn preview_selected(
    State(app): State<AppState>,
    session: CurrentSession,
) -> Result<Response, AppError> {
    let state = session.state.lock().await;
    let html = match state.selected_template() {
        Some(kind) => app.renderer.render_layout(kind, state.resume_analysis())?,
        None => TEMPLATE_NOT_FOUND.to_string(),
    };
    Ok((session.jar(), Html(html)).into_response())
}

/// GET /templates/preview/:kind
pub async fn preview(
    State(app): State<AppState>,
    session: CurrentSession,
    Path(kind): Path<String>,
) -> Result<Response, AppError> {
    let state = session.state.lock().await;
    let html = app.renderer.render_layout_key(&kind, state.resume_analysis())?;
    Ok((session.jar(), Html(html)).into_response())
}
