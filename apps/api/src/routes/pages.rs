use axum::{
    extract::{Path, State},
    response::{Html, IntoResponse, Response},
};

use crate::errors::AppError;
use crate::routes::session::CurrentSession;
use crate::session::{UnknownView, View};
use crate::state::AppState;

/// GET /
/// Renders the current screen and consumes the pending notice.
pub async fn index(
    State(app): State<AppState>,
    session: CurrentSession,
) -> Result<Response, AppError> {
    let mut state = session.state.lock().await;
    let notice = state.take_notice();
    let html = app.renderer.render_page(&state, notice.as_ref())?;
    Ok((session.jar(), Html(html)).into_response())
}

/// POST /navigate/:view
pub async fn navigate(
    session: CurrentSession,
    Path(view): Path<String>,
) -> Result<Response, AppError> {
    let view: View = view
        .parse()
        .map_err(|UnknownView(v)| AppError::NotFound(format!("Unknown view '{v}'")))?;
    session.state.lock().await.navigate(view);
    Ok(session.redirect_home())
}
