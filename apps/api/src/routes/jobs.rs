use axum::{extract::State, response::Response, Form};
use serde::Deserialize;

use crate::errors::AppError;
use crate::models::WorkMode;
use crate::routes::session::CurrentSession;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SearchForm {
    #[serde(default)]
    pub query: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub mode: String,
}

/// POST /jobs/search
pub async fn search(
    State(app): State<AppState>,
    session: CurrentSession,
    Form(form): Form<SearchForm>,
) -> Result<Response, AppError> {
    let mode = WorkMode::from_label(&form.mode)
        .ok_or_else(|| AppError::Validation(format!("Unknown job type '{}'", form.mode)))?;
    session
        .state
        .lock()
        .await
        .search_jobs(&app.gateway, &form.query, &form.location, mode)
        .await;
    Ok(session.redirect_home())
}

/// POST /jobs/edit-role
pub async fn edit_role(session: CurrentSession) -> Response {
    session.state.lock().await.edit_target_role();
    session.redirect_home()
}

/// POST /jobs/reanalyze
pub async fn reanalyze(session: CurrentSession) -> Response {
    session.state.lock().await.reanalyze();
    session.redirect_home()
}
