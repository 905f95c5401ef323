use axum::{
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use uuid::Uuid;

use crate::routes::session::CurrentSession;
use crate::session::SessionState;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSnapshot {
    pub session_id: Uuid,
    pub state: SessionState,
}

/// GET /api/session
/// JSON snapshot of the caller's session. Does not consume the pending notice.
pub async fn session_snapshot(session: CurrentSession) -> Response {
    let state = session.state.lock().await.clone();
    let snapshot = SessionSnapshot {
        session_id: session.id,
        state,
    };
    (session.jar(), Json(snapshot)).into_response()
}
