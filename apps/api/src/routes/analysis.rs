use axum::{
    extract::{multipart::MultipartError, Multipart, State},
    http::StatusCode,
    response::Response,
    Form,
};
use tracing::warn;

use crate::models::{ProfileEdit, ResumeFile, ResumeMime};
use crate::routes::session::CurrentSession;
use crate::session::{Notice, View};
use crate::state::AppState;

const RESUME_FIELD: &str = "resume";

/// POST /analysis/analyze
/// Multipart upload, field `resume`. Rejected uploads never reach the gateway.
pub async fn analyze(
    State(app): State<AppState>,
    session: CurrentSession,
    multipart: Multipart,
) -> Response {
    let upload = read_resume(multipart, app.config.max_upload_mb).await;

    let mut state = session.state.lock().await;
    match upload {
        Ok(file) => state.analyze(&app.gateway, file).await,
        Err(message) => {
            warn!("Rejected resume upload: {message}");
            state.navigate(View::Analysis);
            state.post_notice(Notice::error(message));
        }
    }
    session.redirect_home()
}

/// Pulls the `resume` field out of the form and checks its type.
async fn read_resume(mut multipart: Multipart, max_upload_mb: usize) -> Result<ResumeFile, String> {
    let upload_error = |e: MultipartError| {
        if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
            format!("The file is too large. The limit is {max_upload_mb} MB.")
        } else {
            format!("The upload could not be read: {}", e.body_text())
        }
    };

    while let Some(field) = multipart.next_field().await.map_err(upload_error)? {
        if field.name() != Some(RESUME_FIELD) {
            continue;
        }
        let file_name = field.file_name().map(str::to_string);
        let content_type = field.content_type().map(str::to_string);
        let bytes = field.bytes().await.map_err(upload_error)?;

        if bytes.is_empty() {
            return Err("Please choose a resume file to analyze.".to_string());
        }
        let mime = ResumeMime::detect(content_type.as_deref(), file_name.as_deref())
            .ok_or_else(|| "Unsupported file type. Upload a PDF, PNG or JPEG.".to_string())?;
        return Ok(ResumeFile {
            bytes,
            mime,
            file_name,
        });
    }
    Err("Please choose a resume file to analyze.".to_string())
}

/// POST /analysis/reset
pub async fn reset(session: CurrentSession) -> Response {
    session.state.lock().await.reset_resume();
    session.redirect_home()
}

/// POST /analysis/profile
pub async fn edit_profile(session: CurrentSession, Form(edit): Form<ProfileEdit>) -> Response {
    session.state.lock().await.edit_profile(edit);
    session.redirect_home()
}

/// POST /analysis/improvements
pub async fn generate_improvements(State(app): State<AppState>, session: CurrentSession) -> Response {
    session
        .state
        .lock()
        .await
        .generate_improvements(&app.gateway)
        .await;
    session.redirect_home()
}
