use axum::{
    async_trait,
    extract::FromRequestParts,
    http::request::Parts,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use std::convert::Infallible;
use uuid::Uuid;

use crate::session::{SessionHandle, SESSION_COOKIE};
use crate::state::AppState;

/// The caller's session, resolved from the session cookie. A missing or
/// unknown cookie yields a fresh session.
pub struct CurrentSession {
    pub id: Uuid,
    pub state: SessionHandle,
    secure: bool,
}

impl CurrentSession {
    /// Cookie jar that (re)issues the session cookie.
    pub fn jar(&self) -> CookieJar {
        let cookie = Cookie::build((SESSION_COOKIE, self.id.to_string()))
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax)
            .secure(self.secure);
        CookieJar::new().add(cookie)
    }

    /// Post/redirect/get: every action ends with a 303 back to `/`.
    pub fn redirect_home(&self) -> Response {
        (self.jar(), Redirect::to("/")).into_response()
    }
}

#[async_trait]
impl FromRequestParts<AppState> for CurrentSession {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);
        let requested = jar
            .get(SESSION_COOKIE)
            .and_then(|c| Uuid::parse_str(c.value()).ok());
        let (id, handle) = state.sessions.resolve(requested).await;
        Ok(Self {
            id,
            state: handle,
            secure: state.config.cookie_secure,
        })
    }
}
