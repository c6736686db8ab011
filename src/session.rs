use crate::app::AppState;
use crate::content::error::{ContentError, ContentErrorType};
use axum::extract::{FromRequestParts, Request, State};
use axum::middleware::Next;
use axum::response::Response;
use axum_extra::extract::CookieJar;
use axum_extra::extract::cookie::{Cookie, SameSite};
use http::request::Parts;
use log::debug;
use std::fmt;
use std::sync::Arc;
use uuid::Uuid;

/// Identifier of a client session, carried in a cookie
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SessionId(String);

impl SessionId {
    pub fn generate() -> Self {
        SessionId(Uuid::new_v4().simple().to_string())
    }

    /// Accepts only ids in the form `generate` produces
    pub fn parse(raw: &str) -> Option<Self> {
        Uuid::try_parse(raw)
            .ok()
            .map(|id| SessionId(id.simple().to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl<S: Send + Sync> FromRequestParts<S> for SessionId {
    type Rejection = ContentError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts.extensions.get::<SessionId>().cloned().ok_or_else(|| {
            ContentError::new(
                ContentErrorType::Session,
                Some("Session middleware is not installed".to_string()),
            )
        })
    }
}

/// Resolves session id from cookie, starting a new session if there is none
pub async fn session_middleware(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> (CookieJar, Response) {
    let cookie_name = state.config.session_cookie_name.as_str();
    let existing = jar
        .get(cookie_name)
        .and_then(|cookie| SessionId::parse(cookie.value()));

    let (session, jar) = match existing {
        Some(session) => (session, jar),
        None => {
            let session = SessionId::generate();
            debug!("Starting session {}", session);
            let cookie = Cookie::build((cookie_name.to_string(), session.to_string()))
                .path("/")
                .http_only(true)
                .same_site(SameSite::Lax);
            (session, jar.add(cookie))
        }
    };

    request.extensions_mut().insert(session);
    (jar, next.run(request).await)
}
