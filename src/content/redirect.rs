use crate::content::error::{ContentError, ContentErrorType};
use crate::content::filename::clean;
use crate::content::flow::{Complete, Flow};
use crate::request::{InboundRequest, RequestParams};
use crate::routing::{ACTION_ROUTE_PARAM, CULTURE_ROUTE_PARAM, MODULE_ROUTE_PARAM, RoutePattern};
use crate::session::SessionId;
use crate::store::session_store::SessionStore;
use http::Method;
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::instrument;

/// Session namespace of the set filename flow
pub const NS_SET_FILENAME: &str = "mentha/content/set_filename";

/// Request stashed between the redirect and its replay
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PendingRedirectState {
    pub redirected: Option<bool>,
    pub request_method: Option<String>,
    pub request_params: Option<RequestParams>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RedirectPhase {
    Idle,
    /// Redirect sent, waiting for the browser to follow it
    PendingRedirect,
    /// Replay forwarded to the original action, until it sets filename again
    Replaying,
}

impl PendingRedirectState {
    pub fn phase(&self) -> RedirectPhase {
        match self.redirected {
            None => RedirectPhase::Idle,
            Some(false) => RedirectPhase::PendingRedirect,
            Some(true) => RedirectPhase::Replaying,
        }
    }
}

/// Makes the browser show a chosen filename for content of any action
///
/// The action calls [`FilenameRedirector::set_filename`], which stashes the
/// request and redirects to the set filename route with the filename as last
/// path segment. That route calls [`FilenameRedirector::replay`] and forwards to
/// the original action, whose second `set_filename` call lets it go on.
pub struct FilenameRedirector {
    sessions: Arc<dyn SessionStore + Send + Sync>,
    custom_route: Option<RoutePattern>,
    default_route: RoutePattern,
}

impl FilenameRedirector {
    pub fn new(
        sessions: Arc<dyn SessionStore + Send + Sync>,
        custom_route: Option<RoutePattern>,
    ) -> Self {
        FilenameRedirector {
            sessions,
            custom_route,
            default_route: RoutePattern::default(),
        }
    }

    /// Pattern of the set filename route, without the filename segment
    pub fn route_pattern(&self) -> &RoutePattern {
        self.custom_route.as_ref().unwrap_or(&self.default_route)
    }

    async fn load_state(&self, session: &SessionId) -> Result<PendingRedirectState, ContentError> {
        let Some(raw) = self.sessions.get(session, NS_SET_FILENAME).await? else {
            return Ok(PendingRedirectState::default());
        };
        match postcard::from_bytes(&raw) {
            Ok(state) => Ok(state),
            Err(err) => {
                warn!(
                    "Dropping unreadable redirect state of session {}: {}",
                    session, err
                );
                Ok(PendingRedirectState::default())
            }
        }
    }

    async fn save_state(
        &self,
        session: &SessionId,
        state: &PendingRedirectState,
    ) -> Result<(), ContentError> {
        let raw = postcard::to_stdvec(state).map_err(|err| {
            ContentError::new(ContentErrorType::Serialization, Some(err.to_string()))
        })?;
        self.sessions.set(session, NS_SET_FILENAME, raw).await
    }

    pub async fn phase(&self, session: &SessionId) -> Result<RedirectPhase, ContentError> {
        Ok(self.load_state(session).await?.phase())
    }

    /// Sets filename shown to the client.
    ///
    /// Gives [`Flow::Complete`] with a redirect the first time, and
    /// [`Flow::Continue`] once called again from the replayed request.
    ///
    /// `route_params` fill the custom set filename route. Without a custom
    /// route they are ignored and the current module and action are used.
    /// Either way only `sf_culture` may come from the current request.
    #[instrument(skip(self, request, route_params), fields(session = %session))]
    pub async fn set_filename(
        &self,
        session: &SessionId,
        request: &InboundRequest,
        filename: &str,
        route_params: Option<RequestParams>,
    ) -> Result<Flow, ContentError> {
        let state = self.load_state(session).await?;
        match state.phase() {
            RedirectPhase::Replaying => {
                debug!("Filename already set, returning to caller action");
                self.sessions.remove(session, NS_SET_FILENAME).await?;
                return Ok(Flow::Continue);
            }
            RedirectPhase::PendingRedirect => {
                debug!("Replacing redirect which was never followed");
            }
            RedirectPhase::Idle => {}
        }

        let filename = clean(filename.trim());
        // dot segments would be resolved away by the browser
        if matches!(filename.as_str(), "" | "." | "..") {
            return Err(ContentError::new(ContentErrorType::EmptyFilename, None));
        }

        let route_params = match self.custom_route {
            Some(_) => route_params.unwrap_or_default(),
            None => {
                let mut params = RequestParams::new();
                if let Some(module) = request.module() {
                    params.insert(MODULE_ROUTE_PARAM.to_string(), module.to_string());
                }
                if let Some(action) = request.action() {
                    params.insert(ACTION_ROUTE_PARAM.to_string(), action.to_string());
                }
                params
            }
        };
        let mut context = RequestParams::new();
        if let Some(culture) = request.param(CULTURE_ROUTE_PARAM) {
            context.insert(CULTURE_ROUTE_PARAM.to_string(), culture.to_string());
        }
        let route = self.route_pattern().generate(&route_params, &context)?;
        let location = format!("{}/{}", route, urlencoding::encode(&filename));

        self.save_state(
            session,
            &PendingRedirectState {
                redirected: Some(false),
                request_method: Some(request.method().to_string()),
                request_params: Some(request.params().clone()),
            },
        )
        .await?;

        info!("Redirecting to {} to set filename", location);
        Ok(Flow::Complete(Complete::redirect(&location)))
    }

    /// Restores the stashed method and params onto `request`.
    ///
    /// Valid only as the second half of a `set_filename` flow, any other call
    /// is a not found.
    #[instrument(skip(self, request), fields(session = %session))]
    pub async fn replay(
        &self,
        session: &SessionId,
        request: &mut InboundRequest,
    ) -> Result<(), ContentError> {
        let state = self.load_state(session).await?;
        if state.phase() != RedirectPhase::PendingRedirect {
            debug!("No pending redirect, refusing replay");
            return Err(ContentError::not_found());
        }

        let method = state
            .request_method
            .as_deref()
            .and_then(|method| Method::from_bytes(method.as_bytes()).ok())
            .ok_or_else(|| {
                warn!("Pending redirect of session {} has no valid method", session);
                ContentError::not_found()
            })?;
        let params = state.request_params.clone().unwrap_or_default();

        self.save_state(
            session,
            &PendingRedirectState {
                redirected: Some(true),
                ..state
            },
        )
        .await?;

        request.set_method(method);
        request.replace_params(params);
        Ok(())
    }
}
