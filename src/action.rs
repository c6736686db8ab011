use crate::app::AppState;
use crate::config::Config;
use crate::content::dispatch::{self, Content, DispatchOptions};
use crate::content::error::ContentError;
use crate::content::flow::{Complete, Flow};
use crate::content::upload::{RequestUploads, UploadedFile};
use crate::request::{InboundRequest, RequestParams};
use crate::session::SessionId;
use async_trait::async_trait;
use http::StatusCode;
use log::{debug, info};
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

/// Request handler, addressed by module and action name
///
/// Every path of `execute` ends in a [`Complete`], either a redirect from
/// [`ActionContext::set_filename`] or content from [`ActionContext::send`].
#[async_trait]
pub trait Action: Send + Sync {
    async fn execute(&self, ctx: &mut ActionContext) -> Result<Complete, ContentError>;
}

#[derive(Default)]
pub struct ActionRegistry {
    actions: HashMap<(String, String), Arc<dyn Action>>,
}

impl ActionRegistry {
    pub fn new() -> Self {
        ActionRegistry::default()
    }

    pub fn register(&mut self, module: &str, action: &str, handler: impl Action + 'static) -> &mut Self {
        self.actions
            .insert((module.to_string(), action.to_string()), Arc::new(handler));
        self
    }

    pub fn get(&self, module: &str, action: &str) -> Option<Arc<dyn Action>> {
        self.actions
            .get(&(module.to_string(), action.to_string()))
            .cloned()
    }
}

/// Everything an action gets to work with during one request
pub struct ActionContext {
    state: Arc<AppState>,
    session: SessionId,
    request: InboundRequest,
    uploads: RequestUploads,
    status: StatusCode,
}

impl ActionContext {
    pub fn new(
        state: Arc<AppState>,
        session: SessionId,
        request: InboundRequest,
        uploads: RequestUploads,
    ) -> Self {
        ActionContext {
            state,
            session,
            request,
            uploads,
            status: StatusCode::OK,
        }
    }

    pub fn request(&self) -> &InboundRequest {
        &self.request
    }

    pub fn uploads(&self) -> &RequestUploads {
        &self.uploads
    }

    pub fn session(&self) -> &SessionId {
        &self.session
    }

    pub fn config(&self) -> &Config {
        &self.state.config
    }

    /// Status of the response `send` builds
    pub fn set_status(&mut self, status: StatusCode) {
        self.status = status;
    }

    /// See [`crate::content::redirect::FilenameRedirector::set_filename`]
    pub async fn set_filename(&self, filename: &str) -> Result<Flow, ContentError> {
        self.state
            .redirector
            .set_filename(&self.session, &self.request, filename, None)
            .await
    }

    /// Same as [`ActionContext::set_filename`], filling a custom set filename
    /// route with `route_params`
    pub async fn set_filename_with_route(
        &self,
        filename: &str,
        route_params: RequestParams,
    ) -> Result<Flow, ContentError> {
        self.state
            .redirector
            .set_filename(&self.session, &self.request, filename, Some(route_params))
            .await
    }

    pub fn send(
        &self,
        content: impl Into<Content>,
        options: DispatchOptions,
    ) -> Result<Complete, ContentError> {
        dispatch::send(self.request.uri(), self.status, content.into(), options)
    }

    pub async fn move_uploaded_file(
        &self,
        file: &UploadedFile,
        destination: &Path,
        overwrite: bool,
    ) -> Result<String, ContentError> {
        self.state
            .relocator
            .relocate(&self.uploads, file, destination, overwrite)
            .await
    }
}

/// Runs the action named by the request's `module` and `action` params, in process
pub async fn forward(mut ctx: ActionContext) -> Result<Complete, ContentError> {
    let (Some(module), Some(action)) = (ctx.request.module(), ctx.request.action()) else {
        debug!("Request names no module or action");
        return Err(ContentError::not_found());
    };
    let Some(handler) = ctx.state.actions.get(module, action) else {
        debug!("Action {}/{} is not registered", module, action);
        return Err(ContentError::not_found());
    };

    info!("Forwarding to {}/{}", module, action);
    handler.execute(&mut ctx).await
}
