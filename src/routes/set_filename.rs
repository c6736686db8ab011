use crate::action::{ActionContext, forward};
use crate::app::AppState;
use crate::content::error::ContentError;
use crate::content::flow::Complete;
use crate::content::upload::RequestUploads;
use crate::request::{InboundRequest, RequestParams};
use crate::session::SessionId;
use axum::extract::State;
use http::{Method, Uri};
use std::sync::Arc;

/// Second half of the set filename redirect
///
/// Restores the request stashed by `set_filename` and forwards it to the action
/// it came from. Parameters of this url (filename included) are dropped, only
/// the url itself stays, so content type can be told from the filename.
pub async fn set_filename(
    State(state): State<Arc<AppState>>,
    session: SessionId,
    method: Method,
    uri: Uri,
) -> Result<Complete, ContentError> {
    let mut request = InboundRequest::new(method, uri, RequestParams::new());
    state.redirector.replay(&session, &mut request).await?;

    let ctx = ActionContext::new(state, session, request, RequestUploads::default());
    forward(ctx).await
}
