use crate::action::{ActionContext, forward};
use crate::app::AppState;
use crate::content::error::{ContentError, ContentErrorType};
use crate::content::flow::Complete;
use crate::content::upload::RequestUploads;
use crate::request::{InboundRequest, RequestParams};
use crate::session::SessionId;
use axum::extract::{FromRequest, Multipart, Path, Query, Request, State};
use axum::Form;
use http::{Method, header};
use std::sync::Arc;

fn bad_request(detail: String) -> ContentError {
    ContentError::new(ContentErrorType::BadRequest, Some(detail))
}

/// Adds body params of form and multipart requests, spooling uploaded files
async fn read_body(
    state: &Arc<AppState>,
    request: Request,
    params: &mut RequestParams,
) -> Result<RequestUploads, ContentError> {
    let content_type = request
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
        .to_ascii_lowercase();

    if content_type.starts_with("multipart/form-data") {
        let mut multipart = Multipart::from_request(request, state)
            .await
            .map_err(|rejection| bad_request(rejection.body_text()))?;
        return RequestUploads::from_multipart(
            &mut multipart,
            state.config.upload_tmp_dir.as_deref(),
            params,
        )
        .await;
    }

    let has_body = request.method() != Method::GET && request.method() != Method::HEAD;
    if has_body && content_type.starts_with("application/x-www-form-urlencoded") {
        let Form(fields) = Form::<Vec<(String, String)>>::from_request(request, state)
            .await
            .map_err(|rejection| bad_request(rejection.body_text()))?;
        params.extend(fields);
    }

    Ok(RequestUploads::default())
}

/// Entry of every registered action, `/{sf_culture}/{module}/{action}`
///
/// Params are merged from query, body and route, route params winning.
pub async fn dispatch_action(
    State(state): State<Arc<AppState>>,
    session: SessionId,
    Path(route_params): Path<Vec<(String, String)>>,
    Query(query): Query<Vec<(String, String)>>,
    request: Request,
) -> Result<Complete, ContentError> {
    let method = request.method().clone();
    let uri = request.uri().clone();

    let mut params: RequestParams = query.into_iter().collect();
    let uploads = read_body(&state, request, &mut params).await?;
    params.extend(route_params);

    let ctx = ActionContext::new(
        state,
        session,
        InboundRequest::new(method, uri, params),
        uploads,
    );
    forward(ctx).await
}
