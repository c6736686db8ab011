pub mod actions;
pub mod errors;
pub mod responses;
pub mod set_filename;

use crate::app::AppState;
use crate::routing::FILENAME_ROUTE_PARAM;
use crate::session::session_middleware;
use axum::Router;
use axum::middleware::from_fn_with_state;
use axum::routing::get;
use http::StatusCode;
use std::sync::Arc;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

pub const ACTION_ROUTE: &str = "/{sf_culture}/{module}/{action}";

/// Registers set filename and action routes
pub fn router(state: Arc<AppState>) -> Router {
    let set_filename_path = state.redirector.route_pattern().axum_path();
    let set_filename_with_name = format!("{}/{{{}}}", set_filename_path, FILENAME_ROUTE_PARAM);

    Router::new()
        .route(
            &set_filename_path,
            get(set_filename::set_filename).post(set_filename::set_filename),
        )
        .route(
            &set_filename_with_name,
            get(set_filename::set_filename).post(set_filename::set_filename),
        )
        .route(
            ACTION_ROUTE,
            get(actions::dispatch_action).post(actions::dispatch_action),
        )
        .layer(from_fn_with_state(state.clone(), session_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            state.config.request_timeout,
        ))
        .with_state(state)
}
