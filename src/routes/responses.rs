use crate::content::error::{ContentError, ContentErrorType};
use crate::routes::errors::ErrorResponse;
use axum::Json;
use axum::response::IntoResponse;
use http::StatusCode;
use log::warn;
use serde::Serialize;

pub(crate) struct ApiError<T> {
    status: StatusCode,
    detail: String,
    error_type: Option<T>,
}

impl<T: Serialize> IntoResponse for ApiError<T> {
    fn into_response(self) -> axum::response::Response {
        let payload = ErrorResponse {
            detail: self.detail,
            error_type: self.error_type,
        };
        (self.status, Json(payload)).into_response()
    }
}

pub(crate) fn api_error<T>(status: StatusCode, detail: String, error_type: Option<T>) -> ApiError<T> {
    ApiError {
        status,
        detail,
        error_type,
    }
}

impl ContentErrorType {
    pub fn status(&self) -> StatusCode {
        match self {
            ContentErrorType::NotFound => StatusCode::NOT_FOUND,
            ContentErrorType::EmptyFilename
            | ContentErrorType::InvalidUpload
            | ContentErrorType::BadRequest => StatusCode::BAD_REQUEST,
            ContentErrorType::InvalidDestination
            | ContentErrorType::RelocationFailed
            | ContentErrorType::Routing
            | ContentErrorType::Session
            | ContentErrorType::Serialization
            | ContentErrorType::Io
            | ContentErrorType::Config => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ContentError {
    fn into_response(self) -> axum::response::Response {
        let status = self.err_type.status();
        if status.is_server_error() {
            warn!("Request failed: {}", self);
        }
        api_error(status, self.detail, Some(self.err_type)).into_response()
    }
}
