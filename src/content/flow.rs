use axum::body::Body;
use axum::response::{IntoResponse, Response};
use http::{StatusCode, header};

/// Response which finishes the current request
///
/// Produced by a redirect or by sending content. Nothing may run after it
/// besides returning it to the http layer.
#[must_use]
#[derive(Debug)]
pub struct Complete(Response);

impl Complete {
    pub fn new(response: Response) -> Self {
        Complete(response)
    }

    /// 302 redirect to `location`
    pub fn redirect(location: &str) -> Self {
        let response = (StatusCode::FOUND, [(header::LOCATION, location)], Body::empty());
        Complete(response.into_response())
    }

    pub fn response(&self) -> &Response {
        &self.0
    }

    pub fn into_inner(self) -> Response {
        self.0
    }
}

impl IntoResponse for Complete {
    fn into_response(self) -> Response {
        self.0
    }
}

/// Outcome of a step that may finish the request on its own
#[must_use]
#[derive(Debug)]
pub enum Flow {
    /// Caller goes on with its normal logic
    Continue,
    /// Request is over, return the response as is
    Complete(Complete),
}
