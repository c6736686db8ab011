use http::{Method, Uri};
use indexmap::IndexMap;

pub type RequestParams = IndexMap<String, String>;

pub const MODULE_PARAM: &str = "module";
pub const ACTION_PARAM: &str = "action";

/// Method, uri and merged parameters of the request an action works with
///
/// Parameters come from query, body and route, `module` and `action` included.
#[derive(Debug, Clone)]
pub struct InboundRequest {
    method: Method,
    uri: Uri,
    params: RequestParams,
}

impl InboundRequest {
    pub fn new(method: Method, uri: Uri, params: RequestParams) -> Self {
        InboundRequest {
            method,
            uri,
            params,
        }
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn set_method(&mut self, method: Method) {
        self.method = method;
    }

    pub fn uri(&self) -> &Uri {
        &self.uri
    }

    pub fn params(&self) -> &RequestParams {
        &self.params
    }

    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(String::as_str)
    }

    /// Drops every current parameter in favour of `params`
    pub fn replace_params(&mut self, params: RequestParams) {
        self.params = params;
    }

    pub fn module(&self) -> Option<&str> {
        self.param(MODULE_PARAM)
    }

    pub fn action(&self) -> Option<&str> {
        self.param(ACTION_PARAM)
    }
}
