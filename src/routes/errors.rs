use serde::Serialize;

#[derive(Debug, Serialize)]
#[serde(bound = "T: Serialize")]
pub struct ErrorResponse<T> {
    pub detail: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_type: Option<T>,
}
