use serde::Serialize;
use std::fmt;

#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ContentErrorType {
    /// Filename is empty after cleaning
    EmptyFilename,
    /// Set filename route hit without pending redirect, or unknown action
    NotFound,
    InvalidUpload,
    InvalidDestination,
    RelocationFailed,
    /// Malformed request body (multipart, form)
    BadRequest,
    /// Route pattern can not be parsed or filled
    Routing,
    Session,
    Serialization,
    Io,
    Config,
}

impl ContentErrorType {
    pub fn default_detail(&self) -> String {
        match &self {
            ContentErrorType::EmptyFilename => "Can not set empty filename".to_string(),
            ContentErrorType::NotFound => "Not found".to_string(),
            ContentErrorType::InvalidUpload => "File must be a valid uploaded file".to_string(),
            ContentErrorType::InvalidDestination => {
                "Destination must be an existing directory".to_string()
            }
            ContentErrorType::RelocationFailed => "Error moving uploaded file".to_string(),
            ContentErrorType::BadRequest => "Malformed request".to_string(),
            ContentErrorType::Routing => "Unable to generate route".to_string(),
            ContentErrorType::Session => "Session storage failure".to_string(),
            ContentErrorType::Serialization => "Unable to serialize content".to_string(),
            ContentErrorType::Io => "Filesystem failure".to_string(),
            ContentErrorType::Config => "Invalid configuration".to_string(),
        }
    }
}

#[derive(Debug)]
pub struct ContentError {
    pub err_type: ContentErrorType,
    pub detail: String,
}

impl ContentError {
    pub fn new(err_type: ContentErrorType, detail: Option<String>) -> Self {
        let detail = detail.unwrap_or(err_type.default_detail());
        ContentError { err_type, detail }
    }

    pub fn not_found() -> Self {
        ContentError::new(ContentErrorType::NotFound, None)
    }
}

impl fmt::Display for ContentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}: {}", self.err_type, self.detail)
    }
}

impl std::error::Error for ContentError {}
