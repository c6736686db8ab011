use crate::content::error::{ContentError, ContentErrorType};
use crate::content::filename::parse;
use crate::content::flow::Complete;
use crate::content::mime_types;
use axum::body::{Body, Bytes};
use http::{Response, StatusCode, Uri, header};
use log::debug;
use percent_encoding::percent_decode_str;
use serde::Serialize;

pub const DEFAULT_CHARSET: &str = "utf-8";

/// Sent when neither options nor url tell the type
const FALLBACK_CONTENT_TYPE: &str = "application/octet-stream";

/// Body to send, raw bytes or data serialized as json
#[derive(Debug, Clone)]
pub enum Content {
    Raw(Bytes),
    Json(serde_json::Value),
}

impl Content {
    pub fn json<T: Serialize>(value: &T) -> Result<Self, ContentError> {
        serde_json::to_value(value)
            .map(Content::Json)
            .map_err(|err| ContentError::new(ContentErrorType::Serialization, Some(err.to_string())))
    }

    fn into_bytes(self) -> Result<Bytes, ContentError> {
        match self {
            Content::Raw(bytes) => Ok(bytes),
            Content::Json(value) => serde_json::to_vec(&value).map(Bytes::from).map_err(|err| {
                ContentError::new(ContentErrorType::Serialization, Some(err.to_string()))
            }),
        }
    }
}

impl From<Bytes> for Content {
    fn from(value: Bytes) -> Self {
        Content::Raw(value)
    }
}

impl From<Vec<u8>> for Content {
    fn from(value: Vec<u8>) -> Self {
        Content::Raw(Bytes::from(value))
    }
}

impl From<String> for Content {
    fn from(value: String) -> Self {
        Content::Raw(Bytes::from(value))
    }
}

impl From<&str> for Content {
    fn from(value: &str) -> Self {
        Content::Raw(Bytes::copy_from_slice(value.as_bytes()))
    }
}

impl From<serde_json::Value> for Content {
    fn from(value: serde_json::Value) -> Self {
        Content::Json(value)
    }
}

/// How content is sent, every field is optional
#[derive(Debug, Clone, Default)]
pub struct DispatchOptions {
    /// Content type, when missing it comes from `extension`
    pub content_type: Option<String>,
    /// Appended to text, xml and json types, `utf-8` by default, empty for none
    pub charset: Option<String>,
    /// Extension to look the type up by, when missing it comes from the request url
    pub extension: Option<String>,
    /// Send as attachment. When missing, every type except text, xml and json is
    pub force_download: Option<bool>,
}

impl DispatchOptions {
    pub fn with_type(mut self, content_type: &str) -> Self {
        self.content_type = Some(content_type.to_string());
        self
    }

    pub fn with_charset(mut self, charset: &str) -> Self {
        self.charset = Some(charset.to_string());
        self
    }

    pub fn with_extension(mut self, extension: &str) -> Self {
        self.extension = Some(extension.to_string());
        self
    }

    pub fn force_download(mut self, force_download: bool) -> Self {
        self.force_download = Some(force_download);
        self
    }

    fn normalized(self) -> NormalizedOptions {
        let normalize = |value: String| value.trim().to_lowercase();
        let non_empty = |value: String| Some(value).filter(|value| !value.is_empty());
        NormalizedOptions {
            content_type: self.content_type.map(normalize).and_then(non_empty),
            charset: self
                .charset
                .map(normalize)
                .unwrap_or_else(|| DEFAULT_CHARSET.to_string()),
            extension: self.extension.map(normalize).and_then(non_empty),
            force_download: self.force_download,
        }
    }
}

struct NormalizedOptions {
    content_type: Option<String>,
    charset: String,
    extension: Option<String>,
    force_download: Option<bool>,
}

/// Lowercase extension of the last segment of the (decoded) url path
pub fn extension_from_uri(uri: &Uri) -> String {
    let path = percent_decode_str(uri.path()).decode_utf8_lossy();
    let basename = path.trim_end_matches('/').rsplit('/').next().unwrap_or_default();
    parse(basename).extension.to_lowercase()
}

/// Adds charset to text, xml and json types, others become downloads unless
/// told otherwise
fn negotiate(content_type: String, charset: &str, force_download: Option<bool>) -> (String, bool) {
    let textual = (!content_type.contains("charset")
        && (content_type.starts_with("text/") || content_type.ends_with("xml")))
        || content_type == "application/json";

    if textual {
        let content_type = match charset.is_empty() {
            true => content_type,
            false => format!("{}; charset={}", content_type, charset),
        };
        (content_type, force_download.unwrap_or(false))
    } else {
        (content_type, force_download.unwrap_or(true))
    }
}

/// Builds the final response of a request.
///
/// The type comes from options, or else from the extension (given, or taken
/// from `uri`). Json content with no known type is sent as
/// `application/json`.
pub fn send(
    uri: &Uri,
    status: StatusCode,
    content: Content,
    options: DispatchOptions,
) -> Result<Complete, ContentError> {
    let options = options.normalized();

    let content_type = match options.content_type {
        Some(content_type) => content_type,
        None => {
            let extension = options
                .extension
                .unwrap_or_else(|| extension_from_uri(uri));
            match mime_types::resolve(&extension, "") {
                "" if matches!(content, Content::Json(_)) => "application/json".to_string(),
                resolved => resolved.to_string(),
            }
        }
    };
    let (content_type, force_download) =
        negotiate(content_type, &options.charset, options.force_download);

    let body = content.into_bytes()?;
    debug!(
        "Sending {} bytes as \"{}\", download: {}",
        body.len(),
        content_type,
        force_download
    );

    let header_type = match content_type.as_str() {
        "" => FALLBACK_CONTENT_TYPE,
        content_type => content_type,
    };
    let mut response = Response::builder()
        .status(status)
        .header(header::CONTENT_TYPE, header_type)
        .header(header::CONTENT_LENGTH, body.len());
    if force_download {
        response = response.header(header::CONTENT_DISPOSITION, "attachment");
    }

    response
        .body(Body::from(body))
        .map(Complete::new)
        .map_err(|err| ContentError::new(ContentErrorType::Serialization, Some(err.to_string())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::response::Response as AxumResponse;
    use serde_json::json;

    fn uri(path: &'static str) -> Uri {
        Uri::from_static(path)
    }

    fn header_of<'a>(response: &'a AxumResponse, name: header::HeaderName) -> Option<&'a str> {
        response.headers().get(name).map(|value| value.to_str().unwrap())
    }

    fn sent(uri: Uri, content: impl Into<Content>, options: DispatchOptions) -> AxumResponse {
        send(&uri, StatusCode::OK, content.into(), options)
            .unwrap()
            .into_inner()
    }

    #[test]
    fn text_gets_charset_and_stays_inline() {
        let response = sent(uri("/x"), "hello", DispatchOptions::default().with_type("text/plain"));
        assert_eq!(
            header_of(&response, header::CONTENT_TYPE),
            Some("text/plain; charset=utf-8")
        );
        assert_eq!(header_of(&response, header::CONTENT_DISPOSITION), None);
        assert_eq!(header_of(&response, header::CONTENT_LENGTH), Some("5"));
    }

    #[test]
    fn binary_is_forced_download() {
        let response = sent(
            uri("/x"),
            vec![0u8, 1, 2],
            DispatchOptions::default().with_type("application/octet-stream"),
        );
        assert_eq!(
            header_of(&response, header::CONTENT_TYPE),
            Some("application/octet-stream")
        );
        assert_eq!(
            header_of(&response, header::CONTENT_DISPOSITION),
            Some("attachment")
        );
    }

    #[test]
    fn structured_content_is_json() {
        let response = sent(uri("/en/report/summary"), json!({"a": 1}), DispatchOptions::default());
        assert_eq!(
            header_of(&response, header::CONTENT_TYPE),
            Some("application/json; charset=utf-8")
        );
        assert_eq!(header_of(&response, header::CONTENT_LENGTH), Some("7"));
        assert_eq!(header_of(&response, header::CONTENT_DISPOSITION), None);
    }

    #[test]
    fn type_comes_from_url_extension() {
        let response = sent(
            uri("/en/mtContent/setFilename/report/download/My%20Report.PDF"),
            "%PDF",
            DispatchOptions::default(),
        );
        assert_eq!(header_of(&response, header::CONTENT_TYPE), Some("application/pdf"));
        assert_eq!(
            header_of(&response, header::CONTENT_DISPOSITION),
            Some("attachment")
        );

        let response = sent(uri("/a/b/list.csv"), "a,b", DispatchOptions::default());
        assert_eq!(
            header_of(&response, header::CONTENT_TYPE),
            Some("text/csv; charset=utf-8")
        );
    }

    #[test]
    fn explicit_extension_wins_over_url() {
        let response = sent(
            uri("/a/b/list.csv"),
            "<a/>",
            DispatchOptions::default().with_extension(" XML "),
        );
        assert_eq!(
            header_of(&response, header::CONTENT_TYPE),
            Some("text/xml; charset=utf-8")
        );
    }

    #[test]
    fn unknown_type_is_octet_stream_download() {
        let response = sent(uri("/a/b/noext"), "??", DispatchOptions::default());
        assert_eq!(
            header_of(&response, header::CONTENT_TYPE),
            Some(FALLBACK_CONTENT_TYPE)
        );
        assert_eq!(
            header_of(&response, header::CONTENT_DISPOSITION),
            Some("attachment")
        );
    }

    #[test]
    fn options_are_normalized() {
        let response = sent(
            uri("/x"),
            "<svg/>",
            DispatchOptions::default()
                .with_type(" Image/SVG+XML ")
                .with_charset(" ISO-8859-2 "),
        );
        assert_eq!(
            header_of(&response, header::CONTENT_TYPE),
            Some("image/svg+xml; charset=iso-8859-2")
        );
    }

    #[test]
    fn existing_charset_and_empty_charset_are_kept() {
        let response = sent(
            uri("/x"),
            "x",
            DispatchOptions::default().with_type("text/html; charset=latin1"),
        );
        assert_eq!(
            header_of(&response, header::CONTENT_TYPE),
            Some("text/html; charset=latin1")
        );
        assert_eq!(
            header_of(&response, header::CONTENT_DISPOSITION),
            Some("attachment")
        );

        let response = sent(
            uri("/x"),
            "x",
            DispatchOptions::default().with_type("text/plain").with_charset(""),
        );
        assert_eq!(header_of(&response, header::CONTENT_TYPE), Some("text/plain"));
    }

    #[test]
    fn explicit_download_flag_is_honored() {
        let response = sent(
            uri("/x"),
            "x",
            DispatchOptions::default()
                .with_type("text/plain")
                .force_download(true),
        );
        assert_eq!(
            header_of(&response, header::CONTENT_DISPOSITION),
            Some("attachment")
        );

        let response = sent(
            uri("/x"),
            vec![1u8],
            DispatchOptions::default()
                .with_type("image/png")
                .force_download(false),
        );
        assert_eq!(header_of(&response, header::CONTENT_DISPOSITION), None);
    }

    #[test]
    fn status_is_kept() {
        let response = send(
            &uri("/x.txt"),
            StatusCode::CREATED,
            "x".into(),
            DispatchOptions::default(),
        )
        .unwrap()
        .into_inner();
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    #[test]
    fn extension_from_uri_uses_decoded_basename() {
        assert_eq!(extension_from_uri(&uri("/a/b/r%C3%A9sum%C3%A9.Txt")), "txt");
        assert_eq!(extension_from_uri(&uri("/a/file.tar.gz/")), "gz");
        assert_eq!(extension_from_uri(&uri("/a.b/c")), "");
        assert_eq!(extension_from_uri(&uri("/")), "");
    }
}
