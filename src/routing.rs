use crate::content::error::{ContentError, ContentErrorType};
use crate::request::RequestParams;
use std::fmt;
use std::str::FromStr;

pub const DEFAULT_SET_FILENAME_PATTERN: &str =
    "/:sf_culture/mtContent/setFilename/:mt_content_module/:mt_content_action";

/// Context param every route carries, the only one taken from the current request
pub const CULTURE_ROUTE_PARAM: &str = "sf_culture";
pub const MODULE_ROUTE_PARAM: &str = "mt_content_module";
pub const ACTION_ROUTE_PARAM: &str = "mt_content_action";
pub const FILENAME_ROUTE_PARAM: &str = "mt_content_filename";

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Static(String),
    Param(String),
}

/// Url pattern in `/static/:param` form
///
/// Used both to register a route and to generate urls for it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutePattern {
    pattern: String,
    segments: Vec<Segment>,
}

fn routing_error(detail: String) -> ContentError {
    ContentError::new(ContentErrorType::Routing, Some(detail))
}

impl FromStr for RoutePattern {
    type Err = ContentError;

    fn from_str(pattern: &str) -> Result<Self, Self::Err> {
        let pattern = pattern.trim();
        let Some(path) = pattern.strip_prefix('/') else {
            return Err(routing_error(format!(
                "Route pattern \"{}\" must start with /",
                pattern
            )));
        };

        let mut segments = Vec::new();
        for raw in path.trim_end_matches('/').split('/') {
            if raw.is_empty() {
                return Err(routing_error(format!(
                    "Route pattern \"{}\" has an empty segment",
                    pattern
                )));
            }
            if raw.contains(['{', '}', '*']) {
                return Err(routing_error(format!(
                    "Unsupported segment \"{}\" in route pattern \"{}\"",
                    raw, pattern
                )));
            }
            let segment = match raw.strip_prefix(':') {
                Some(name) => {
                    let valid = !name.is_empty()
                        && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_');
                    if !valid {
                        return Err(routing_error(format!(
                            "Invalid parameter \"{}\" in route pattern \"{}\"",
                            raw, pattern
                        )));
                    }
                    if segments.contains(&Segment::Param(name.to_string())) {
                        return Err(routing_error(format!(
                            "Parameter \"{}\" repeats in route pattern \"{}\"",
                            name, pattern
                        )));
                    }
                    Segment::Param(name.to_string())
                }
                None => Segment::Static(raw.to_string()),
            };
            segments.push(segment);
        }

        Ok(RoutePattern {
            pattern: pattern.to_string(),
            segments,
        })
    }
}

impl RoutePattern {
    /// Path in axum router syntax
    pub fn axum_path(&self) -> String {
        self.segments
            .iter()
            .map(|segment| match segment {
                Segment::Static(value) => format!("/{}", value),
                Segment::Param(name) => format!("/{{{}}}", name),
            })
            .collect()
    }

    /// Fills the pattern, looking up every parameter in `params` first and
    /// `defaults` second. Values are url-escaped, parameters the pattern does
    /// not mention are ignored.
    pub fn generate(
        &self,
        params: &RequestParams,
        defaults: &RequestParams,
    ) -> Result<String, ContentError> {
        let mut url = String::new();
        for segment in &self.segments {
            url.push('/');
            match segment {
                Segment::Static(value) => url.push_str(value),
                Segment::Param(name) => {
                    let value = params.get(name).or_else(|| defaults.get(name)).ok_or_else(|| {
                        routing_error(format!(
                            "Missing parameter \"{}\" for route \"{}\"",
                            name, self.pattern
                        ))
                    })?;
                    url.push_str(&urlencoding::encode(value));
                }
            }
        }
        Ok(url)
    }
}

impl Default for RoutePattern {
    fn default() -> Self {
        let param = |name: &str| Segment::Param(name.to_string());
        let fixed = |value: &str| Segment::Static(value.to_string());
        RoutePattern {
            pattern: DEFAULT_SET_FILENAME_PATTERN.to_string(),
            segments: vec![
                param(CULTURE_ROUTE_PARAM),
                fixed("mtContent"),
                fixed("setFilename"),
                param(MODULE_ROUTE_PARAM),
                param(ACTION_ROUTE_PARAM),
            ],
        }
    }
}

impl fmt::Display for RoutePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.pattern)
    }
}
