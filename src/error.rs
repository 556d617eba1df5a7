//! Error types for media generation.

use std::time::Duration;

/// Longest error body kept after sanitizing.
const MAX_ERROR_MESSAGE_LEN: usize = 500;

/// Errors that can occur while generating or saving media.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// API key missing or rejected.
    #[error("authentication failed: {0}")]
    Auth(String),

    /// API returned a non-success response.
    #[error("API error: {status} {status_text}{}", body_suffix(.body))]
    Api {
        /// HTTP status code.
        status: u16,
        /// Canonical reason phrase for the status.
        status_text: String,
        /// Response headers, in the order received.
        headers: Vec<(String, String)>,
        /// Sanitized response body.
        body: String,
    },

    /// Rate limit exceeded.
    #[error("rate limited, retry after {retry_after:?}")]
    RateLimited {
        /// Server-suggested delay, when a `Retry-After` header was sent.
        retry_after: Option<Duration>,
    },

    /// Video job did not finish in time.
    #[error("operation timed out after {0:?}")]
    Timeout(Duration),

    /// Content was blocked by moderation.
    #[error("content blocked: {0}")]
    ContentBlocked(String),

    /// Invalid request parameters.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Transport-level HTTP failure.
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Failed to decode base64 data.
    #[error("failed to decode: {0}")]
    Decode(String),

    /// I/O error (reading the source image, writing outputs).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Response had an unexpected shape.
    #[error("unexpected response: {0}")]
    UnexpectedResponse(String),

    /// Video result carried neither bytes nor a download URL.
    #[error("no data received from video generation")]
    NoVideoData,
}

impl Error {
    /// Builds an [`Error::Api`] from a status code, headers and body text.
    pub fn api(status: u16, headers: &reqwest::header::HeaderMap, body: &str) -> Self {
        let status_text = reqwest::StatusCode::from_u16(status)
            .ok()
            .and_then(|s| s.canonical_reason())
            .unwrap_or_default()
            .to_string();

        let headers = headers
            .iter()
            .map(|(name, value)| {
                (
                    name.as_str().to_string(),
                    value.to_str().unwrap_or("<binary>").to_string(),
                )
            })
            .collect();

        Self::Api {
            status,
            status_text,
            headers,
            body: sanitize_error_message(body),
        }
    }

    /// Returns the HTTP status carried by this error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            Self::RateLimited { .. } => Some(429),
            Self::Network(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

fn body_suffix(body: &str) -> String {
    if body.is_empty() {
        String::new()
    } else {
        format!(" - {body}")
    }
}

/// Result type alias for media generation operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Reads a `Retry-After` header given in whole seconds.
pub(crate) fn parse_retry_after(headers: &reqwest::header::HeaderMap) -> Option<u64> {
    headers
        .get(reqwest::header::RETRY_AFTER)?
        .to_str()
        .ok()?
        .trim()
        .parse()
        .ok()
}

/// Collapses whitespace and truncates an error body for display.
///
/// Pulls `error.message`, `error` or `message` out of JSON bodies when present.
pub(crate) fn sanitize_error_message(text: &str) -> String {
    let extracted = serde_json::from_str::<serde_json::Value>(text)
        .ok()
        .and_then(|v| {
            v.pointer("/error/message")
                .or_else(|| v.get("error"))
                .or_else(|| v.get("message"))
                .and_then(|m| m.as_str().map(str::to_string))
        })
        .unwrap_or_else(|| text.to_string());

    let collapsed = extracted.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.chars().count() > MAX_ERROR_MESSAGE_LEN {
        let truncated: String = collapsed.chars().take(MAX_ERROR_MESSAGE_LEN).collect();
        format!("{truncated}...")
    } else {
        collapsed
    }
}

/// Maps a non-success xAI response onto an [`Error`] variant.
pub(crate) fn classify_response(
    status: u16,
    text: &str,
    headers: &reqwest::header::HeaderMap,
) -> Error {
    match status {
        401 | 403 => return Error::Auth(sanitize_error_message(text)),
        402 => {
            return Error::Auth(
                "Insufficient credits. Check your xAI billing at console.x.ai".into(),
            )
        }
        422 => return Error::InvalidRequest(sanitize_error_message(text)),
        429 => {
            let retry_after = parse_retry_after(headers).map(Duration::from_secs);
            return Error::RateLimited { retry_after };
        }
        _ => {}
    }

    let lower = text.to_lowercase();
    if lower.contains("safety")
        || lower.contains("blocked")
        || lower.contains("content_policy")
        || lower.contains("moderated")
        || lower.contains("try a different idea")
    {
        return Error::ContentBlocked(sanitize_error_message(text));
    }

    Error::api(status, headers, text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE, RETRY_AFTER};

    #[test]
    fn test_api_error_fills_status_text() {
        let err = Error::api(500, &HeaderMap::new(), "boom");
        match err {
            Error::Api {
                status,
                status_text,
                body,
                ..
            } => {
                assert_eq!(status, 500);
                assert_eq!(status_text, "Internal Server Error");
                assert_eq!(body, "boom");
            }
            other => panic!("expected Api, got {other:?}"),
        }
    }

    #[test]
    fn test_api_error_keeps_headers() {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        let err = Error::api(503, &headers, "");
        let Error::Api { headers, .. } = err else {
            panic!("expected Api");
        };
        assert_eq!(
            headers,
            vec![("content-type".to_string(), "application/json".to_string())]
        );
    }

    #[test]
    fn test_sanitize_extracts_json_message() {
        let body = r#"{"error": {"message": "bad   prompt\n here"}}"#;
        assert_eq!(sanitize_error_message(body), "bad prompt here");

        let body = r#"{"error": "nope"}"#;
        assert_eq!(sanitize_error_message(body), "nope");
    }

    #[test]
    fn test_sanitize_truncates_long_bodies() {
        let body = "x".repeat(MAX_ERROR_MESSAGE_LEN + 10);
        let clean = sanitize_error_message(&body);
        assert!(clean.ends_with("..."));
        assert_eq!(clean.len(), MAX_ERROR_MESSAGE_LEN + 3);
    }

    #[test]
    fn test_classify_response() {
        let empty = HeaderMap::new();
        assert!(matches!(
            classify_response(401, "denied", &empty),
            Error::Auth(_)
        ));
        assert!(matches!(
            classify_response(422, "bad field", &empty),
            Error::InvalidRequest(_)
        ));
        assert!(matches!(
            classify_response(400, "Content moderated, try a different idea", &empty),
            Error::ContentBlocked(_)
        ));
        assert!(matches!(
            classify_response(500, "oops", &empty),
            Error::Api { status: 500, .. }
        ));

        let mut headers = HeaderMap::new();
        headers.insert(RETRY_AFTER, HeaderValue::from_static("30"));
        match classify_response(429, "", &headers) {
            Error::RateLimited { retry_after } => {
                assert_eq!(retry_after, Some(Duration::from_secs(30)));
            }
            other => panic!("expected RateLimited, got {other:?}"),
        }
    }

    #[test]
    fn test_status() {
        assert_eq!(Error::api(404, &HeaderMap::new(), "").status(), Some(404));
        assert_eq!(Error::RateLimited { retry_after: None }.status(), Some(429));
        assert_eq!(Error::NoVideoData.status(), None);
    }

    #[test]
    fn test_error_display() {
        assert_eq!(
            Error::NoVideoData.to_string(),
            "no data received from video generation"
        );
        let err = Error::Api {
            status: 500,
            status_text: "Internal Error".into(),
            headers: vec![],
            body: String::new(),
        };
        assert_eq!(err.to_string(), "API error: 500 Internal Error");
        let err = Error::Api {
            status: 500,
            status_text: "Internal Error".into(),
            headers: vec![],
            body: "boom".into(),
        };
        assert_eq!(err.to_string(), "API error: 500 Internal Error - boom");

        let err = Error::ContentBlocked("Safety filter triggered".into());
        assert_eq!(err.to_string(), "content blocked: Safety filter triggered");
    }
}
