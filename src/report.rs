//! Top-level error reporting.

use crate::app::Outcome;
use crate::error::{Error, Result};
use crate::exitcode;

/// Renders an error as the lines printed to standard error.
pub fn error_lines(err: &Error) -> Vec<String> {
    let mut lines = vec![format!("Generation failed: {err}")];

    match err {
        Error::Api {
            status,
            status_text,
            headers,
            body,
        } => {
            lines.push(format!("Status: {status}"));
            if !status_text.is_empty() {
                lines.push(format!("Status text: {status_text}"));
            }
            if !headers.is_empty() {
                lines.push("Headers:".to_string());
                lines.extend(headers.iter().map(|(k, v)| format!("  {k}: {v}")));
            }
            if !body.is_empty() {
                lines.push(format!("Response details: {body}"));
            }
        }
        Error::RateLimited { retry_after } => {
            lines.push("Status: 429".to_string());
            if let Some(delay) = retry_after {
                lines.push(format!("Retry after: {}s", delay.as_secs()));
            }
        }
        Error::Network(e) => {
            if let Some(status) = e.status() {
                lines.push(format!("Status: {}", status.as_u16()));
            }
            if let Some(url) = e.url() {
                lines.push(format!("URL: {url}"));
            }
        }
        Error::Auth(_)
        | Error::Timeout(_)
        | Error::ContentBlocked(_)
        | Error::InvalidRequest(_)
        | Error::Decode(_)
        | Error::Io(_)
        | Error::Json(_)
        | Error::UnexpectedResponse(_)
        | Error::NoVideoData => {}
    }

    lines
}

/// Prints an error to standard error and logs it.
pub fn report_error(err: &Error) {
    tracing::error!(status = ?err.status(), "{err}");
    for line in error_lines(err) {
        eprintln!("{line}");
    }
}

/// Reports a failed run and picks the exit status.
///
/// Generation errors are printed, not propagated, so every run exits with [`exitcode::OK`].
pub fn finish(result: &Result<Outcome>) -> i32 {
    match result {
        Ok(outcome) => tracing::debug!(?outcome, "run finished"),
        Err(e) => report_error(e),
    }
    exitcode::OK
}
