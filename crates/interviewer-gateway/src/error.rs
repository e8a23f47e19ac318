//! Mapping of HTTP failures onto the client error taxonomy.

use serde::Deserialize;

use interviewer_core::error::InterviewError;

/// Error payload sent by the service: `{"error": "..."}`.
#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

/// Classify a non-2xx response.
///
/// The service's `error` message is surfaced verbatim. A 400 means the
/// service rejected the input and becomes [`InterviewError::Validation`];
/// everything else is a [`InterviewError::Service`] carrying the status.
pub fn status_error(status: u16, body: &str) -> InterviewError {
    let message = serde_json::from_str::<ErrorBody>(body)
        .map(|b| b.error)
        .ok()
        .or_else(|| {
            let trimmed = body.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        })
        .unwrap_or_else(|| {
            reqwest::StatusCode::from_u16(status)
                .ok()
                .and_then(|s| s.canonical_reason())
                .map(|r| format!("HTTP {status}: {r}"))
                .unwrap_or_else(|| format!("HTTP {status}"))
        });

    if status == 400 {
        InterviewError::Validation(message)
    } else {
        InterviewError::Service {
            status: Some(status),
            message,
        }
    }
}

/// Classify a transport failure (no response at all).
pub fn transport_error(err: &reqwest::Error, timeout_secs: u64) -> InterviewError {
    if err.is_timeout() {
        InterviewError::service(None, format!("request timed out after {timeout_secs}s"))
    } else if err.is_connect() {
        InterviewError::service(None, format!("could not reach the interview service: {err}"))
    } else {
        InterviewError::service(None, format!("network error: {err}"))
    }
}
