//! Backend API client error types.
//!
//! Every non-2xx response is a failure regardless of status code; only 404
//! is singled out, so views can show a dedicated "not found" page instead of
//! a generic notification.

/// Message used when an error response carries no usable `detail`.
pub const GENERIC_DETAIL: &str = "the server could not complete the request";

/// Errors from backend API calls.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// HTTP transport error (connection refused, timeout, broken body).
    #[error("HTTP error calling {endpoint}: {source}")]
    Http {
        endpoint: String,
        source: reqwest::Error,
    },
    /// Backend returned 404.
    #[error("{endpoint} not found: {}", .detail.as_deref().unwrap_or(GENERIC_DETAIL))]
    NotFound {
        endpoint: String,
        detail: Option<String>,
    },
    /// Backend returned any other non-2xx status.
    #[error("{endpoint} returned {status}: {}", .detail.as_deref().unwrap_or(GENERIC_DETAIL))]
    Status {
        endpoint: String,
        status: u16,
        detail: Option<String>,
    },
    /// Response deserialization failed.
    #[error("failed to deserialize response from {endpoint}: {source}")]
    Deserialization {
        endpoint: String,
        source: reqwest::Error,
    },
    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(#[from] super::config::ConfigError),
}

impl ApiError {
    /// Whether the backend reported the entity as missing.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// The endpoint label (`METHOD /path`) the error came from, if any.
    pub fn endpoint(&self) -> Option<&str> {
        match self {
            Self::Http { endpoint, .. }
            | Self::NotFound { endpoint, .. }
            | Self::Status { endpoint, .. }
            | Self::Deserialization { endpoint, .. } => Some(endpoint),
            Self::Config(_) => None,
        }
    }

    /// Message suitable for a user-facing notification: the backend's
    /// `detail` when present, otherwise a generic description.
    pub fn user_message(&self) -> String {
        match self {
            Self::NotFound { detail, .. } | Self::Status { detail, .. } => {
                detail.clone().unwrap_or_else(|| GENERIC_DETAIL.to_string())
            }
            Self::Http { source, .. } if source.is_timeout() => {
                "the server did not respond in time".to_string()
            }
            Self::Http { .. } => "could not reach the server".to_string(),
            Self::Deserialization { .. } => "the server sent an unexpected response".to_string(),
            Self::Config(e) => e.to_string(),
        }
    }
}

/// Extract the `detail` field from an error body.
///
/// The backend sends either `{"detail": "message"}` or, for request
/// validation failures, `{"detail": [{"loc": [...], "msg": "..."}]}`. The
/// list form is flattened into `location: message` entries. Anything else
/// yields `None`.
pub(crate) fn parse_detail(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    match value.get("detail")? {
        serde_json::Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        serde_json::Value::Array(items) => {
            let lines: Vec<String> = items.iter().filter_map(validation_line).collect();
            if lines.is_empty() {
                None
            } else {
                Some(lines.join("; "))
            }
        }
        _ => None,
    }
}

fn validation_line(item: &serde_json::Value) -> Option<String> {
    let msg = item.get("msg")?.as_str()?;
    let loc = item
        .get("loc")
        .and_then(|l| l.as_array())
        .map(|parts| {
            parts
                .iter()
                .filter(|p| p.as_str() != Some("body"))
                .map(|p| match p {
                    serde_json::Value::String(s) => s.clone(),
                    other => other.to_string(),
                })
                .collect::<Vec<_>>()
                .join(".")
        })
        .unwrap_or_default();
    if loc.is_empty() {
        Some(msg.to_string())
    } else {
        Some(format!("{loc}: {msg}"))
    }
}
