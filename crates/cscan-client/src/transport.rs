//! Shared request plumbing for the sub-clients.
//!
//! Each call is sent once. Non-2xx responses become [`ApiError::NotFound`]
//! (404) or [`ApiError::Status`] with the backend's `detail`, if any.

use reqwest::{RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;

use crate::error::{parse_detail, ApiError};

/// Send `request` and fail on any non-2xx status.
pub(crate) async fn send(endpoint: &str, request: RequestBuilder) -> Result<Response, ApiError> {
    tracing::debug!(endpoint, "sending request");

    let resp = request.send().await.map_err(|e| ApiError::Http {
        endpoint: endpoint.to_string(),
        source: e,
    })?;

    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }

    let body = resp.text().await.unwrap_or_default();
    let detail = parse_detail(&body);
    tracing::warn!(
        endpoint,
        status = status.as_u16(),
        detail = detail.as_deref().unwrap_or(""),
        "backend returned an error status"
    );

    if status == StatusCode::NOT_FOUND {
        Err(ApiError::NotFound {
            endpoint: endpoint.to_string(),
            detail,
        })
    } else {
        Err(ApiError::Status {
            endpoint: endpoint.to_string(),
            status: status.as_u16(),
            detail,
        })
    }
}

/// Send `request` and decode a JSON body.
pub(crate) async fn send_json<T: DeserializeOwned>(
    endpoint: &str,
    request: RequestBuilder,
) -> Result<T, ApiError> {
    let resp = send(endpoint, request).await?;
    resp.json().await.map_err(|e| ApiError::Deserialization {
        endpoint: endpoint.to_string(),
        source: e,
    })
}

/// Send `request` and return the raw body.
pub(crate) async fn send_bytes(
    endpoint: &str,
    request: RequestBuilder,
) -> Result<Vec<u8>, ApiError> {
    let resp = send(endpoint, request).await?;
    let bytes = resp.bytes().await.map_err(|e| ApiError::Http {
        endpoint: endpoint.to_string(),
        source: e,
    })?;
    Ok(bytes.to_vec())
}
