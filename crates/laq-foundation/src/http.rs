//! Shared reqwest helpers for the backend clients.

use laq_kernel::BackendError;
use std::time::Duration;

pub(crate) fn build_client(timeout_secs: u64) -> Result<reqwest::Client, BackendError> {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .build()
        .map_err(|e| BackendError::Connection(format!("failed to build HTTP client: {e}")))
}

/// Map a transport failure. Anything that stopped the request from
/// completing counts as the backend being unreachable.
pub(crate) fn transport_error(backend: &str, err: reqwest::Error) -> BackendError {
    if err.is_decode() {
        BackendError::InvalidResponse(format!("{backend} returned an unreadable body: {err}"))
    } else if err.is_timeout() {
        BackendError::Connection(format!("{backend} timed out: {err}"))
    } else {
        BackendError::Connection(format!("{backend} unreachable: {err}"))
    }
}

/// Read the body of a non-2xx response for the error message.
pub(crate) async fn status_detail(response: reqwest::Response) -> String {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    if body.is_empty() {
        status.to_string()
    } else {
        format!("{status}: {body}")
    }
}
