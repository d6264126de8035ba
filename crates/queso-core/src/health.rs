use std::fmt::Display;
use std::future::Future;

use axum::http::StatusCode;

/// Handler for `GET /healthz`: the process is up and serving.
pub async fn healthz() -> StatusCode {
    StatusCode::OK
}

/// Turn a dependency probe into a readiness status.
///
/// `200` when the probe succeeds, `503` (logged at WARN) when it fails.
pub async fn readiness<F, E>(probe: F) -> StatusCode
where
    F: Future<Output = Result<(), E>>,
    E: Display,
{
    match probe.await {
        Ok(()) => StatusCode::OK,
        Err(e) => {
            ::tracing::warn!(error = %e, "readiness probe failed");
            StatusCode::SERVICE_UNAVAILABLE
        }
    }
}
