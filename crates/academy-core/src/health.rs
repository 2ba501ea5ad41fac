use axum::http::StatusCode;

/// Liveness check. Answers 200 while the process can serve requests; database
/// reachability is reported separately by the service's `/readyz`.
pub async fn healthz() -> StatusCode {
    StatusCode::OK
}
