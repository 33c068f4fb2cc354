use axum::{http::StatusCode, response::IntoResponse};

/// Liveness check; never contacts the FTP host
#[tracing::instrument]
pub async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}
