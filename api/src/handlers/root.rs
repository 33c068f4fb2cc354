use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};

use crate::state::AppState;

/// Permanent redirect to the client app's landing page
#[tracing::instrument(skip(state))]
pub async fn home(State(state): State<AppState>) -> Response {
    (
        StatusCode::MOVED_PERMANENTLY,
        [(header::LOCATION, state.config.server.home_url.clone())],
    )
        .into_response()
}
