use axum::{
    extract::State,
    http::{StatusCode, Uri},
    response::{IntoResponse, Response},
};
use common::models::Resolution;
use uuid::Uuid;

use super::{run_blocking, ApiError, FileResponse};
use crate::request;
use crate::state::AppState;

/// Newest radar file for a site, or 304 when the client already has it
#[tracing::instrument(skip(state, uri), fields(path = %uri.path(), request_id = %Uuid::new_v4()))]
pub async fn latest(State(state): State<AppState>, uri: Uri) -> Response {
    match resolve_latest(state, &uri).await {
        Ok(Resolution::Fetched(file)) => FileResponse(file).into_response(),
        Ok(Resolution::Unchanged) => StatusCode::NOT_MODIFIED.into_response(),
        Err(e) => e.into_response(),
    }
}

async fn resolve_latest(state: AppState, uri: &Uri) -> Result<Resolution, ApiError> {
    let request = request::parse_latest(uri.path())?;
    let resolver = state.resolver.clone();
    run_blocking(move || {
        resolver.resolve_latest(
            &request.site,
            &request.product,
            request.reference.as_deref(),
        )
    })
    .await
}

/// Radar file preceding the one named in the path
#[tracing::instrument(skip(state, uri), fields(path = %uri.path(), request_id = %Uuid::new_v4()))]
pub async fn before(State(state): State<AppState>, uri: Uri) -> Result<FileResponse, ApiError> {
    let request = request::parse_before(uri.path())?;
    let resolver = state.resolver.clone();
    let file = run_blocking(move || {
        resolver.resolve_before(&request.site, &request.product, &request.excluded)
    })
    .await?;
    Ok(FileResponse(file))
}
