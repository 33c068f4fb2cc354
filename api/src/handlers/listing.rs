use axum::{
    extract::State,
    http::Uri,
    response::Html,
};
use serde::Serialize;
use tera::Context;

use super::{run_blocking, ApiError};
use crate::request;
use crate::state::AppState;
use crate::templates;

#[derive(Debug, Serialize)]
struct ListingRow {
    name: String,
    size: u64,
    modified: String,
}

/// HTML listing of a site directory, oldest first
#[tracing::instrument(skip(state, uri), fields(path = %uri.path()))]
pub async fn list_directory(
    State(state): State<AppState>,
    uri: Uri,
) -> Result<Html<String>, ApiError> {
    let site = request::parse_listing(uri.path(), &state.config.radar.default_site);
    let resolver = state.resolver.clone();
    let entries = run_blocking(move || resolver.list_directory(&site)).await?;

    let rows: Vec<ListingRow> = entries
        .into_iter()
        .map(|entry| ListingRow {
            name: entry.name,
            size: entry.size,
            modified: entry.modified.to_string(),
        })
        .collect();

    let mut context = Context::new();
    context.insert("entries", &rows);
    Ok(Html(templates::render("listing.html", &context)))
}
