use axum::{routing::get, Router};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

/// Create the main application router with all routes and middleware
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::root::home))
        .route("/health", get(handlers::health::health_check))
        .route("/metrics", get(handlers::metrics::metrics_handler))
        // Radar files; segments are parsed by the handlers
        .route("/latest", get(handlers::radar::latest))
        .route("/latest/", get(handlers::radar::latest))
        .route("/latest/*rest", get(handlers::radar::latest))
        .route("/before", get(handlers::radar::before))
        .route("/before/", get(handlers::radar::before))
        .route("/before/*rest", get(handlers::radar::before))
        // Directory listing
        .route("/ls", get(handlers::listing::list_directory))
        .route("/ls/", get(handlers::listing::list_directory))
        .route("/ls/*rest", get(handlers::listing::list_directory))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
