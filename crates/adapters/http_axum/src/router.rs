//! Axum router assembly.

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::routing::get;
use tower_http::trace::TraceLayer;

use locus_app::ports::{ImageStorage, LocationRepository};
use locus_domain::image::MAX_IMAGE_BYTES;

use crate::state::AppState;

/// Largest accepted request body: one full-size image plus room for the
/// text fields and multipart framing.
pub const MAX_BODY_BYTES: usize = MAX_IMAGE_BYTES + 64 * 1024;

/// Build the top-level axum [`Router`].
///
/// Nests API routes under `/api` and exposes `/health`.
/// Includes a [`TraceLayer`] that logs each HTTP request/response at the
/// `DEBUG` level using the `tracing` ecosystem.
pub fn build<R, S>(state: AppState<R, S>) -> Router
where
    R: LocationRepository + Send + Sync + 'static,
    S: ImageStorage + Send + Sync + 'static,
{
    Router::new()
        .route("/health", get(health_check))
        .nest("/api", crate::api::routes())
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health_check() -> &'static str {
    "OK"
}
