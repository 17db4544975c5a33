//! JSON REST API handler modules.

#[allow(clippy::missing_errors_doc)]
pub mod locations;

use axum::Router;
use axum::routing::get;

use locus_app::ports::{ImageStorage, LocationRepository};

use crate::state::AppState;

/// Build the `/api` sub-router.
pub fn routes<R, S>() -> Router<AppState<R, S>>
where
    R: LocationRepository + Send + Sync + 'static,
    S: ImageStorage + Send + Sync + 'static,
{
    Router::new()
        .route(
            "/locations",
            get(locations::list::<R, S>).post(locations::create::<R, S>),
        )
        .route(
            "/locations/{id}",
            get(locations::get::<R, S>)
                .put(locations::update::<R, S>)
                .delete(locations::delete::<R, S>),
        )
}
