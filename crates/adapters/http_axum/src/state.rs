//! Shared application state for axum handlers.

use std::sync::Arc;

use locus_app::ports::{ImageStorage, LocationRepository};
use locus_app::services::location_service::LocationService;

/// Application state shared across all axum handlers.
///
/// Generic over the repository and image storage types to avoid dynamic
/// dispatch. `Clone` is implemented manually so the underlying types
/// themselves do not need to be `Clone` — only the `Arc` wrapper is cloned.
pub struct AppState<R, S> {
    /// Location CRUD service.
    pub location_service: Arc<LocationService<R, S>>,
}

impl<R, S> Clone for AppState<R, S> {
    fn clone(&self) -> Self {
        Self {
            location_service: Arc::clone(&self.location_service),
        }
    }
}

impl<R, S> AppState<R, S>
where
    R: LocationRepository + Send + Sync + 'static,
    S: ImageStorage + Send + Sync + 'static,
{
    /// Create a new application state from a service instance.
    pub fn new(location_service: LocationService<R, S>) -> Self {
        Self {
            location_service: Arc::new(location_service),
        }
    }
}
