//! Storage port — repository trait for persisting locations.

use std::future::Future;

use locus_domain::error::LocusError;
use locus_domain::id::LocationId;
use locus_domain::location::{Location, LocationPatch};

/// Repository for persisting and querying [`Location`]s.
///
/// Implementations translate their store's "no such row" condition into
/// [`LocusError::NotFound`] for `update` and `delete`; every other store
/// failure is returned as [`LocusError::Storage`].
pub trait LocationRepository {
    /// Insert a new location keyed by its id.
    ///
    /// The id is generated by the caller; a duplicate is reported as a
    /// storage error.
    fn create(
        &self,
        location: Location,
    ) -> impl Future<Output = Result<Location, LocusError>> + Send;

    /// Get all locations, newest first.
    fn find_all(&self) -> impl Future<Output = Result<Vec<Location>, LocusError>> + Send;

    /// Get a location by id. Absence is `Ok(None)`, not an error.
    fn find_by_id(
        &self,
        id: LocationId,
    ) -> impl Future<Output = Result<Option<Location>, LocusError>> + Send;

    /// Apply `patch` to the stored location and return the full result.
    fn update(
        &self,
        id: LocationId,
        patch: LocationPatch,
    ) -> impl Future<Output = Result<Location, LocusError>> + Send;

    /// Delete a location by id.
    fn delete(&self, id: LocationId) -> impl Future<Output = Result<(), LocusError>> + Send;
}
