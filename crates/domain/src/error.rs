//! Common error types used across the workspace.
//!
//! Each layer defines its own typed errors and converts into [`LocusError`]
//! via `From`. Only validation failures and missing records are domain
//! concepts; everything else is carried as an opaque infrastructure source.

use std::error::Error as StdError;

/// Boxed infrastructure error carried by [`LocusError`].
pub type BoxError = Box<dyn StdError + Send + Sync>;

/// Top-level error returned by every fallible operation in locus.
#[derive(Debug, thiserror::Error)]
pub enum LocusError {
    /// A domain invariant was violated by the caller's input.
    #[error("validation error")]
    Validation(#[from] ValidationError),

    /// The requested record does not exist.
    #[error("not found")]
    NotFound(#[from] NotFoundError),

    /// The relational store failed.
    #[error("storage error")]
    Storage(#[source] BoxError),

    /// The object-storage bucket failed.
    #[error("object storage error")]
    ObjectStorage(#[source] BoxError),
}

/// Invariant violations detected while building domain values.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    /// `name` is missing or shorter than the required length.
    #[error("name must be at least {min} characters long (got {actual})")]
    NameTooShort { min: usize, actual: usize },

    /// `latitude` is NaN or outside `[-90, 90]`.
    #[error("latitude must be a number between -90 and 90 (got {0})")]
    InvalidLatitude(f64),

    /// `longitude` is NaN or outside `[-180, 180]`.
    #[error("longitude must be a number between -180 and 180 (got {0})")]
    InvalidLongitude(f64),

    /// An image upload carried no bytes.
    #[error("image is empty")]
    EmptyImage,

    /// An image upload exceeds the size limit.
    #[error("image is {size} bytes, the limit is {max} bytes")]
    ImageTooLarge { size: usize, max: usize },

    /// An image upload has a content type outside the accepted set.
    #[error("unsupported image type `{0}`")]
    UnsupportedImageType(String),
}

/// A lookup by identifier found nothing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{entity} with id {id} not found")]
pub struct NotFoundError {
    /// Kind of record that was looked up.
    pub entity: &'static str,
    /// Identifier as supplied by the caller.
    pub id: String,
}
