//! Location — a named point of interest with coordinates and an image.
//!
//! A [`Location`] can only be obtained through [`LocationBuilder::build`]
//! (or the [`Location::create`] shortcut), which enforces every invariant.
//! Fields are read-only; [`Location::apply`] produces a new validated value
//! from a [`LocationPatch`].

use serde::Serialize;

use crate::error::ValidationError;
use crate::id::LocationId;
use crate::time::{Timestamp, now};

/// Minimum number of characters in a location name.
pub const MIN_NAME_LEN: usize = 3;

const LATITUDE_RANGE: std::ops::RangeInclusive<f64> = -90.0..=90.0;
const LONGITUDE_RANGE: std::ops::RangeInclusive<f64> = -180.0..=180.0;

/// A point of interest.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Location {
    id: LocationId,
    name: String,
    description: String,
    latitude: f64,
    longitude: f64,
    image_url: String,
    created_at: Timestamp,
    updated_at: Timestamp,
}

impl Location {
    /// Create a builder for constructing a [`Location`].
    #[must_use]
    pub fn builder() -> LocationBuilder {
        LocationBuilder::default()
    }

    /// Build a brand-new location with a freshly generated id.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] when `new` breaks an invariant.
    pub fn create(new: NewLocation, image_url: impl Into<String>) -> Result<Self, ValidationError> {
        Self::builder()
            .name(new.name)
            .description(new.description)
            .latitude(new.latitude)
            .longitude(new.longitude)
            .image_url(image_url)
            .build()
    }

    #[must_use]
    pub fn id(&self) -> LocationId {
        self.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    #[must_use]
    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    #[must_use]
    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    #[must_use]
    pub fn image_url(&self) -> &str {
        &self.image_url
    }

    #[must_use]
    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }

    #[must_use]
    pub fn updated_at(&self) -> Timestamp {
        self.updated_at
    }

    /// Return a copy with the supplied fields replaced.
    ///
    /// `id` and `created_at` are kept, `updated_at` is refreshed.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] when the resulting state breaks an
    /// invariant. `self` is left untouched either way.
    pub fn apply(&self, patch: LocationPatch) -> Result<Self, ValidationError> {
        let next = Self {
            id: self.id,
            name: patch.name.unwrap_or_else(|| self.name.clone()),
            description: patch
                .description
                .unwrap_or_else(|| self.description.clone()),
            latitude: patch.latitude.unwrap_or(self.latitude),
            longitude: patch.longitude.unwrap_or(self.longitude),
            image_url: patch.image_url.unwrap_or_else(|| self.image_url.clone()),
            created_at: self.created_at,
            updated_at: now().max(self.created_at),
        };
        next.validate()?;
        Ok(next)
    }

    fn validate(&self) -> Result<(), ValidationError> {
        validate_name(&self.name)?;
        validate_latitude(self.latitude)?;
        validate_longitude(self.longitude)
    }
}

/// Check the name length rule.
///
/// # Errors
///
/// Returns [`ValidationError::NameTooShort`] for names under
/// [`MIN_NAME_LEN`] characters.
pub fn validate_name(name: &str) -> Result<(), ValidationError> {
    let actual = name.chars().count();
    if actual < MIN_NAME_LEN {
        return Err(ValidationError::NameTooShort {
            min: MIN_NAME_LEN,
            actual,
        });
    }
    Ok(())
}

/// Check that `latitude` is a number in `[-90, 90]`.
///
/// # Errors
///
/// Returns [`ValidationError::InvalidLatitude`] otherwise (NaN included).
pub fn validate_latitude(latitude: f64) -> Result<(), ValidationError> {
    if LATITUDE_RANGE.contains(&latitude) {
        Ok(())
    } else {
        Err(ValidationError::InvalidLatitude(latitude))
    }
}

/// Check that `longitude` is a number in `[-180, 180]`.
///
/// # Errors
///
/// Returns [`ValidationError::InvalidLongitude`] otherwise (NaN included).
pub fn validate_longitude(longitude: f64) -> Result<(), ValidationError> {
    if LONGITUDE_RANGE.contains(&longitude) {
        Ok(())
    } else {
        Err(ValidationError::InvalidLongitude(longitude))
    }
}

/// Step-by-step builder for [`Location`].
///
/// Without an explicit id a new one is generated; without timestamps both
/// are set to the current time. Explicit ids and timestamps are meant for
/// rehydrating stored records.
#[derive(Debug, Default)]
pub struct LocationBuilder {
    id: Option<LocationId>,
    name: Option<String>,
    description: Option<String>,
    latitude: Option<f64>,
    longitude: Option<f64>,
    image_url: Option<String>,
    created_at: Option<Timestamp>,
    updated_at: Option<Timestamp>,
}

impl LocationBuilder {
    #[must_use]
    pub fn id(mut self, id: LocationId) -> Self {
        self.id = Some(id);
        self
    }

    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn latitude(mut self, latitude: f64) -> Self {
        self.latitude = Some(latitude);
        self
    }

    #[must_use]
    pub fn longitude(mut self, longitude: f64) -> Self {
        self.longitude = Some(longitude);
        self
    }

    #[must_use]
    pub fn image_url(mut self, image_url: impl Into<String>) -> Self {
        self.image_url = Some(image_url.into());
        self
    }

    #[must_use]
    pub fn created_at(mut self, created_at: Timestamp) -> Self {
        self.created_at = Some(created_at);
        self
    }

    #[must_use]
    pub fn updated_at(mut self, updated_at: Timestamp) -> Self {
        self.updated_at = Some(updated_at);
        self
    }

    /// Consume the builder, validate, and return a [`Location`].
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] if the name is missing or too short, or a
    /// coordinate is missing, NaN, or out of range.
    pub fn build(self) -> Result<Location, ValidationError> {
        let created_at = self.created_at.unwrap_or_else(now);
        let location = Location {
            id: self.id.unwrap_or_default(),
            name: self.name.unwrap_or_default(),
            description: self.description.unwrap_or_default(),
            latitude: self.latitude.unwrap_or(f64::NAN),
            longitude: self.longitude.unwrap_or(f64::NAN),
            image_url: self.image_url.unwrap_or_default(),
            created_at,
            updated_at: self.updated_at.unwrap_or(created_at),
        };
        location.validate()?;
        Ok(location)
    }
}

/// Creation input: everything but the id and the image.
#[derive(Debug, Clone, PartialEq)]
pub struct NewLocation {
    pub name: String,
    pub description: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl NewLocation {
    /// Check the same invariants [`Location`] enforces, before any side
    /// effect happens.
    ///
    /// # Errors
    ///
    /// Returns the first [`ValidationError`] found.
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_name(&self.name)?;
        validate_latitude(self.latitude)?;
        validate_longitude(self.longitude)
    }
}

/// Partial update: `None` leaves the field as it is.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LocationPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub image_url: Option<String>,
}

impl LocationPatch {
    /// Whether the patch changes nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.latitude.is_none()
            && self.longitude.is_none()
            && self.image_url.is_none()
    }

    /// Validate the supplied fields on their own.
    ///
    /// # Errors
    ///
    /// Returns the first [`ValidationError`] found.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if let Some(name) = &self.name {
            validate_name(name)?;
        }
        if let Some(latitude) = self.latitude {
            validate_latitude(latitude)?;
        }
        if let Some(longitude) = self.longitude {
            validate_longitude(longitude)?;
        }
        Ok(())
    }
}
