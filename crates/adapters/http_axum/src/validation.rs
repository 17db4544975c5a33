//! Boundary validation of location forms.
//!
//! Runs before any domain value is built and collects every problem instead
//! of stopping at the first one.

use serde::Serialize;
use url::Url;

use locus_domain::image::{ImageSource, ImageUpload};
use locus_domain::location::{
    LocationPatch, NewLocation, validate_latitude, validate_longitude, validate_name,
};

use crate::form::{FilePart, LocationForm};

/// One rejected request field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl FieldError {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Collects field errors while a form is being checked.
#[derive(Default)]
struct Errors(Vec<FieldError>);

impl Errors {
    fn push(&mut self, field: &'static str, message: impl Into<String>) {
        self.0.push(FieldError::new(field, message));
    }

    fn required<T>(&mut self, field: &'static str, value: Option<T>) -> Option<T> {
        if value.is_none() {
            self.push(field, format!("{field} is required"));
        }
        value
    }

    fn finish<T>(self, value: T) -> Result<T, Vec<FieldError>> {
        if self.0.is_empty() {
            Ok(value)
        } else {
            Err(self.0)
        }
    }
}

fn check_name(errors: &mut Errors, name: String) -> Option<String> {
    match validate_name(&name) {
        Ok(()) => Some(name),
        Err(err) => {
            errors.push("name", err.to_string());
            None
        }
    }
}

fn check_description(errors: &mut Errors, description: String) -> Option<String> {
    if description.is_empty() {
        errors.push("description", "description must not be empty");
        return None;
    }
    Some(description)
}

fn check_coordinate(
    errors: &mut Errors,
    field: &'static str,
    raw: &str,
    in_range: fn(f64) -> Result<(), locus_domain::error::ValidationError>,
) -> Option<f64> {
    let Ok(value) = raw.trim().parse::<f64>() else {
        errors.push(field, format!("{field} must be a number"));
        return None;
    };
    match in_range(value) {
        Ok(()) => Some(value),
        Err(err) => {
            errors.push(field, err.to_string());
            None
        }
    }
}

fn check_image_url(errors: &mut Errors, raw: String) -> Option<String> {
    match Url::parse(&raw) {
        Ok(url) if matches!(url.scheme(), "http" | "https") && url.has_host() => Some(raw),
        _ => {
            errors.push("imageUrl", "imageUrl must be an absolute http(s) URL");
            None
        }
    }
}

fn check_image(errors: &mut Errors, part: FilePart) -> Option<ImageUpload> {
    match ImageUpload::new(part.bytes, part.file_name, part.content_type) {
        Ok(image) => Some(image),
        Err(err) => {
            errors.push("image", err.to_string());
            None
        }
    }
}

/// Validate a create form.
///
/// Every text field except `imageUrl` is required, plus either an `image`
/// file or an `imageUrl`. An uploaded file takes precedence over a URL.
///
/// # Errors
///
/// Returns every [`FieldError`] found.
pub fn validate_create(form: LocationForm) -> Result<(NewLocation, ImageSource), Vec<FieldError>> {
    let mut errors = Errors::default();

    let name = errors
        .required("name", form.name)
        .and_then(|v| check_name(&mut errors, v));
    let description = errors
        .required("description", form.description)
        .and_then(|v| check_description(&mut errors, v));
    let latitude = errors
        .required("latitude", form.latitude)
        .and_then(|v| check_coordinate(&mut errors, "latitude", &v, validate_latitude));
    let longitude = errors
        .required("longitude", form.longitude)
        .and_then(|v| check_coordinate(&mut errors, "longitude", &v, validate_longitude));

    let image = match (form.image, form.image_url) {
        (Some(part), _) => check_image(&mut errors, part).map(ImageSource::Upload),
        (None, Some(url)) => check_image_url(&mut errors, url).map(ImageSource::Url),
        (None, None) => {
            errors.push("image", "an image file or an imageUrl is required");
            None
        }
    };

    match (name, description, latitude, longitude, image) {
        (Some(name), Some(description), Some(latitude), Some(longitude), Some(image)) => errors
            .finish((
                NewLocation {
                    name,
                    description,
                    latitude,
                    longitude,
                },
                image,
            )),
        _ => Err(errors.0),
    }
}

/// Validate an update form. Every field is optional; supplied ones follow
/// the create rules. An uploaded file takes precedence over `imageUrl`.
///
/// # Errors
///
/// Returns every [`FieldError`] found.
pub fn validate_update(
    form: LocationForm,
) -> Result<(LocationPatch, Option<ImageUpload>), Vec<FieldError>> {
    let mut errors = Errors::default();

    let patch = LocationPatch {
        name: form.name.and_then(|v| check_name(&mut errors, v)),
        description: form
            .description
            .and_then(|v| check_description(&mut errors, v)),
        latitude: form
            .latitude
            .and_then(|v| check_coordinate(&mut errors, "latitude", &v, validate_latitude)),
        longitude: form
            .longitude
            .and_then(|v| check_coordinate(&mut errors, "longitude", &v, validate_longitude)),
        image_url: match &form.image {
            Some(_) => None,
            None => form
                .image_url
                .and_then(|v| check_image_url(&mut errors, v)),
        },
    };
    let image = form.image.and_then(|part| check_image(&mut errors, part));

    errors.finish((patch, image))
}
