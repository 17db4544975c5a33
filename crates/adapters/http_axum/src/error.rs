//! HTTP error response mapping.

use axum::Json;
use axum::extract::multipart::MultipartError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use locus_domain::error::{LocusError, NotFoundError, ValidationError};

use crate::validation::FieldError;

/// JSON error body returned by API endpoints.
#[derive(Serialize)]
struct ErrorBody {
    error: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    fields: Vec<FieldError>,
}

/// Everything a handler can fail with, mapped to a status code.
pub enum ApiError {
    /// Error returned by the application layer.
    Domain(LocusError),
    /// Boundary validation rejected the request.
    InvalidInput(Vec<FieldError>),
    /// The multipart body could not be read.
    Multipart(MultipartError),
}

impl ApiError {
    /// A path id that cannot name any location.
    pub(crate) fn unknown_id(id: &str) -> Self {
        Self::Domain(
            NotFoundError {
                entity: "Location",
                id: id.to_string(),
            }
            .into(),
        )
    }
}

impl From<LocusError> for ApiError {
    fn from(err: LocusError) -> Self {
        Self::Domain(err)
    }
}

impl From<Vec<FieldError>> for ApiError {
    fn from(errors: Vec<FieldError>) -> Self {
        Self::InvalidInput(errors)
    }
}

impl From<MultipartError> for ApiError {
    fn from(err: MultipartError) -> Self {
        Self::Multipart(err)
    }
}

/// Name of the request field a domain validation error refers to.
fn field_of(err: &ValidationError) -> &'static str {
    match err {
        ValidationError::NameTooShort { .. } => "name",
        ValidationError::InvalidLatitude(_) => "latitude",
        ValidationError::InvalidLongitude(_) => "longitude",
        ValidationError::EmptyImage
        | ValidationError::ImageTooLarge { .. }
        | ValidationError::UnsupportedImageType(_) => "image",
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error, fields) = match self {
            Self::Domain(LocusError::Validation(err)) => (
                StatusCode::BAD_REQUEST,
                "validation failed".to_string(),
                vec![FieldError::new(field_of(&err), err.to_string())],
            ),
            Self::Domain(LocusError::NotFound(err)) => {
                (StatusCode::NOT_FOUND, err.to_string(), Vec::new())
            }
            Self::Domain(err @ (LocusError::Storage(_) | LocusError::ObjectStorage(_))) => {
                tracing::error!(error = ?err, "infrastructure error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_string(),
                    Vec::new(),
                )
            }
            Self::InvalidInput(fields) => (
                StatusCode::BAD_REQUEST,
                "validation failed".to_string(),
                fields,
            ),
            Self::Multipart(err) => (err.status(), err.body_text(), Vec::new()),
        };

        (status, Json(ErrorBody { error, fields })).into_response()
    }
}
