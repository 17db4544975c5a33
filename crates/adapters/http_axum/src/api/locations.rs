//! JSON REST handlers for locations.

use std::str::FromStr;

use axum::Json;
use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use locus_app::ports::{ImageStorage, LocationRepository};
use locus_domain::id::LocationId;
use locus_domain::location::Location;
use locus_domain::time::Timestamp;

use crate::error::ApiError;
use crate::form::LocationForm;
use crate::state::AppState;
use crate::validation::{validate_create, validate_update};

/// JSON representation of a [`Location`].
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationResponse {
    pub id: LocationId,
    pub name: String,
    pub description: String,
    pub latitude: f64,
    pub longitude: f64,
    pub image_url: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<Location> for LocationResponse {
    fn from(location: Location) -> Self {
        Self {
            id: location.id(),
            name: location.name().to_string(),
            description: location.description().to_string(),
            latitude: location.latitude(),
            longitude: location.longitude(),
            image_url: location.image_url().to_string(),
            created_at: location.created_at(),
            updated_at: location.updated_at(),
        }
    }
}

/// Possible responses from the list endpoint.
pub enum ListResponse {
    Ok(Json<Vec<LocationResponse>>),
}

impl IntoResponse for ListResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from the get and update endpoints.
pub enum GetResponse {
    Ok(Json<LocationResponse>),
}

impl IntoResponse for GetResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from the create endpoint.
pub enum CreateResponse {
    Created(Json<LocationResponse>),
}

impl IntoResponse for CreateResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Created(json) => (StatusCode::CREATED, json).into_response(),
        }
    }
}

/// Possible responses from the delete endpoint.
pub enum DeleteResponse {
    NoContent,
}

impl IntoResponse for DeleteResponse {
    fn into_response(self) -> Response {
        match self {
            Self::NoContent => StatusCode::NO_CONTENT.into_response(),
        }
    }
}

fn parse_id(id: &str) -> Result<LocationId, ApiError> {
    LocationId::from_str(id).map_err(|_| ApiError::unknown_id(id))
}

/// `GET /api/locations` — list all locations, newest first.
pub async fn list<R, S>(State(state): State<AppState<R, S>>) -> Result<ListResponse, ApiError>
where
    R: LocationRepository + Send + Sync + 'static,
    S: ImageStorage + Send + Sync + 'static,
{
    let locations = state.location_service.list_locations().await?;
    Ok(ListResponse::Ok(Json(
        locations.into_iter().map(LocationResponse::from).collect(),
    )))
}

/// `GET /api/locations/:id` — get a location by ID.
pub async fn get<R, S>(
    State(state): State<AppState<R, S>>,
    Path(id): Path<String>,
) -> Result<GetResponse, ApiError>
where
    R: LocationRepository + Send + Sync + 'static,
    S: ImageStorage + Send + Sync + 'static,
{
    let location_id = parse_id(&id)?;
    let location = state.location_service.get_location(location_id).await?;
    Ok(GetResponse::Ok(Json(location.into())))
}

/// `POST /api/locations` — create a location from a multipart form.
pub async fn create<R, S>(
    State(state): State<AppState<R, S>>,
    multipart: Multipart,
) -> Result<CreateResponse, ApiError>
where
    R: LocationRepository + Send + Sync + 'static,
    S: ImageStorage + Send + Sync + 'static,
{
    let form = LocationForm::from_multipart(multipart).await?;
    let (new, image) = validate_create(form)?;
    let created = state.location_service.create_location(new, image).await?;
    Ok(CreateResponse::Created(Json(created.into())))
}

/// `PUT /api/locations/:id` — partially update a location, optionally
/// replacing its image.
pub async fn update<R, S>(
    State(state): State<AppState<R, S>>,
    Path(id): Path<String>,
    multipart: Multipart,
) -> Result<GetResponse, ApiError>
where
    R: LocationRepository + Send + Sync + 'static,
    S: ImageStorage + Send + Sync + 'static,
{
    let location_id = parse_id(&id)?;
    let form = LocationForm::from_multipart(multipart).await?;
    let (patch, image) = validate_update(form)?;
    let updated = state
        .location_service
        .update_location(location_id, patch, image)
        .await?;
    Ok(GetResponse::Ok(Json(updated.into())))
}

/// `DELETE /api/locations/:id` — delete a location.
pub async fn delete<R, S>(
    State(state): State<AppState<R, S>>,
    Path(id): Path<String>,
) -> Result<DeleteResponse, ApiError>
where
    R: LocationRepository + Send + Sync + 'static,
    S: ImageStorage + Send + Sync + 'static,
{
    let location_id = parse_id(&id)?;
    state.location_service.delete_location(location_id).await?;
    Ok(DeleteResponse::NoContent)
}
