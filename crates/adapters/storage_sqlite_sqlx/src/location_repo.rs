//! `SQLite` implementation of [`LocationRepository`].

use std::future::Future;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row, SqlitePool};

use locus_app::ports::LocationRepository;
use locus_domain::error::{LocusError, NotFoundError};
use locus_domain::id::LocationId;
use locus_domain::location::{Location, LocationPatch};
use locus_domain::time::{Timestamp, to_sortable_string};

use crate::error::StorageError;

/// Wrapper for converting database rows into domain [`Location`].
struct Wrapper(Location);

impl Wrapper {
    fn maybe(value: Option<Self>) -> Option<Location> {
        value.map(|w| w.0)
    }
}

fn decode_error<E>(err: E) -> sqlx::Error
where
    E: std::error::Error + Send + Sync + 'static,
{
    sqlx::Error::Decode(Box::new(err))
}

fn parse_timestamp(value: &str) -> Result<Timestamp, sqlx::Error> {
    DateTime::parse_from_rfc3339(value)
        .map(|ts| ts.with_timezone(&Utc))
        .map_err(decode_error)
}

impl<'r> FromRow<'r, SqliteRow> for Wrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let id: String = row.try_get("id")?;
        let name: String = row.try_get("name")?;
        let description: String = row.try_get("description")?;
        let latitude: f64 = row.try_get("latitude")?;
        let longitude: f64 = row.try_get("longitude")?;
        let image_url: String = row.try_get("image_url")?;
        let created_at: String = row.try_get("created_at")?;
        let updated_at: String = row.try_get("updated_at")?;

        let location = Location::builder()
            .id(LocationId::from_str(&id).map_err(decode_error)?)
            .name(name)
            .description(description)
            .latitude(latitude)
            .longitude(longitude)
            .image_url(image_url)
            .created_at(parse_timestamp(&created_at)?)
            .updated_at(parse_timestamp(&updated_at)?)
            .build()
            .map_err(decode_error)?;

        Ok(Self(location))
    }
}

const INSERT: &str = "INSERT INTO locations (id, name, description, latitude, longitude, image_url, created_at, updated_at) VALUES (?, ?, ?, ?, ?, ?, ?, ?) RETURNING *";
const SELECT_BY_ID: &str = "SELECT * FROM locations WHERE id = ?";
const SELECT_ALL: &str = "SELECT * FROM locations ORDER BY created_at DESC, rowid DESC";
const UPDATE: &str = "UPDATE locations SET name = ?, description = ?, latitude = ?, longitude = ?, image_url = ?, updated_at = ? WHERE id = ?";
const DELETE_BY_ID: &str = "DELETE FROM locations WHERE id = ?";

fn not_found(id: LocationId) -> LocusError {
    NotFoundError {
        entity: "Location",
        id: id.to_string(),
    }
    .into()
}

/// `SQLite`-backed location repository.
pub struct SqliteLocationRepository {
    pool: SqlitePool,
}

impl SqliteLocationRepository {
    /// Create a new repository using the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl LocationRepository for SqliteLocationRepository {
    fn create(
        &self,
        location: Location,
    ) -> impl Future<Output = Result<Location, LocusError>> + Send {
        let pool = self.pool.clone();
        async move {
            let row: Wrapper = sqlx::query_as(INSERT)
                .bind(location.id().to_string())
                .bind(location.name())
                .bind(location.description())
                .bind(location.latitude())
                .bind(location.longitude())
                .bind(location.image_url())
                .bind(to_sortable_string(location.created_at()))
                .bind(to_sortable_string(location.updated_at()))
                .fetch_one(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(row.0)
        }
    }

    fn find_all(&self) -> impl Future<Output = Result<Vec<Location>, LocusError>> + Send {
        let pool = self.pool.clone();
        async move {
            let rows: Vec<Wrapper> = sqlx::query_as(SELECT_ALL)
                .fetch_all(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(rows.into_iter().map(|w| w.0).collect())
        }
    }

    fn find_by_id(
        &self,
        id: LocationId,
    ) -> impl Future<Output = Result<Option<Location>, LocusError>> + Send {
        let pool = self.pool.clone();
        async move {
            let row: Option<Wrapper> = sqlx::query_as(SELECT_BY_ID)
                .bind(id.to_string())
                .fetch_optional(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(Wrapper::maybe(row))
        }
    }

    fn update(
        &self,
        id: LocationId,
        patch: LocationPatch,
    ) -> impl Future<Output = Result<Location, LocusError>> + Send {
        let pool = self.pool.clone();
        async move {
            let mut tx = pool.begin().await.map_err(StorageError::from)?;

            let current: Option<Wrapper> = sqlx::query_as(SELECT_BY_ID)
                .bind(id.to_string())
                .fetch_optional(&mut *tx)
                .await
                .map_err(StorageError::from)?;
            let Some(Wrapper(current)) = current else {
                return Err(not_found(id));
            };

            let next = current.apply(patch)?;

            sqlx::query(UPDATE)
                .bind(next.name())
                .bind(next.description())
                .bind(next.latitude())
                .bind(next.longitude())
                .bind(next.image_url())
                .bind(to_sortable_string(next.updated_at()))
                .bind(id.to_string())
                .execute(&mut *tx)
                .await
                .map_err(StorageError::from)?;

            tx.commit().await.map_err(StorageError::from)?;

            Ok(next)
        }
    }

    fn delete(&self, id: LocationId) -> impl Future<Output = Result<(), LocusError>> + Send {
        let pool = self.pool.clone();
        async move {
            let result = sqlx::query(DELETE_BY_ID)
                .bind(id.to_string())
                .execute(&pool)
                .await
                .map_err(StorageError::from)?;

            if result.rows_affected() == 0 {
                return Err(not_found(id));
            }
            Ok(())
        }
    }
}
